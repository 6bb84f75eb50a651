//! Effective URL resolution.
//!
//! Some share links wrap the real target in a `mediaurl` query parameter
//! (e.g. `https://example.com/view?mediaurl=https://cdn.example.com/a.mp4`).
//! Resolution unwraps exactly one such layer.

use url::form_urlencoded;
use url::Url;

/// Query key that designates the real download target.
pub const MEDIA_URL_PARAM: &str = "mediaurl";

/// Returns the URL that should actually be fetched for `input_url`.
///
/// If the query string carries a non-empty `mediaurl` value, that value is
/// returned (the first non-empty one if repeated). Otherwise `input_url` is
/// returned unchanged. The input is not validated; bad URLs fail at fetch time.
pub fn resolve(input_url: &str) -> String {
    match extract_media_url(input_url) {
        Some(media) => {
            tracing::debug!("resolved {} via {} to {}", input_url, MEDIA_URL_PARAM, media);
            media
        }
        None => input_url.to_string(),
    }
}

/// Looks up the first non-empty `mediaurl` value in the query of `url`.
pub fn extract_media_url(url: &str) -> Option<String> {
    let query = query_of(url)?;
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == MEDIA_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .find(|value| !value.is_empty())
}

/// Query component of `url`; falls back to plain text splitting when the
/// string is not an absolute URL.
fn query_of(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url) {
        return parsed.query().map(str::to_string);
    }
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment
        .split_once('?')
        .map(|(_, query)| query.to_string())
}
