//! Destination path normalization.
//!
//! A save location without an extension borrows the extension of the file
//! named by the effective URL, so `~/out` + `.../video.mp4` becomes `~/out.mp4`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use url::Url;

/// Fallback name when the URL path names no file.
const DEFAULT_FILE_NAME: &str = "download";

/// Returns the path to write to for `path` and the effective URL.
///
/// Paths that already carry a non-empty extension are returned unchanged.
/// Otherwise the URL path's extension (possibly none) is appended to the file
/// name. A path without a file name is returned as is.
pub fn normalize(path: &Path, effective_url: &str) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    if has_extension(path) {
        return path.to_path_buf();
    }
    let extension = url_extension(effective_url);
    if extension.is_empty() {
        return path.to_path_buf();
    }
    let mut file_name: OsString = name.to_os_string();
    file_name.push(&extension);
    path.with_file_name(file_name)
}

/// True when the last path component has a non-empty suffix.
///
/// `archive.tar.gz` and `a.b` have one; `README`, `.bashrc` and `name.` don't.
pub fn has_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| !suffix_of(&name.to_string_lossy()).is_empty())
        .unwrap_or(false)
}

/// Extension (with the leading dot) of the last segment of the URL's path.
///
/// Query and fragment never contribute. Returns an empty string when the path
/// has no extension or the URL is unusable.
pub fn url_extension(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => raw_path(url).to_string(),
    };
    // A trailing slash does not hide the last segment.
    let last = path.split('/').filter(|s| !s.is_empty()).last().unwrap_or("");
    suffix_of(last).to_string()
}

/// File name to save under when the user picked no destination: the last
/// segment of the URL path, or `download`.
pub fn file_name_from_url(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => raw_path(url).to_string(),
    };
    match path.split('/').filter(|s| !s.is_empty()).last() {
        Some(segment) if segment != "." && segment != ".." => segment.to_string(),
        _ => DEFAULT_FILE_NAME.to_string(),
    }
}

/// Path part of a string that is not an absolute URL.
fn raw_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let before_query = &url[..end];
    match before_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => before_query,
    }
}

/// Suffix of a single file name: from the last dot, unless that dot leads the
/// name or ends it.
fn suffix_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 && i + 1 < name.len() => &name[i..],
        _ => "",
    }
}
