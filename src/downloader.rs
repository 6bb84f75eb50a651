use std::error::Error as StdError;
use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::models::{DownloadReport, TransferProgress};

/// Block size the classic retrieve hook reports with.
pub const DEFAULT_BLOCK_SIZE: u64 = 8192;

/// Why a transfer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Protocol, connection or HTTP-layer failure.
    #[error("network error: {0}")]
    Network(String),
    /// Anything else: filesystem, permissions, unusable input.
    #[error("transfer error: {0}")]
    Transfer(String),
}

impl FetchError {
    /// Human-readable description without the category prefix.
    pub fn description(&self) -> &str {
        match self {
            FetchError::Network(desc) | FetchError::Transfer(desc) => desc,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    fn io(err: std::io::Error, path: &Path) -> Self {
        FetchError::Transfer(format!("{}: {}", err, path.display()))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let desc = describe(&err);
        // Builder errors mean the request could not even be formed.
        if err.is_builder() {
            FetchError::Transfer(desc)
        } else {
            FetchError::Network(desc)
        }
    }
}

/// Joins an error and its sources, `outer: inner: root`.
fn describe(err: &dyn StdError) -> String {
    let mut desc = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !desc.contains(&text) {
            desc.push_str(": ");
            desc.push_str(&text);
        }
        source = cause.source();
    }
    desc
}

/// Fetches `url` into `destination` with a single GET.
///
/// `on_progress` is called once before the first chunk (block 0) and after
/// every chunk written, with the block index rounded up to whole `block_size`
/// blocks. The destination is created only after the server answered with a
/// success status; parent directories are not created. A partial file is left
/// behind if the body fails midway.
pub async fn fetch<F>(
    client: &Client,
    url: &str,
    destination: &Path,
    block_size: u64,
    mut on_progress: F,
) -> Result<DownloadReport, FetchError>
where
    F: FnMut(TransferProgress),
{
    let parsed =
        Url::parse(url).map_err(|_| FetchError::Transfer(format!("unknown url type: {url:?}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::Network(format!(
            "unknown url type: {}",
            parsed.scheme()
        )));
    }
    let block_size = block_size.max(1);

    tracing::info!("fetching {} -> {}", url, destination.display());
    let resp = client.get(parsed).send().await?.error_for_status()?;

    let announced = resp.content_length();
    let total_size = announced
        .and_then(|n| i64::try_from(n).ok())
        .unwrap_or(-1);
    tracing::debug!("status {}, content length {:?}", resp.status(), announced);

    let mut file = File::create(destination)
        .await
        .map_err(|e| FetchError::io(e, destination))?;

    on_progress(TransferProgress {
        block_index: 0,
        block_size,
        total_size,
    });

    let mut written: u64 = 0;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        if bytes.is_empty() {
            continue;
        }
        file.write_all(&bytes)
            .await
            .map_err(|e| FetchError::io(e, destination))?;
        written += bytes.len() as u64;
        on_progress(TransferProgress {
            block_index: written.div_ceil(block_size),
            block_size,
            total_size,
        });
    }
    file.flush()
        .await
        .map_err(|e| FetchError::io(e, destination))?;

    if let Some(expected) = announced {
        if written < expected {
            return Err(FetchError::Network(format!(
                "retrieval incomplete: got only {} out of {} bytes",
                written, expected
            )));
        }
    }

    tracing::info!("wrote {} bytes to {}", written, destination.display());
    Ok(DownloadReport {
        url: url.to_string(),
        path: destination.to_path_buf(),
        bytes_written: written,
        total_size: announced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_drops_prefix() {
        let err = FetchError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");
        assert_eq!(err.description(), "connection refused");
        assert!(err.is_network());
        assert!(!FetchError::Transfer("x".into()).is_network());
    }

    #[test]
    fn describe_walks_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "root cause");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        assert_eq!(describe(&outer), "root cause");
    }

    #[tokio::test]
    async fn rejects_unparseable_url_as_transfer_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let err = fetch(&Client::new(), "not a url", &dest, DEFAULT_BLOCK_SIZE, |_| {})
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Transfer("unknown url type: \"not a url\"".into()));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn rejects_unsupported_scheme_as_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let err = fetch(&Client::new(), "ftp://example.com/a.bin", &dest, 512, |_| {})
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Network("unknown url type: ftp".into()));
    }
}
