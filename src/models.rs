// src/models.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::downloader::FetchError;

/// The resolved inputs of a single download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// What the user typed.
    pub input_url: String,
    /// The URL actually fetched, after `mediaurl` unwrapping.
    pub url: String,
    /// Where the bytes go, after extension inference.
    pub destination: PathBuf,
}

/// One progress notification from the transfer.
///
/// Mirrors the classic `(block number, block size, total size)` report hook:
/// `block_index * block_size` is the number of bytes read, rounded up to whole
/// blocks, so it can overshoot `total_size` on the last block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProgress {
    pub block_index: u64,
    pub block_size: u64,
    /// Announced body length in bytes, `-1` when the server sent none.
    pub total_size: i64,
}

impl TransferProgress {
    /// Bytes read as the report hook sees them (saturating).
    pub fn bytes_read(&self) -> u64 {
        self.block_index.saturating_mul(self.block_size)
    }

    /// Returns the total size if the server announced one.
    pub fn known_total(&self) -> Option<u64> {
        u64::try_from(self.total_size).ok().filter(|t| *t > 0)
    }
}

/// Returned by a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub url: String,
    pub path: PathBuf,
    pub bytes_written: u64,
    pub total_size: Option<u64>,
}

/// Whether a download is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    InProgress,
}

/// What the background transfer publishes to whoever is driving the UI.
#[derive(Debug)]
pub enum DownloadEvent {
    Progress {
        progress: TransferProgress,
        /// Projected percentage, `None` while the total size is unknown.
        percent: Option<u8>,
    },
    Completed(DownloadReport),
    Failed(FetchError),
}

impl DownloadEvent {
    /// Terminal events end the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DownloadEvent::Progress { .. })
    }
}
