//! User-facing outcome messages.

use std::fmt;

use crate::downloader::FetchError;
use crate::models::DownloadReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A modal-style message shown once a download ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn completed() -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Download Completed".to_string(),
            message: "The Download Completed Successfully".to_string(),
        }
    }

    pub fn failed(err: &FetchError) -> Self {
        let message = match err {
            FetchError::Network(desc) => format!("Failed to download the file. Error: {desc}"),
            FetchError::Transfer(desc) => format!("An error occurred: {desc}"),
        };
        Self {
            level: NoticeLevel::Warning,
            title: "Download Error".to_string(),
            message,
        }
    }

    pub fn from_result(result: &Result<DownloadReport, FetchError>) -> Self {
        match result {
            Ok(_) => Self::completed(),
            Err(err) => Self::failed(err),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
