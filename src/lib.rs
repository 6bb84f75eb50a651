pub mod config;
pub mod destination;
pub mod downloader;
pub mod logging;
pub mod manager;
pub mod models;
pub mod notice;
pub mod progress;
pub mod resolver;

/// Convenient type alias exposing common structs.
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::downloader::{fetch, FetchError};
    pub use crate::manager::{DownloadHandle, DownloadManager, ManagerError};
    pub use crate::models::{DownloadEvent, DownloadReport, DownloadRequest, SessionState, TransferProgress};
    pub use crate::notice::{Notice, NoticeLevel};
    pub use crate::progress::{project, ProgressIndicator};
    pub use crate::resolver::resolve;
}
