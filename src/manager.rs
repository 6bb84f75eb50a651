// src/manager.rs

use crate::config::AppConfig;
use crate::destination;
use crate::downloader::{self, FetchError};
use crate::models::{DownloadEvent, DownloadReport, DownloadRequest, SessionState};
use crate::progress::ProgressIndicator;
use crate::resolver;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("a download is already in progress")]
    Busy,
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Resolves the effective URL and final destination for one download.
pub fn prepare(input_url: &str, destination: &Path) -> DownloadRequest {
    let url = resolver::resolve(input_url);
    let destination = destination::normalize(destination, &url);
    tracing::debug!("prepared {} -> {}", url, destination.display());
    DownloadRequest {
        input_url: input_url.to_string(),
        url,
        destination,
    }
}

/// Clears the in-progress flag when the transfer task ends, panics included.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs at most one download at a time on a background task and exposes the
/// progress indicator it drives.
pub struct DownloadManager {
    http_client: Client,
    block_size: u64,
    reset_progress_on_failure: bool,
    in_progress: Arc<AtomicBool>,
    indicator: Arc<ProgressIndicator>,
}

impl DownloadManager {
    pub fn new(config: &AppConfig) -> Result<Self, ManagerError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Uses an already built client; `user_agent` and `connect_timeout_secs`
    /// from `config` are ignored.
    pub fn with_client(http_client: Client, config: &AppConfig) -> Self {
        Self {
            http_client,
            block_size: config.effective_block_size(),
            reset_progress_on_failure: config.reset_progress_on_failure,
            in_progress: Arc::new(AtomicBool::new(false)),
            indicator: Arc::new(ProgressIndicator::new()),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.in_progress.load(Ordering::SeqCst) {
            SessionState::InProgress
        } else {
            SessionState::Idle
        }
    }

    /// Last value shown on the progress indicator.
    pub fn progress(&self) -> u8 {
        self.indicator.value()
    }

    /// Starts a download on a background task.
    ///
    /// Fails with [`ManagerError::Busy`] while another download is running.
    /// Must be called from within a tokio runtime.
    pub fn start(&self, input_url: &str, destination: &Path) -> Result<DownloadHandle, ManagerError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("rejected {}: a download is already in progress", input_url);
            return Err(ManagerError::Busy);
        }
        let guard = InFlight(self.in_progress.clone());

        let request = prepare(input_url, destination);
        let (tx, rx) = mpsc::unbounded_channel();

        let http_client = self.http_client.clone();
        let indicator = self.indicator.clone();
        let block_size = self.block_size;
        let reset_on_failure = self.reset_progress_on_failure;
        let url = request.url.clone();
        let dest = request.destination.clone();

        let task = tokio::spawn(async move {
            let result = downloader::fetch(&http_client, &url, &dest, block_size, |progress| {
                let percent = indicator.apply(&progress);
                let _ = tx.send(DownloadEvent::Progress { progress, percent });
            })
            .await;

            let event = match &result {
                Ok(report) => {
                    tracing::info!("download of {} completed", report.url);
                    indicator.reset();
                    DownloadEvent::Completed(report.clone())
                }
                Err(e) => {
                    tracing::warn!("download of {} failed: {}", url, e);
                    if reset_on_failure {
                        indicator.reset();
                    }
                    DownloadEvent::Failed(e.clone())
                }
            };
            // Idle before anyone sees the terminal event.
            drop(guard);
            let _ = tx.send(event);
            result
        });

        Ok(DownloadHandle {
            request,
            events: rx,
            task,
        })
    }

    /// Starts a download and waits for it to finish.
    pub async fn download(
        &self,
        input_url: &str,
        destination: &Path,
    ) -> Result<DownloadReport, ManagerError> {
        let handle = self.start(input_url, destination)?;
        Ok(handle.wait().await?)
    }
}

/// A running download: its resolved request, its event stream and its task.
pub struct DownloadHandle {
    request: DownloadRequest,
    events: UnboundedReceiver<DownloadEvent>,
    task: JoinHandle<Result<DownloadReport, FetchError>>,
}

impl DownloadHandle {
    pub fn request(&self) -> &DownloadRequest {
        &self.request
    }

    /// Next progress or terminal event; `None` once the task is gone.
    pub async fn next_event(&mut self) -> Option<DownloadEvent> {
        self.events.recv().await
    }

    /// Waits for the transfer to end and returns its outcome.
    ///
    /// Unread events are discarded and no more are buffered while waiting.
    pub async fn wait(self) -> Result<DownloadReport, FetchError> {
        let DownloadHandle { events, task, .. } = self;
        drop(events);
        match task.await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Transfer(format!("download task ended abnormally: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn prepare_unwraps_and_normalizes() {
        let req = prepare(
            "https://example.com/x?mediaurl=https://cdn.example.com/file.bin",
            Path::new("/tmp/out"),
        );
        assert_eq!(req.url, "https://cdn.example.com/file.bin");
        assert_eq!(req.destination, PathBuf::from("/tmp/out.bin"));
    }

    #[test]
    fn prepare_keeps_explicit_extension() {
        let req = prepare("https://example.com/file.txt", Path::new("/tmp/report.txt"));
        assert_eq!(req.url, "https://example.com/file.txt");
        assert_eq!(req.destination, PathBuf::from("/tmp/report.txt"));
    }

    #[test]
    fn in_flight_guard_clears_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        drop(InFlight(flag.clone()));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn wait_stops_buffering_events() {
        let (tx, rx) = mpsc::unbounded_channel::<DownloadEvent>();
        let task = tokio::spawn(async move {
            // Finishes only once nobody listens anymore.
            tx.closed().await;
            Err::<DownloadReport, _>(FetchError::Transfer("receiver gone".into()))
        });
        let handle = DownloadHandle {
            request: prepare("https://example.com/a.bin", Path::new("/tmp/a")),
            events: rx,
            task,
        };
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle.wait())
            .await
            .expect("wait released the event receiver");
        assert_eq!(result, Err(FetchError::Transfer("receiver gone".into())));
    }

    #[tokio::test]
    async fn failed_start_returns_to_idle() {
        let manager = DownloadManager::new(&AppConfig::default()).unwrap();
        assert_eq!(manager.state(), SessionState::Idle);
        let dir = tempfile::tempdir().unwrap();
        let err = manager
            .download("not a url", &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::Fetch(FetchError::Transfer(_))));
        assert_eq!(manager.state(), SessionState::Idle);
        assert_eq!(manager.progress(), 0);
    }
}
