//! Terminal rendering: the progress bar and outcome notices.

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use urldl::downloader::FetchError;
use urldl::manager::DownloadHandle;
use urldl::models::{DownloadEvent, DownloadReport};
use urldl::notice::{Notice, NoticeLevel};

fn make_progress_bar(name: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╌");
    bar.set_style(style);
    bar.set_message(name.to_string());
    bar
}

/// Drives a progress bar from the handle's events until the download ends.
///
/// The bar is cleared on success and left at its last value on failure.
pub async fn drive(mut handle: DownloadHandle) -> Result<DownloadReport, FetchError> {
    let name = handle.request().destination.display().to_string();
    let bar = make_progress_bar(&name);

    while let Some(event) = handle.next_event().await {
        match event {
            DownloadEvent::Progress {
                percent: Some(percent),
                ..
            } => bar.set_position(u64::from(percent)),
            DownloadEvent::Progress {
                progress,
                percent: None,
            } => {
                bar.set_message(format!("{} ({})", name, HumanBytes(progress.bytes_read())));
                bar.tick();
            }
            DownloadEvent::Completed(_) | DownloadEvent::Failed(_) => break,
        }
    }

    let result = handle.wait().await;
    match &result {
        Ok(_) => bar.finish_and_clear(),
        Err(_) => bar.abandon(),
    }
    result
}

pub fn show_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{notice}"),
        NoticeLevel::Warning => eprintln!("{notice}"),
    }
}
