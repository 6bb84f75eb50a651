//! Get command: download one URL.

use anyhow::Result;
use indicatif::HumanBytes;
use std::path::{Path, PathBuf};
use urldl::destination;
use urldl::manager::DownloadManager;
use urldl::notice::Notice;
use urldl::resolver;

use crate::cli::render;

/// Save location used when the user gave none: the effective URL's file name
/// in the current directory.
pub(crate) fn default_destination(input_url: &str) -> PathBuf {
    PathBuf::from(destination::file_name_from_url(&resolver::resolve(input_url)))
}

/// Downloads `url` and shows the outcome. Returns whether it succeeded.
pub async fn run_get(manager: &DownloadManager, url: &str, output: Option<&Path>) -> Result<bool> {
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => default_destination(url),
    };
    let handle = manager.start(url, &destination)?;
    let result = render::drive(handle).await;
    render::show_notice(&Notice::from_result(&result));
    if let Ok(report) = &result {
        println!("Saved {} to {}", HumanBytes(report.bytes_written), report.path.display());
    }
    Ok(result.is_ok())
}
