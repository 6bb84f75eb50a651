//! Shell command: prompt for downloads until the user stops.
//!
//! Each round asks for a URL and a save location. An empty save location
//! behaves like a cancelled save dialog and falls back to the URL's file name.
//! Failures are reported and the prompt comes back.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use urldl::manager::DownloadManager;
use urldl::notice::Notice;

use super::get::default_destination;
use crate::cli::render;

pub async fn run_shell(manager: &DownloadManager) -> Result<()> {
    run_shell_with(manager, BufReader::new(tokio::io::stdin())).await
}

pub(crate) async fn run_shell_with<R>(manager: &DownloadManager, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let url = match prompt(&mut lines, "URL: ").await? {
            Some(line) if !line.trim().is_empty() => line.trim().to_string(),
            _ => break,
        };
        let location = prompt(&mut lines, "Save as: ").await?.unwrap_or_default();
        let location = location.trim();
        let destination = if location.is_empty() {
            default_destination(&url)
        } else {
            PathBuf::from(location)
        };

        match manager.start(&url, &destination) {
            Ok(handle) => {
                let result = render::drive(handle).await;
                render::show_notice(&Notice::from_result(&result));
            }
            Err(e) => eprintln!("urldl: {e}"),
        }
    }
    Ok(())
}

async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}
