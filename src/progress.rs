//! Progress projection: block reports to a 0..=100 indicator value.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::models::TransferProgress;

/// Projects a `(block_index, block_size, total_size)` report to a percentage.
///
/// Returns `None` when the total size is unknown (`total_size <= 0`); the
/// indicator should be left alone in that case. The result never exceeds 100,
/// and is exactly 100 once `block_index * block_size >= total_size`.
pub fn project(block_index: u64, block_size: u64, total_size: i64) -> Option<u8> {
    if total_size <= 0 {
        return None;
    }
    let total = total_size as u64;
    let read = block_index.saturating_mul(block_size);
    if read >= total {
        return Some(100);
    }
    let percent = (u128::from(read) * 100 / u128::from(total)).min(100);
    Some(percent as u8)
}

/// Shared progress indicator value, safe to update from the transfer task
/// while the front end reads it.
#[derive(Debug, Default)]
pub struct ProgressIndicator {
    value: AtomicU8,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value in `0..=100`.
    pub fn value(&self) -> u8 {
        self.value.load(Ordering::SeqCst)
    }

    pub fn set(&self, percent: u8) {
        self.value.store(percent.min(100), Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.set(0);
    }

    /// Projects `progress` and stores the result if there is one.
    pub fn apply(&self, progress: &TransferProgress) -> Option<u8> {
        let percent = project(progress.block_index, progress.block_size, progress.total_size)?;
        self.set(percent);
        Some(percent)
    }
}
