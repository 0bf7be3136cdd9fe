//! Re-entrancy guard for export actions.
//!
//! A second export requested while one is outstanding is ignored rather
//! than queued.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ExportGuard {
    in_progress: Arc<AtomicBool>,
}

/// Held while an export runs; clears the flag when dropped.
#[derive(Debug)]
pub struct ExportTicket {
    in_progress: Arc<AtomicBool>,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.in_progress.store(false, Ordering::Release);
    }
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Claim the guard, or `None` if an export is already outstanding.
    pub fn try_begin(&self) -> Option<ExportTicket> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportTicket {
                in_progress: Arc::clone(&self.in_progress),
            })
    }

    /// Run `export` unless another export is outstanding.
    ///
    /// Returns `None` without polling `export` when the guard is taken.
    pub async fn run<F, T>(&self, export: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let Some(_ticket) = self.try_begin() else {
            debug!("export already in progress, ignoring request");
            return None;
        };
        Some(export.await)
    }
}
