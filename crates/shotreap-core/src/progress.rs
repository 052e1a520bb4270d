use crate::reaper::FolderOutcome;
use crate::scheduler::RunSummary;
use std::path::Path;

/// Trait for reporting reap progress.
///
/// The CLI implements this with indicatif; tests run silent.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_run_start(&self, _folder_count: usize) {}
    fn on_folder_start(&self, _folder: &Path) {}
    fn on_pass_complete(&self, _folder: &Path, _pass: usize, _disposed: usize) {}
    fn on_sweep_start(&self, _folder: &Path) {}
    fn on_folder_complete(&self, _folder: &Path, _outcome: &FolderOutcome) {}
    fn on_run_complete(&self, _summary: &RunSummary) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
