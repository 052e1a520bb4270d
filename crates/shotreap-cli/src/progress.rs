use indicatif::{ProgressBar, ProgressStyle};
use shotreap_core::{FolderOutcome, ProgressReporter, RunSummary};
use std::path::Path;
use std::sync::Mutex;

/// CLI progress reporter using an indicatif progress bar.
///
/// One bar tracks folders; per-pass activity scrolls through its message.
/// Folders are reaped concurrently, so messages from different folders
/// interleave. That is fine for a glanceable status line.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

fn folder_label(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

impl ProgressReporter for CliReporter {
    fn on_run_start(&self, folder_count: usize) {
        let pb = ProgressBar::new(folder_count as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Reaping [{bar:30.cyan/dim}] {pos}/{len} folders {msg}",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn on_folder_start(&self, folder: &Path) {
        self.with_bar(|pb| pb.set_message(folder_label(folder)));
    }

    fn on_pass_complete(&self, folder: &Path, pass: usize, disposed: usize) {
        self.with_bar(|pb| {
            pb.set_message(format!(
                "{}: pass {} disposed {}",
                folder_label(folder),
                pass,
                disposed
            ));
        });
    }

    fn on_sweep_start(&self, folder: &Path) {
        self.with_bar(|pb| pb.set_message(format!("{}: final sweep", folder_label(folder))));
    }

    fn on_folder_complete(&self, folder: &Path, outcome: &FolderOutcome) {
        self.with_bar(|pb| {
            pb.println(format!(
                "  \x1b[32m✓\x1b[0m {}: {} disposed in {} pass(es)",
                folder_label(folder),
                outcome.total_disposed(),
                outcome.passes
            ));
            pb.inc(1);
        });
    }

    fn on_run_complete(&self, _summary: &RunSummary) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}
