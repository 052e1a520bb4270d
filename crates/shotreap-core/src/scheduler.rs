use crate::context::RunContext;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::reaper::{FolderOutcome, FolderReaper};
use glob::Pattern;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One outcome per folder, in scheduling order.
    pub outcomes: Vec<FolderOutcome>,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn total_disposed(&self) -> usize {
        self.outcomes.iter().map(|o| o.disposed).sum()
    }

    pub fn total_swept(&self) -> usize {
        self.outcomes.iter().map(|o| o.swept).sum()
    }
}

/// Fans folders out over a bounded worker pool, newest folder first.
/// Folders are isolated: whatever happens inside one never touches another.
pub struct ReapScheduler {
    ctx: RunContext,
    cancel: Arc<AtomicBool>,
}

impl ReapScheduler {
    pub fn new(ctx: RunContext) -> Self {
        Self {
            ctx,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag checked between passes. Setting it stops new folders from
    /// being dispatched and lets in-flight work wind down.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        let folders = self.resolve_folders()?;
        info!(
            "Processing {} folder(s) under {}",
            folders.len(),
            self.ctx.root.display()
        );
        reporter.on_run_start(folders.len());

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.ctx.folder_workers)
            .build()
            .map_err(|err| Error::Other(format!("folder pool: {}", err)))?;

        let outcomes: Vec<FolderOutcome> = pool.install(|| {
            folders
                .par_iter()
                .map(|folder| self.reap_one(folder, reporter))
                .collect()
        });

        let summary = RunSummary {
            interrupted: self.cancel.load(Ordering::Relaxed)
                || outcomes.iter().any(|o| o.interrupted),
            outcomes,
        };
        reporter.on_run_complete(&summary);
        Ok(summary)
    }

    fn reap_one(&self, folder: &Path, reporter: &dyn ProgressReporter) -> FolderOutcome {
        if self.cancel.load(Ordering::Relaxed) {
            debug!("Skipping {} after cancellation", folder.display());
            let mut outcome = FolderOutcome::new(folder);
            outcome.interrupted = true;
            return outcome;
        }

        match FolderReaper::new(folder.to_path_buf(), &self.ctx, Arc::clone(&self.cancel)) {
            Ok(reaper) => reaper.reap(reporter),
            Err(err) => {
                error!("Cannot reap {}: {}", folder.display(), err);
                FolderOutcome::new(folder)
            }
        }
    }

    fn resolve_folders(&self) -> Result<Vec<PathBuf>, Error> {
        if let Some(name) = &self.ctx.target_folder {
            let target = self.ctx.root.join(name);
            if !target.is_dir() {
                return Err(Error::InvalidTarget(target));
            }
            return Ok(vec![target]);
        }
        discover_folders(&self.ctx.root, &self.ctx.exclude_folders)
    }
}

/// Immediate subdirectories of `root`, newest creation time first, minus
/// those whose name matches an exclusion glob.
pub fn discover_folders(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, Error> {
    let patterns: Vec<Pattern> = exclude
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                error!("Invalid exclude pattern '{}': {}", glob, err);
                None
            }
        })
        .collect();

    let mut folders = Vec::new();
    for entry_result in fs::read_dir(root)? {
        let entry = entry_result?;

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if patterns.iter().any(|pattern| pattern.matches(&name)) {
            debug!("Excluding folder {}", entry.path().display());
            continue;
        }

        folders.push(entry.path());
    }

    folders.sort_by_key(|folder| Reverse(folder_timestamp(folder)));
    Ok(folders)
}

/// Creation time of `path`, falling back to mtime on filesystems without
/// birth times.
pub fn folder_timestamp(path: &Path) -> SystemTime {
    fs::metadata(path)
        .map(|meta| {
            meta.created()
                .or_else(|_| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        })
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
