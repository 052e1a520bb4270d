use crate::candidate;
use crate::context::RunContext;
use crate::disposal::{self, DisposalOutcome};
use crate::error::Error;
use crate::pairing::{self, ComparisonUnit};
use crate::progress::ProgressReporter;
use crate::similarity::SimilarityOracle;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// What one folder's run amounted to.
#[derive(Debug, Clone)]
pub struct FolderOutcome {
    pub folder: PathBuf,
    /// Comparison passes performed. A folder that never had two candidates
    /// completes with zero.
    pub passes: usize,
    /// Successful disposals during comparison passes.
    pub disposed: usize,
    /// Successful disposals during the final sequential sweep.
    pub swept: usize,
    pub interrupted: bool,
}

impl FolderOutcome {
    pub(crate) fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            passes: 0,
            disposed: 0,
            swept: 0,
            interrupted: false,
        }
    }

    pub fn total_disposed(&self) -> usize {
        self.disposed + self.swept
    }
}

/// Drives one folder from Scanning to Done.
///
/// Every pass re-lists the folder, pairs the candidates positionally,
/// compares the pairs on the folder's own worker pool and disposes the
/// later-named side of each duplicate. Passes repeat until one disposes
/// nothing, after which a single sequential sweep over adjacent candidates
/// catches stragglers the positional pairing kept apart.
pub struct FolderReaper<'a> {
    folder: PathBuf,
    ctx: &'a RunContext,
    oracle: SimilarityOracle,
    pool: ThreadPool,
    cancel: Arc<AtomicBool>,
}

impl<'a> FolderReaper<'a> {
    /// Builds the folder's long-lived comparison pool. The pool is reused
    /// by every pass and by the sweep.
    pub fn new(
        folder: PathBuf,
        ctx: &'a RunContext,
        cancel: Arc<AtomicBool>,
    ) -> Result<Self, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(ctx.compare_workers)
            .build()
            .map_err(|err| {
                Error::Other(format!(
                    "comparison pool for {}: {}",
                    folder.display(),
                    err
                ))
            })?;

        Ok(Self {
            oracle: SimilarityOracle::new(ctx.threshold),
            pool,
            folder,
            ctx,
            cancel,
        })
    }

    pub fn reap(&self, reporter: &dyn ProgressReporter) -> FolderOutcome {
        reporter.on_folder_start(&self.folder);
        info!("Reaping {}", self.folder.display());

        let mut outcome = FolderOutcome::new(&self.folder);
        self.run_passes(&mut outcome, reporter);

        reporter.on_folder_complete(&self.folder, &outcome);
        info!(
            "{}: done after {} pass(es), {} disposed ({} in the sweep)",
            self.folder.display(),
            outcome.passes,
            outcome.total_disposed(),
            outcome.swept,
        );
        outcome
    }

    fn run_passes(&self, outcome: &mut FolderOutcome, reporter: &dyn ProgressReporter) {
        loop {
            if self.cancelled() {
                outcome.interrupted = true;
                return;
            }

            let candidates = match candidate::list_candidates(&self.folder, &self.ctx.watch) {
                Ok(candidates) => candidates,
                Err(err) => {
                    warn!("Cannot list {}: {}", self.folder.display(), err);
                    return;
                }
            };

            if candidates.len() < 2 {
                debug!(
                    "{}: {} candidate(s), nothing to compare",
                    self.folder.display(),
                    candidates.len()
                );
                return;
            }

            let pass = outcome.passes + 1;
            debug!(
                "{}: pass {} over {} candidates",
                self.folder.display(),
                pass,
                candidates.len()
            );

            let units = pairing::partition(candidates);
            let targets: BTreeSet<PathBuf> = self.pool.install(|| {
                units
                    .par_iter()
                    .filter_map(|unit| match unit {
                        ComparisonUnit::Pair(keep, examine) => {
                            if self.oracle.are_similar(&keep.path, &examine.path) {
                                debug!("{} duplicates {}", examine.name, keep.name);
                                Some(examine.path.clone())
                            } else {
                                None
                            }
                        }
                        ComparisonUnit::Single(candidate) => {
                            debug!("{} sits out this pass", candidate.name);
                            None
                        }
                    })
                    .collect()
            });

            let mut disposed = 0usize;
            for target in &targets {
                if !matches!(
                    disposal::dispose(target, self.ctx.disposal, &self.ctx.watch.marked_prefix),
                    DisposalOutcome::Skipped
                ) {
                    disposed += 1;
                }
            }

            outcome.passes = pass;
            outcome.disposed += disposed;
            reporter.on_pass_complete(&self.folder, pass, disposed);
            info!(
                "{}: pass {} found {} duplicate(s), disposed {}",
                self.folder.display(),
                pass,
                targets.len(),
                disposed
            );

            if disposed == 0 {
                break;
            }
            thread::sleep(self.ctx.pass_delay);
        }

        self.sequential_sweep(outcome, reporter);
    }

    /// One strict adjacent walk over the surviving candidates. Runs exactly
    /// once, after a pass disposed nothing, and completes the folder whatever
    /// it finds. Disposals happen mid-walk; comparing against a file the walk
    /// just removed is routine and reads as distinct.
    fn sequential_sweep(&self, outcome: &mut FolderOutcome, reporter: &dyn ProgressReporter) {
        if self.cancelled() {
            outcome.interrupted = true;
            return;
        }
        reporter.on_sweep_start(&self.folder);

        let candidates = match candidate::list_candidates(&self.folder, &self.ctx.watch) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!("Cannot list {} for sweep: {}", self.folder.display(), err);
                return;
            }
        };
        debug!(
            "{}: sweeping {} candidate(s)",
            self.folder.display(),
            candidates.len()
        );

        for pair in candidates.windows(2) {
            if self.cancelled() {
                outcome.interrupted = true;
                return;
            }
            let (keep, examine) = (&pair[0], &pair[1]);
            if self.oracle.are_similar(&keep.path, &examine.path)
                && !matches!(
                    disposal::dispose(
                        &examine.path,
                        self.ctx.disposal,
                        &self.ctx.watch.marked_prefix
                    ),
                    DisposalOutcome::Skipped
                )
            {
                outcome.swept += 1;
            }
        }

        if outcome.swept > 0 {
            info!("{}: sweep disposed {}", self.folder.display(), outcome.swept);
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
