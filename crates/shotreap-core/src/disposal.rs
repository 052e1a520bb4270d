use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happens to the losing side of a duplicate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalMode {
    /// Move to the system trash. Recoverable, never a direct unlink.
    Destructive,
    /// Rename in place with the reserved marker prefix. Used to verify a
    /// run without losing anything; marked files drop out of future scans.
    Mark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisposalOutcome {
    Trashed,
    Marked(PathBuf),
    /// The disposal failed and was logged. The file, if it still exists,
    /// stays eligible for later passes.
    Skipped,
}

/// Dispose of one duplicate. Failures never propagate: a disposal that
/// cannot be carried out is a logged no-op.
pub fn dispose(path: &Path, mode: DisposalMode, marked_prefix: &str) -> DisposalOutcome {
    if !path.exists() {
        warn!("'{}' no longer exists, skipping disposal", path.display());
        return DisposalOutcome::Skipped;
    }

    match mode {
        DisposalMode::Destructive => match trash::delete(path) {
            Ok(()) => {
                info!("Trashed '{}'", path.display());
                DisposalOutcome::Trashed
            }
            Err(err) => {
                warn!("Failed to trash '{}': {}", path.display(), err);
                DisposalOutcome::Skipped
            }
        },
        DisposalMode::Mark => {
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => {
                    warn!("'{}' has no file name, skipping disposal", path.display());
                    return DisposalOutcome::Skipped;
                }
            };
            let marked = path.with_file_name(format!("{}{}", marked_prefix, name));

            match fs::rename(path, &marked) {
                Ok(()) => {
                    info!("Marked '{}' as '{}'", path.display(), marked.display());
                    DisposalOutcome::Marked(marked)
                }
                Err(err) => {
                    warn!("Failed to mark '{}': {}", path.display(), err);
                    DisposalOutcome::Skipped
                }
            }
        }
    }
}
