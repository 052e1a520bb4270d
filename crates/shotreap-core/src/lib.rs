pub mod candidate;
pub mod config;
pub mod context;
pub mod disposal;
pub mod error;
pub mod pairing;
pub mod progress;
pub mod reaper;
pub mod scheduler;
pub mod similarity;

pub use config::ReapConfig;
pub use context::RunContext;
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use reaper::{FolderOutcome, FolderReaper};
pub use scheduler::{ReapScheduler, RunSummary};
pub use similarity::SimilarityOracle;
