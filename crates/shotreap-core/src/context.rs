use crate::candidate::WatchPattern;
use crate::config::ReapConfig;
use crate::disposal::DisposalMode;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a run needs to know, resolved up front and threaded through
/// the scheduler and the per-folder reapers. There is no ambient state.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub root: PathBuf,
    /// When set, only this subfolder of `root` is processed.
    pub target_folder: Option<String>,
    pub exclude_folders: Vec<String>,
    pub watch: WatchPattern,
    pub threshold: u32,
    pub disposal: DisposalMode,
    pub folder_workers: usize,
    pub compare_workers: usize,
    pub pass_delay: Duration,
}

impl RunContext {
    pub fn from_config(config: &ReapConfig) -> Self {
        Self {
            root: config.resolved_root(),
            target_folder: None,
            exclude_folders: config.exclude_folders.clone(),
            watch: WatchPattern {
                prefix: config.watch_prefix.clone(),
                extension: config.watch_extension.clone(),
                marked_prefix: config.marked_prefix.clone(),
            },
            threshold: config.threshold,
            disposal: DisposalMode::Destructive,
            folder_workers: config.folder_workers.max(1),
            compare_workers: config.compare_workers.max(1),
            pass_delay: Duration::from_millis(config.pass_delay_ms),
        }
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }

    pub fn with_target(mut self, folder: &str) -> Self {
        self.target_folder = Some(folder.to_string());
        self
    }

    pub fn with_disposal(mut self, mode: DisposalMode) -> Self {
        self.disposal = mode;
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_folder_workers(mut self, workers: usize) -> Self {
        self.folder_workers = workers.max(1);
        self
    }

    pub fn with_pass_delay(mut self, delay: Duration) -> Self {
        self.pass_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_carries_the_watch_pattern() {
        let config = ReapConfig {
            root_dir: Some(PathBuf::from("/shots")),
            ..ReapConfig::default()
        };
        let ctx = RunContext::from_config(&config);
        assert_eq!(ctx.root, PathBuf::from("/shots"));
        assert_eq!(ctx.watch.prefix, "screenshot_");
        assert_eq!(ctx.watch.marked_prefix, "p_");
        assert_eq!(ctx.disposal, DisposalMode::Destructive);
        assert_eq!(ctx.pass_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_worker_counts_never_drop_to_zero() {
        let config = ReapConfig {
            folder_workers: 0,
            compare_workers: 0,
            ..ReapConfig::default()
        };
        let ctx = RunContext::from_config(&config).with_folder_workers(0);
        assert_eq!(ctx.folder_workers, 1);
        assert_eq!(ctx.compare_workers, 1);
    }
}
