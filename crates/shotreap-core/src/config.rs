use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReapConfig {
    /// Directory whose subfolders are reaped. Defaults to the platform
    /// download directory when unset.
    pub root_dir: Option<PathBuf>,
    pub watch_prefix: String,
    pub watch_extension: String,
    /// Reserved prefix applied by mark-mode disposal. Files carrying it are
    /// never candidates again.
    pub marked_prefix: String,
    /// Glob patterns naming subfolders that belong to other pipelines.
    pub exclude_folders: Vec<String>,
    /// Two shots count as duplicates when their hash distance is strictly
    /// below this.
    pub threshold: u32,
    pub folder_workers: usize,
    pub compare_workers: usize,
    pub pass_delay_ms: u64,
}

impl Default for ReapConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            watch_prefix: "screenshot_".to_string(),
            watch_extension: "png".to_string(),
            marked_prefix: "p_".to_string(),
            exclude_folders: vec!["*tm_daily_ingest*".to_string()],
            threshold: 1,
            folder_workers: 4,
            compare_workers: num_cpus::get(),
            pass_delay_ms: 1000,
        }
    }
}

impl ReapConfig {
    pub fn resolved_root(&self) -> PathBuf {
        if let Some(dir) = &self.root_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn load_configuration() -> Result<ReapConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Shotreap").required(false))
        .build()?;
    builder.try_deserialize::<ReapConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_watched_pattern() {
        let config = ReapConfig::default();
        assert_eq!(config.watch_prefix, "screenshot_");
        assert_eq!(config.watch_extension, "png");
        assert_eq!(config.marked_prefix, "p_");
        assert_eq!(config.threshold, 1);
        assert_eq!(config.folder_workers, 4);
        assert_eq!(config.pass_delay_ms, 1000);
        assert!(config.compare_workers >= 1);
    }

    #[test]
    fn test_default_excludes_ingest_folders() {
        let config = ReapConfig::default();
        assert_eq!(config.exclude_folders, vec!["*tm_daily_ingest*".to_string()]);
    }

    #[test]
    fn test_resolved_root_prefers_configured_dir() {
        let config = ReapConfig {
            root_dir: Some(PathBuf::from("/srv/shots")),
            ..ReapConfig::default()
        };
        assert_eq!(config.resolved_root(), PathBuf::from("/srv/shots"));
    }
}
