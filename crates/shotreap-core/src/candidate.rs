use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The fixed naming pattern a file must match to be considered at all.
#[derive(Debug, Clone)]
pub struct WatchPattern {
    pub prefix: String,
    pub extension: String,
    pub marked_prefix: String,
}

impl WatchPattern {
    pub fn matches(&self, name: &str) -> bool {
        if name.starts_with(&self.marked_prefix) {
            return false;
        }
        name.starts_with(&self.prefix)
            && Path::new(name)
                .extension()
                .map_or(false, |ext| ext == self.extension.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
}

/// List the watched screenshots in `folder`, sorted by name descending.
/// Shot names embed a timestamp, so descending order puts the newest first.
pub fn list_candidates(folder: &Path, watch: &WatchPattern) -> io::Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for entry_result in fs::read_dir(folder)? {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping unreadable entry in {}: {}", folder.display(), err);
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };
        if !file_type.is_file() {
            continue;
        }

        // Non-UTF-8 names cannot match the ASCII watch pattern.
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if !watch.matches(&name) {
            continue;
        }

        candidates.push(Candidate {
            path: entry.path(),
            name,
        });
    }

    candidates.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn watch() -> WatchPattern {
        WatchPattern {
            prefix: "screenshot_".to_string(),
            extension: "png".to_string(),
            marked_prefix: "p_".to_string(),
        }
    }

    #[test]
    fn test_watch_pattern_accepts_watched_names() {
        let watch = watch();
        assert!(watch.matches("screenshot_2024-01-02_0001.png"));
        assert!(watch.matches("screenshot_.png"));
    }

    #[test]
    fn test_watch_pattern_rejects_other_names() {
        let watch = watch();
        assert!(!watch.matches("screenshot_0001.jpg"));
        assert!(!watch.matches("screenshot_0001.PNG"));
        assert!(!watch.matches("shot_0001.png"));
        assert!(!watch.matches("notes.txt"));
        assert!(!watch.matches("screenshot_0001png"));
    }

    #[test]
    fn test_watch_pattern_rejects_marked_names() {
        let watch = watch();
        assert!(!watch.matches("p_screenshot_0001.png"));
    }

    #[test]
    fn test_list_candidates_sorted_newest_first() {
        let tmp = tempdir().unwrap();
        for name in [
            "screenshot_0002.png",
            "screenshot_0010.png",
            "screenshot_0001.png",
        ] {
            File::create(tmp.path().join(name)).unwrap();
        }

        let candidates = list_candidates(tmp.path(), &watch()).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "screenshot_0010.png",
                "screenshot_0002.png",
                "screenshot_0001.png"
            ]
        );
    }

    #[test]
    fn test_list_candidates_ignores_marked_and_foreign_files() {
        let tmp = tempdir().unwrap();
        File::create(tmp.path().join("screenshot_0001.png")).unwrap();
        File::create(tmp.path().join("p_screenshot_0002.png")).unwrap();
        File::create(tmp.path().join("notes.txt")).unwrap();
        fs::create_dir(tmp.path().join("screenshot_dir.png")).unwrap();

        let candidates = list_candidates(tmp.path(), &watch()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "screenshot_0001.png");
    }

    #[test]
    fn test_list_candidates_missing_folder_is_an_error() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("gone");
        assert!(list_candidates(&missing, &watch()).is_err());
    }
}
