use dashmap::DashMap;
use image_hasher::{HashAlg, Hasher, HasherConfig, ImageHash};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Answers "do these two shots look the same?" with an 8x8 average-intensity
/// perceptual hash. Two candidates are duplicates when the Hamming distance
/// between their hashes is strictly below the threshold.
///
/// The oracle never fails: any problem hashing either side (vanished file,
/// truncated or foreign bytes, permission trouble) is logged and collapses
/// the verdict to "distinct", so a broken file can only ever be kept.
pub struct SimilarityOracle {
    hasher: Hasher,
    threshold: u32,
    cache: DashMap<PathBuf, (SystemTime, ImageHash)>,
}

impl SimilarityOracle {
    pub fn new(threshold: u32) -> Self {
        let hasher = HasherConfig::new()
            .hash_alg(HashAlg::Mean)
            .hash_size(8, 8)
            .to_hasher();
        Self {
            hasher,
            threshold,
            cache: DashMap::new(),
        }
    }

    pub fn are_similar(&self, a: &Path, b: &Path) -> bool {
        match self.distance(a, b) {
            Some(dist) => {
                debug!(
                    "{} vs {}: distance {} (threshold {})",
                    a.display(),
                    b.display(),
                    dist,
                    self.threshold
                );
                dist < self.threshold
            }
            None => false,
        }
    }

    /// Raw hash distance, when both sides can be hashed.
    pub fn distance(&self, a: &Path, b: &Path) -> Option<u32> {
        let hash_a = self.hash_of(a)?;
        let hash_b = self.hash_of(b)?;
        Some(hash_a.dist(&hash_b))
    }

    fn hash_of(&self, path: &Path) -> Option<ImageHash> {
        let modified = match fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(time) => time,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} vanished before hashing", path.display());
                return None;
            }
            Err(err) => {
                warn!("Cannot stat {}: {}", path.display(), err);
                return None;
            }
        };

        if let Some(entry) = self.cache.get(path) {
            let (stamp, hash) = entry.value();
            if *stamp == modified {
                return Some(hash.clone());
            }
        }

        let image = match image::open(path) {
            Ok(image) => image,
            Err(err) => {
                warn!("Cannot decode {}: {}", path.display(), err);
                return None;
            }
        };

        let hash = self.hasher.hash_image(&image);
        self.cache.insert(path.to_path_buf(), (modified, hash.clone()));
        Some(hash)
    }
}
