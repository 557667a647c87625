//! Artifact loading - report table and attribution bundle, read once per process

pub mod table;
pub mod bundle;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AttributionBundle, ReportDataset};

/// Locations of the two input artifacts
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub report_data: PathBuf,
    pub attribution: PathBuf,
}

impl From<&Config> for ArtifactPaths {
    fn from(config: &Config) -> Self {
        Self {
            report_data: config.report_data_path.clone(),
            attribution: config.attribution_path.clone(),
        }
    }
}

/// Identity of a loaded artifact file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactFingerprint {
    pub path: String,
    pub sha256: String,
    pub bytes: usize,
}

impl ArtifactFingerprint {
    fn of(path: &Path, content: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            sha256: format!("{:x}", Sha256::digest(content)),
            bytes: content.len(),
        }
    }
}

/// Everything the dashboard renders from
#[derive(Debug)]
pub struct Artifacts {
    pub dataset: ReportDataset,
    pub attribution: AttributionBundle,
    pub report_fingerprint: ArtifactFingerprint,
    pub attribution_fingerprint: ArtifactFingerprint,
    pub loaded_at: DateTime<Utc>,
}

/// Read and validate both artifacts from disk. Either both load or the call fails.
pub fn load_artifacts(paths: &ArtifactPaths) -> AppResult<Artifacts> {
    let start = Instant::now();

    let report_bytes = read_artifact(&paths.report_data)?;
    let report_text = std::str::from_utf8(&report_bytes)
        .map_err(|e| AppError::missing_artifact(&paths.report_data, e.to_string()))?;
    let dataset = table::parse_report(report_text)
        .map_err(|reason| AppError::missing_artifact(&paths.report_data, reason))?;

    let bundle_bytes = read_artifact(&paths.attribution)?;
    let attribution = bundle::parse_bundle(&bundle_bytes, dataset.len())
        .map_err(|reason| AppError::missing_artifact(&paths.attribution, reason))?;

    tracing::info!(
        "Loaded {} customers and {} attribution features in {:.2?}",
        dataset.len(),
        attribution.feature_names.len(),
        start.elapsed()
    );

    Ok(Artifacts {
        report_fingerprint: ArtifactFingerprint::of(&paths.report_data, &report_bytes),
        attribution_fingerprint: ArtifactFingerprint::of(&paths.attribution, &bundle_bytes),
        dataset,
        attribution,
        loaded_at: Utc::now(),
    })
}

fn read_artifact(path: &Path) -> AppResult<Vec<u8>> {
    tracing::debug!("Reading artifact {}", path.display());
    std::fs::read(path).map_err(|e| AppError::missing_artifact(path, e.to_string()))
}

/// Call-once holder for the loaded artifacts.
///
/// The first successful `load` reads disk; later calls hand out the same
/// `Arc`. There is no invalidation: a restart picks up new files. A failed
/// load is not cached.
#[derive(Debug)]
pub struct ArtifactCache {
    paths: ArtifactPaths,
    cell: OnceCell<Arc<Artifacts>>,
    disk_loads: AtomicUsize,
}

impl ArtifactCache {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            cell: OnceCell::new(),
            disk_loads: AtomicUsize::new(0),
        }
    }

    pub fn load(&self) -> AppResult<Arc<Artifacts>> {
        self.cell
            .get_or_try_init(|| {
                self.disk_loads.fetch_add(1, Ordering::Relaxed);
                load_artifacts(&self.paths).map(Arc::new)
            })
            .cloned()
    }

    /// Number of times the cache went to disk
    pub fn disk_loads(&self) -> usize {
        self.disk_loads.load(Ordering::Relaxed)
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::write_artifacts;
    use super::*;
    use std::fs;

    #[test]
    fn test_load_artifacts() {
        let (_dir, paths) = write_artifacts();
        let artifacts = load_artifacts(&paths).unwrap();

        assert_eq!(artifacts.dataset.len(), 12);
        assert_eq!(artifacts.attribution.rows(), 12);
        assert_eq!(artifacts.report_fingerprint.sha256.len(), 64);
        assert_ne!(artifacts.report_fingerprint.sha256, artifacts.attribution_fingerprint.sha256);
    }

    #[test]
    fn test_missing_report_file() {
        let (_dir, mut paths) = write_artifacts();
        paths.report_data = paths.report_data.with_file_name("absent.csv");

        match load_artifacts(&paths) {
            Err(AppError::MissingArtifact { path, .. }) => assert!(path.ends_with("absent.csv")),
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_bundle_file() {
        let (_dir, paths) = write_artifacts();
        fs::remove_file(&paths.attribution).unwrap();

        match load_artifacts(&paths) {
            Err(AppError::MissingArtifact { path, .. }) => assert_eq!(path, paths.attribution),
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_bundle_is_missing_artifact() {
        let (_dir, paths) = write_artifacts();
        fs::write(&paths.attribution, b"\x80\x04\x95not json").unwrap();
        assert!(matches!(load_artifacts(&paths), Err(AppError::MissingArtifact { .. })));
    }

    #[test]
    fn test_non_utf8_table_is_missing_artifact() {
        let (_dir, paths) = write_artifacts();
        fs::write(&paths.report_data, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(load_artifacts(&paths), Err(AppError::MissingArtifact { .. })));
    }

    #[test]
    fn test_cache_reads_disk_once() {
        let (_dir, paths) = write_artifacts();
        let cache = ArtifactCache::new(paths.clone());

        let first = cache.load().unwrap();
        // Removing the files proves the second call never touches disk
        fs::remove_file(&paths.report_data).unwrap();
        fs::remove_file(&paths.attribution).unwrap();
        let second = cache.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.dataset, second.dataset);
        assert_eq!(cache.disk_loads(), 1);
    }

    #[test]
    fn test_cache_does_not_keep_failures() {
        let (_dir, paths) = write_artifacts();
        let bundle = fs::read(&paths.attribution).unwrap();
        fs::remove_file(&paths.attribution).unwrap();

        let cache = ArtifactCache::new(paths.clone());
        assert!(cache.load().is_err());

        fs::write(&paths.attribution, bundle).unwrap();
        assert!(cache.load().is_ok());
        assert_eq!(cache.disk_loads(), 2);
    }
}
