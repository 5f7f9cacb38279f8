#![warn(clippy::all)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod fetch;
pub mod metrics;
pub mod options;
pub mod page;
pub mod sphere;

use crate::error::AppError;
use crate::fetch::repair::{default_repair_targets, RepairReport, Repairer};
use crate::fetch::target::{default_targets, load_manifest};
use crate::fetch::transport::ReqwestTransport;
use crate::fetch::{FetchConfig, Fetcher, TargetReport};
use crate::sphere::svg::render_poster;
use crate::sphere::{Pointer, Viewport};

use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Fetch the built-in logos, or the ones listed in `manifest`, into `output`
pub async fn fetch_logos(
    output: &Path,
    manifest: Option<&Path>,
    batch_size: usize,
    timeout: Option<Duration>,
) -> Result<Vec<TargetReport>, AppError> {
    let targets = match manifest {
        Some(path) => {
            debug!("Reading targets from {}", path.to_string_lossy());
            load_manifest(path)?
        }
        None => default_targets(),
    };
    info!("Fetching {} logos into {}", targets.len(), output.to_string_lossy());

    let config = FetchConfig {
        output_dir: output.to_path_buf(),
        batch_size,
        ..FetchConfig::default()
    };
    let transport = Arc::new(ReqwestTransport::new(timeout)?);
    Fetcher::new(config, transport).acquire(&targets).await
}

/// Run the validating re-fetch over the built-in repair list
pub async fn repair_logos(
    output: &Path,
    timeout: Option<Duration>,
) -> Result<Vec<RepairReport>, AppError> {
    let transport = Arc::new(ReqwestTransport::new(timeout)?);
    Repairer::new(output, transport)
        .repair(&default_repair_targets())
        .await
}

/// Writes a still of the sphere and returns where it went
pub fn write_poster(
    output: &Path,
    viewport: Viewport,
    ts: f64,
    seed: u64,
) -> Result<PathBuf, AppError> {
    let document = render_poster(viewport, ts, Pointer::default(), seed);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    write(output, document)?;
    info!("Poster written to {}", output.to_string_lossy());
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::read_to_string;
    use tempfile::tempdir;

    #[test]
    fn test_write_poster_creates_directories() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join("hero.svg");

        let written = write_poster(&output, Viewport::new(200.0, 120.0), 0.0, 3).unwrap();

        assert_eq!(output, written);
        let doc = read_to_string(&output).unwrap();
        assert!(doc.contains(r#"width="200" height="120""#));
    }

    #[tokio::test]
    async fn test_fetch_logos_with_complete_directory_skips_network() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("targets.json");
        write(&manifest, r#"[{"name": "react"}, {"name": "aws-thing", "filename": "aws"}]"#).unwrap();
        let output = dir.path().join("logos");
        create_dir_all(&output).unwrap();
        write(output.join("react.svg"), "<svg/>").unwrap();
        write(output.join("aws.svg"), "<svg/>").unwrap();

        let reports = fetch_logos(&output, Some(&manifest), 5, None).await.unwrap();

        assert_eq!(2, reports.len());
        assert!(reports
            .iter()
            .all(|r| r.from == fetch::AcquiredFrom::Existing));
    }

    #[tokio::test]
    async fn test_fetch_logos_bad_manifest() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("targets.json");
        write(&manifest, "{ not json").unwrap();
        let result = fetch_logos(dir.path(), Some(&manifest), 5, None).await;
        assert!(matches!(result, Err(AppError::Manifest(_))));
    }
}
