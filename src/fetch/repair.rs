//! Re-fetches logos the main chain tends to get wrong, from hosts that serve
//! them behind redirects. Bodies below `MIN_BYTES` are treated as error pages.
//!
//! A fallback may write a different file name than the one requested (a PNG
//! in place of an SVG). The report carries the path actually written so the
//! caller can see the mismatch.

use super::download::Downloader;
use super::is_present;
use super::source::status_is_ok;
use super::transport::Transport;
use crate::error::AppError;

use std::ffi::OsStr;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const MIN_BYTES: u64 = 500;
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Clone, PartialEq)]
pub struct RepairSource {
    pub file_name: String,
    pub url: String,
}

impl RepairSource {
    pub fn new(file_name: &str, url: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            url: url.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairTarget {
    pub primary: RepairSource,
    pub fallbacks: Vec<RepairSource>,
}

impl RepairTarget {
    pub fn new(file_name: &str, url: &str) -> Self {
        Self {
            primary: RepairSource::new(file_name, url),
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, file_name: &str, url: &str) -> Self {
        self.fallbacks.push(RepairSource::new(file_name, url));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Repaired {
    Existing,
    Primary,
    /// Index into the target's fallbacks
    Fallback(usize),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairReport {
    pub requested: String,
    pub written: Option<PathBuf>,
    pub result: Repaired,
}

pub struct Repairer {
    output_dir: PathBuf,
    downloader: Downloader,
}

impl Repairer {
    pub fn new(output_dir: &Path, transport: Arc<dyn Transport>) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            downloader: Downloader::new(transport, BROWSER_USER_AGENT)
                .with_min_bytes(Some(MIN_BYTES)),
        }
    }

    /// Targets are handled one at a time
    pub async fn repair(&self, targets: &[RepairTarget]) -> Result<Vec<RepairReport>, AppError> {
        create_dir_all(&self.output_dir)?;
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            reports.push(self.repair_one(target).await);
        }
        Ok(reports)
    }

    async fn repair_one(&self, target: &RepairTarget) -> RepairReport {
        let requested = target.primary.file_name.clone();
        let dest = self.output_dir.join(&requested);

        if is_present(&dest) {
            info!("{} already exists.", requested);
            return RepairReport {
                requested,
                written: Some(dest),
                result: Repaired::Existing,
            };
        }

        info!("Downloading {}...", requested);
        if self.downloader.download(&target.primary.url, &dest, status_is_ok).await.is_saved() {
            info!("Saved {}", requested);
            return RepairReport {
                requested,
                written: Some(dest),
                result: Repaired::Primary,
            };
        }

        for (index, fallback) in target.fallbacks.iter().enumerate() {
            let dest = self.output_dir.join(&fallback.file_name);
            let saved = is_present(&dest)
                || self.downloader.download(&fallback.url, &dest, status_is_ok).await.is_saved();
            if saved {
                info!("Saved {}", fallback.file_name);
                let report = RepairReport {
                    requested,
                    written: Some(dest),
                    result: Repaired::Fallback(index),
                };
                if let Some(ext) = mismatched_extension(&report) {
                    warn!(
                        "{} was saved as {} (.{}); update any page referencing it",
                        report.requested,
                        fallback.file_name,
                        ext.to_string_lossy()
                    );
                }
                return report;
            }
        }

        warn!("Could not repair {}", requested);
        RepairReport {
            requested,
            written: None,
            result: Repaired::Failed,
        }
    }
}

/// The written file's extension, if it is not the one asked for
pub fn mismatched_extension(report: &RepairReport) -> Option<&OsStr> {
    let written = report.written.as_ref()?.extension();
    if written != Path::new(&report.requested).extension() {
        written
    } else {
        None
    }
}

pub fn default_repair_targets() -> Vec<RepairTarget> {
    vec![
        RepairTarget::new(
            "mendix.svg",
            "https://commons.wikimedia.org/wiki/Special:FilePath/Mendix_logo.svg",
        ),
        RepairTarget::new(
            "powerapps.svg",
            "https://commons.wikimedia.org/wiki/Special:FilePath/Powerapps-logo.svg",
        ),
        RepairTarget::new(
            "outsystems.svg",
            "https://raw.githubusercontent.com/OutSystems/outsystems-ui/2.8.0/src/Assets/OutSystems_Logo.svg",
        )
        .with_fallback("outsystems.png", "https://logo.clearbit.com/outsystems.com")
        .with_fallback(
            "outsystems.png",
            "https://commons.wikimedia.org/wiki/Special:FilePath/OS-logo-color_500x108.png",
        ),
    ]
}
