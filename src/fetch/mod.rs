//! Logo acquisition.
//!
//! Every target walks the same chain and stops at the first file written:
//! an existing non-empty file, the explicit override URL, each devicon
//! mirror and variant, the monochrome icon service, and finally a generated
//! placeholder. Targets are processed in fixed-size groups; a group runs
//! concurrently and the next group waits for it to finish.

pub mod download;
pub mod repair;
pub mod source;
pub mod target;
pub mod transport;

use self::download::{Downloader, MAX_REDIRECTS};
use self::source::{
    default_icon_names, default_sources, monochrome_slug, placeholder_url, status_is_success,
    SourceDescriptor, PLACEHOLDER,
};
use self::target::LogoTarget;
use self::transport::Transport;
use crate::error::AppError;
use crate::metrics::Metrics;

use futures::future::join_all;
use indicatif::ProgressBar;
use itertools::Itertools;
use std::collections::HashMap;
use std::fs::{create_dir_all, metadata};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BATCH_SIZE: usize = 5;
pub const USER_AGENT: &str = "logo-sphere downloader/1.0";
pub const OUTPUT_DIR: &str = "public/logos";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub output_dir: PathBuf,
    pub batch_size: usize,
    pub user_agent: String,
    pub max_redirects: usize,
    /// Bodies below this many bytes are discarded as error pages
    pub min_bytes: Option<u64>,
    pub sources: Vec<SourceDescriptor>,
    /// Devicon name to monochrome icon slug
    pub icon_names: HashMap<String, String>,
    pub placeholder_base: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(OUTPUT_DIR),
            batch_size: BATCH_SIZE,
            user_agent: USER_AGENT.to_owned(),
            max_redirects: MAX_REDIRECTS,
            min_bytes: None,
            sources: default_sources(),
            icon_names: default_icon_names(),
            placeholder_base: PLACEHOLDER.to_owned(),
        }
    }
}

/// Where a target's file came from
#[derive(Debug, Clone, PartialEq)]
pub enum AcquiredFrom {
    Existing,
    Override,
    Mirror { base: String, variant: String },
    Monochrome,
    Placeholder,
    /// Even the placeholder could not be fetched
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    pub name: String,
    pub path: PathBuf,
    pub from: AcquiredFrom,
}

pub struct Fetcher {
    config: FetchConfig,
    downloader: Downloader,
}

impl Fetcher {
    pub fn new(config: FetchConfig, transport: Arc<dyn Transport>) -> Self {
        let downloader = Downloader::new(transport, &config.user_agent)
            .with_max_redirects(config.max_redirects)
            .with_min_bytes(config.min_bytes);
        Self { config, downloader }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch every target that has no file yet. Re-running over a complete directory issues no requests.
    pub async fn acquire(&self, targets: &[LogoTarget]) -> Result<Vec<TargetReport>, AppError> {
        if let Some(bad) = targets.iter().find(|t| !t.is_valid()) {
            return Err(AppError::InvalidTarget(format!("{:?}", bad)));
        }
        create_dir_all(&self.config.output_dir)?;

        let mut reports = Vec::with_capacity(targets.len());
        let progress_bar = ProgressBar::new(targets.len() as u64);
        for (index, batch) in batches(targets, self.config.batch_size).enumerate() {
            info!(
                "Batch {}: {}",
                index + 1,
                batch.iter().map(|t| t.name.as_str()).join(", ")
            );
            let results = join_all(batch.iter().map(|target| self.acquire_target(target))).await;
            progress_bar.inc(batch.len() as u64);
            reports.extend(results);
        }
        progress_bar.finish_and_clear();

        info!("{:?}", Metrics::from_reports(&reports));
        Ok(reports)
    }

    /// Runs the chain for a single target, creating the output directory first
    pub async fn acquire_one(&self, target: &LogoTarget) -> Result<TargetReport, AppError> {
        if !target.is_valid() {
            return Err(AppError::InvalidTarget(format!("{:?}", target)));
        }
        create_dir_all(&self.config.output_dir)?;
        Ok(self.acquire_target(target).await)
    }

    async fn acquire_target(&self, target: &LogoTarget) -> TargetReport {
        let path = target.destination(&self.config.output_dir);
        let from = self.run_chain(target, &path).await;
        let file_name = target.file_name();
        match &from {
            AcquiredFrom::Existing => info!("Skipping {} (already exists)", file_name),
            AcquiredFrom::Exhausted => warn!("Every source failed for {}", file_name),
            AcquiredFrom::Placeholder => info!("Using placeholder for {}", file_name),
            other => info!("Downloaded {} from {:?}", file_name, other),
        }
        TargetReport {
            name: target.name.clone(),
            path,
            from,
        }
    }

    async fn run_chain(&self, target: &LogoTarget, dest: &Path) -> AcquiredFrom {
        if is_present(dest) {
            return AcquiredFrom::Existing;
        }

        if let Some(url) = &target.url {
            if self.downloader.download(url, dest, status_is_success).await.is_saved() {
                return AcquiredFrom::Override;
            }
        }

        for source in self.config.sources.iter().filter(|s| !s.monochrome) {
            for variant in target.variants() {
                let url = source.variant_url(target, variant);
                if self.downloader.download(&url, dest, source.accept).await.is_saved() {
                    return AcquiredFrom::Mirror {
                        base: source.base.clone(),
                        variant: variant.to_owned(),
                    };
                }
            }
        }

        // Skipped when no source is flagged monochrome
        if let Some(source) = self.config.sources.iter().find(|s| s.monochrome) {
            let url = format!(
                "{}/{}",
                source.base,
                monochrome_slug(&self.config.icon_names, target)
            );
            if self.downloader.download(&url, dest, source.accept).await.is_saved() {
                return AcquiredFrom::Monochrome;
            }
        }

        let url = placeholder_url(&self.config.placeholder_base, target);
        if self.downloader.download(&url, dest, status_is_success).await.is_saved() {
            return AcquiredFrom::Placeholder;
        }
        AcquiredFrom::Exhausted
    }
}

/// Consecutive groups of at most `size` targets. A size of zero is treated as one.
pub fn batches(targets: &[LogoTarget], size: usize) -> std::slice::Chunks<'_, LogoTarget> {
    targets.chunks(size.max(1))
}

/// A non-empty file wins over any remote source, even if it is stale
pub(crate) fn is_present(path: &Path) -> bool {
    metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
