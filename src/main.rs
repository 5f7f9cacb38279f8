#![warn(clippy::all, clippy::pedantic)]
extern crate env_logger;
#[macro_use]
extern crate log;

use env_logger::Env;

use anyhow::{Context, Result};
use logo_sphere::fetch::AcquiredFrom;
use logo_sphere::options::{Command, Options};
use logo_sphere::sphere::Viewport;
use std::time::Duration;
use structopt::StructOpt;

///
/// Asset tooling for the marketing site.
/// 1. `fetch` downloads the technology logos, falling back through devicon mirrors,
///    Simple Icons and finally a lettered placeholder
/// 2. `repair` re-fetches a few logos from Wikimedia and friends, rejecting error pages
/// 3. `poster` renders a still of the hero particle sphere
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::new().filter_or("LOGO_SPHERE_LOG", "info")).init();

    let options = Options::from_args();
    debug!("{:?}", options);

    match options.command {
        Command::Fetch {
            output,
            manifest,
            batch_size,
            timeout,
        } => {
            let reports = logo_sphere::fetch_logos(
                &output,
                manifest.as_deref(),
                batch_size,
                timeout.map(Duration::from_secs),
            )
            .await
            .with_context(|| format!("Failed to fetch logos into {}", output.to_string_lossy()))?;

            let exhausted: Vec<&str> = reports
                .iter()
                .filter(|r| r.from == AcquiredFrom::Exhausted)
                .map(|r| r.name.as_str())
                .collect();
            if !exhausted.is_empty() {
                warn!("No file for: {}", exhausted.join(", "));
            }
            println!("Done processing logos.");
        }
        Command::Repair { output, timeout } => {
            let reports = logo_sphere::repair_logos(&output, timeout.map(Duration::from_secs))
                .await
                .with_context(|| format!("Failed to repair logos in {}", output.to_string_lossy()))?;
            for report in reports {
                match report.written {
                    Some(path) => println!("{}: {}", report.requested, path.to_string_lossy()),
                    None => println!("{}: not found", report.requested),
                }
            }
        }
        Command::Poster {
            output,
            width,
            height,
            time,
            seed,
        } => {
            let path = logo_sphere::write_poster(&output, Viewport::new(width, height), time, seed)
                .with_context(|| format!("Failed to write poster {}", output.to_string_lossy()))?;
            println!("{}", path.to_string_lossy());
        }
    }
    Ok(())
}
