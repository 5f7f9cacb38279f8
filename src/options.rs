use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "logo-sphere",
    about = "Fetches the site's technology logos and renders stills of the hero sphere"
)]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Download every logo that is not already on disk
    Fetch {
        /// The directory logos are written to
        #[structopt(short = "o", long = "output", parse(from_os_str), default_value = "public/logos")]
        output: PathBuf,

        /// A JSON array of targets to use instead of the built-in list
        #[structopt(short = "m", long = "manifest", parse(from_os_str))]
        manifest: Option<PathBuf>,

        /// How many logos are fetched at once
        #[structopt(short = "b", long = "batch-size", default_value = "5")]
        batch_size: usize,

        /// Per-request timeout in seconds. No timeout when omitted.
        #[structopt(short = "t", long = "timeout")]
        timeout: Option<u64>,
    },

    /// Re-fetch logos from redirecting media hosts, rejecting undersized files
    Repair {
        /// The directory logos are written to
        #[structopt(short = "o", long = "output", parse(from_os_str), default_value = "public/logos")]
        output: PathBuf,

        /// Per-request timeout in seconds. No timeout when omitted.
        #[structopt(short = "t", long = "timeout")]
        timeout: Option<u64>,
    },

    /// Render a single frame of the particle sphere to an SVG file
    Poster {
        /// Where to write the SVG
        #[structopt(short = "o", long = "output", parse(from_os_str), default_value = "public/hero.svg")]
        output: PathBuf,

        #[structopt(long, default_value = "1200")]
        width: f64,

        #[structopt(long, default_value = "630")]
        height: f64,

        /// Animation time of the frame, in milliseconds
        #[structopt(long, default_value = "0")]
        time: f64,

        /// Seed for dot colours and sizes
        #[structopt(long, default_value = "1")]
        seed: u64,
    },
}
