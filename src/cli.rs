use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "viewfeed",
    version,
    about = "Make a streaming activity feed."
)]
pub struct Cli {
    /// Reuse the cached viewing activity instead of downloading it
    #[arg(short = 'n', long = "nodownload", visible_alias = "no-download")]
    pub no_download: bool,

    /// Append log output to this file instead of stdout
    #[arg(short = 'o', long = "outfile")]
    pub outfile: Option<PathBuf>,

    /// Configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Cached viewing activity snapshot
    #[arg(long = "cache")]
    pub cache: Option<PathBuf>,
}
