mod app;
mod cli;
mod config;
mod error;
mod http;
mod logging;
mod paths;
mod provider;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
