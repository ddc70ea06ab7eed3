mod feed;
mod markup;
mod parser;
mod record;


use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::FeedError;
use crate::logging::RunLogger;
use crate::paths::{cache_file_path, config_file_path};
use crate::provider::{HistoryProvider, NetflixProvider, download_snapshot};

use self::feed::{Channel, render_feed};
use self::parser::parse_snapshot;
use self::record::sort_most_recent_first;

pub const FEED_ITEM_LIMIT: usize = 20;
const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Download a fresh export and overwrite the cached copy.
    Refresh,
    /// Reuse the export saved by an earlier run.
    Cached,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: &'static str,
    pub elapsed: Duration,
    pub items_written: usize,
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config_file_path()?,
    };
    let config = Config::load(&config_path)?;
    let _logger = RunLogger::for_outfile(cli.outfile.as_deref())?;
    let cache_path = match cli.cache.or_else(|| config.cache.path.clone()) {
        Some(path) => path,
        None => cache_file_path()?,
    };

    let source = if cli.no_download {
        SnapshotSource::Cached
    } else {
        SnapshotSource::Refresh
    };
    let provider = NetflixProvider::from_account(&config.account);
    if let Err(err) = FeedRun::new(&config, cache_path).execute(&provider, source) {
        tracing::error!("{err}");
        return Err(err.into());
    }
    Ok(())
}

/// One end-to-end pass: snapshot, parse, sort, truncate, render, write.
pub struct FeedRun<'a> {
    config: &'a Config,
    cache_path: PathBuf,
}

impl<'a> FeedRun<'a> {
    pub fn new(config: &'a Config, cache_path: PathBuf) -> Self {
        Self { config, cache_path }
    }

    pub fn execute<P: HistoryProvider>(
        &self,
        provider: &P,
        source: SnapshotSource,
    ) -> Result<RunReport, FeedError> {
        let started = Instant::now();

        let snapshot = match source {
            SnapshotSource::Refresh => {
                let snapshot = download_snapshot(provider, &self.config.account)?;
                write_file(&self.cache_path, &snapshot)?;
                tracing::debug!("Downloaded latest streaming activity.");
                snapshot
            }
            SnapshotSource::Cached => {
                tracing::debug!("Using cached streaming activity.");
                read_cached_snapshot(&self.cache_path)?
            }
        };

        let mut records = parse_snapshot(&snapshot)?;
        sort_most_recent_first(&mut records);
        records.truncate(FEED_ITEM_LIMIT);

        let channel = Channel {
            title: &self.config.feed.title,
            self_link: &self.config.feed.href,
        };
        let document = render_feed(&channel, &records, Utc::now());
        write_file(&self.config.feed.filename, &document)?;
        tracing::debug!(
            "Wrote {} item(s) to {}.",
            records.len(),
            self.config.feed.filename.display()
        );

        let report = RunReport {
            status: STATUS_OK,
            elapsed: started.elapsed(),
            items_written: records.len(),
        };
        tracing::info!("{:2.0}s {}", report.elapsed.as_secs_f64(), report.status);
        Ok(report)
    }
}

fn read_cached_snapshot(path: &Path) -> Result<String, FeedError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => FeedError::NotFound(path.to_path_buf()),
        _ => FeedError::io(path, err),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), FeedError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| FeedError::io(parent, err))?;
    }
    fs::write(path, contents).map_err(|err| FeedError::io(path, err))
}
