use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Log sink for a single run. Events go to the sink while the value is alive;
/// dropping it restores whatever subscriber was active before.
pub struct RunLogger {
    _guard: DefaultGuard,
}

impl RunLogger {
    pub fn stdout() -> Self {
        Self::install(BoxMakeWriter::new(std::io::stdout), true)
    }

    pub fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(Self::install(BoxMakeWriter::new(Mutex::new(file)), false))
    }

    pub fn for_outfile(outfile: Option<&Path>) -> Result<Self> {
        match outfile {
            Some(path) => Self::file(path),
            None => Ok(Self::stdout()),
        }
    }

    fn install(writer: BoxMakeWriter, ansi: bool) -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .with_level(false)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .finish();
        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
