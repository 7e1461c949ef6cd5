use std::fs::{File, OpenOptions};
use std::sync::{Mutex, OnceLock};
use tracing::warn;
use tracing_subscriber::fmt::{self, time::LocalTime, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Any `tracing` level name, or "off". Falls back to `RUST_LOG`, then `warn`.
    pub level: Option<String>,
    /// Append to this file instead of stderr.
    pub file: Option<String>,
}

impl LogConfig {
    fn filter(&self) -> EnvFilter {
        match &self.level {
            Some(level) => EnvFilter::new(format!("odbc_rowmap={}", level.to_lowercase())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("odbc_rowmap=warn")),
        }
    }

    fn open_file(&self) -> Option<std::io::Result<File>> {
        self.file
            .as_deref()
            .map(|path| OpenOptions::new().create(true).append(true).open(path))
    }
}

/// Installs the global subscriber on first call; later calls do nothing.
pub fn init_tracing(config: Option<&LogConfig>) {
    TRACING.get_or_init(|| {
        let config = config.cloned().unwrap_or_default();
        let mut file_error = None;
        let (writer, ansi) = match config.open_file() {
            Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Some(Err(e)) => {
                file_error = Some(e);
                (BoxMakeWriter::new(std::io::stderr), true)
            }
            None => (BoxMakeWriter::new(std::io::stderr), true),
        };

        let installed = tracing_subscriber::registry()
            .with(config.filter())
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_timer(LocalTime::rfc_3339()),
            )
            .try_init()
            .is_ok();

        if let (true, Some(e)) = (installed, file_error) {
            warn!("Cannot open log file {:?}, logging to stderr: {}", config.file, e);
        }
    });
}
