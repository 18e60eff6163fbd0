//! Console + file logger handles.
//!
//! [`create_logger`] builds a fresh `tracing` dispatcher with up to two sinks:
//!
//! - console: stderr, `DEBUG` and above, `time : LEVEL message`
//! - file: `INFO` and above, no ANSI, `time target line:LEVEL message`. The
//!   file is truncated every time a logger is created.
//!
//! Creating a logger never touches global state, so building several in a
//! row yields independent handles with their own sinks. Call
//! [`Logger::install`] to make one the process-wide default, or
//! [`Logger::in_scope`] to route a closure's events through it.

use std::fmt::Write as _;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{self, FmtContext, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use crate::error::{Error, Result};

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logging.log";

/// Which sinks a logger writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Write `DEBUG`+ events to stderr.
    pub console: bool,
    /// Write `INFO`+ events to `file_path`.
    pub file: bool,
    /// Log file location. Truncated on logger creation.
    pub file_path: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: true,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl LoggerConfig {
    /// Only the file sink, writing to `path`.
    #[must_use]
    pub fn file_only(path: impl AsRef<Path>) -> Self {
        Self {
            console: false,
            file: true,
            file_path: path.as_ref().to_path_buf(),
        }
    }

    /// Only the console sink.
    #[must_use]
    pub fn console_only() -> Self {
        Self {
            console: true,
            file: false,
            ..Self::default()
        }
    }
}

/// A configured logger. Cheap to clone; clones share sinks.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    file_path: Option<PathBuf>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// The underlying dispatcher.
    #[must_use]
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Path of the file sink, if enabled.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Run `f` with this logger as the thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the global default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Logging`] if a global default is already set.
    pub fn install(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| Error::Logging(e.to_string()))
    }
}

/// Line layout of each sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineFormat {
    /// `time : LEVEL message`
    Console,
    /// `time target line:LEVEL message`
    File,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        SystemTime.format_time(&mut writer)?;
        match self {
            Self::Console => write!(writer, " : {} ", meta.level())?,
            Self::File => write!(
                writer,
                " {} {}:{} ",
                meta.target(),
                meta.line().unwrap_or(0),
                meta.level()
            )?,
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a logger with the sinks enabled in `config`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the log file cannot be created.
pub fn create_logger(config: &LoggerConfig) -> Result<Logger> {
    create_logger_with(config, io::stderr)
}

/// [`create_logger`] with the console sink writing to `console`.
pub(crate) fn create_logger_with<W>(config: &LoggerConfig, console: W) -> Result<Logger>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let console = config.console.then(|| {
        fmt::layer()
            .event_format(LineFormat::Console)
            .with_writer(console)
            .with_filter(LevelFilter::DEBUG)
    });

    let file = if config.file {
        let file = File::create(&config.file_path)?;
        Some(
            fmt::layer()
                .event_format(LineFormat::File)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry().with(console).with(file);

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        file_path: config.file.then(|| config.file_path.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tracing::{debug, info, warn};

    /// In-memory console sink.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert!(config.console);
        assert!(config.file);
        assert_eq!(config.file_path, PathBuf::from("logging.log"));
    }

    #[test]
    fn test_file_sink_filters_debug() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let logger = create_logger(&LoggerConfig::file_only(&path)).unwrap();

        logger.in_scope(|| {
            debug!("debug line");
            info!("info line");
            warn!("warn line");
        });

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("debug line"));
        assert!(text.contains("info line"));
        assert!(text.contains("warn line"));
        assert!(text.contains("INFO"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_console_sink_keeps_debug() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let console = SharedBuf::default();
        let sink = console.clone();
        let config = LoggerConfig {
            console: true,
            file: true,
            file_path: path.clone(),
        };
        let logger = create_logger_with(&config, move || sink.clone()).unwrap();

        logger.in_scope(|| {
            debug!("debug line");
            info!("info line");
        });

        let out = console.contents();
        assert!(out.contains(" : DEBUG debug line"));
        assert!(out.contains(" : INFO info line"));
        assert_eq!(out.lines().count(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("debug line"));
        assert!(text.contains("info line"));
    }

    #[test]
    fn test_file_line_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let logger = create_logger(&LoggerConfig::file_only(&path)).unwrap();

        logger.in_scope(|| info!("info line"));

        let text = std::fs::read_to_string(&path).unwrap();
        let line = text.lines().next().unwrap();
        assert!(line.contains(" trueno_eda::logger::tests "));
        assert!(line.ends_with(":INFO info line"));
        // Time comes first
        assert!(line.starts_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn test_file_truncated_on_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "stale contents\n").unwrap();

        let logger = create_logger(&LoggerConfig::file_only(&path)).unwrap();
        logger.in_scope(|| info!("fresh"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale contents"));
        assert!(text.contains("fresh"));
    }

    #[test]
    fn test_loggers_are_independent() {
        let dir = TempDir::new().unwrap();
        let a_path = dir.path().join("a.log");
        let b_path = dir.path().join("b.log");
        let a = create_logger(&LoggerConfig::file_only(&a_path)).unwrap();
        let b = create_logger(&LoggerConfig::file_only(&b_path)).unwrap();

        a.in_scope(|| info!("to a"));
        b.in_scope(|| info!("to b"));

        let a_text = std::fs::read_to_string(&a_path).unwrap();
        let b_text = std::fs::read_to_string(&b_path).unwrap();
        assert!(a_text.contains("to a") && !a_text.contains("to b"));
        assert!(b_text.contains("to b") && !b_text.contains("to a"));
    }

    #[test]
    fn test_no_file_when_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never.log");
        let config = LoggerConfig {
            console: true,
            file: false,
            file_path: path.clone(),
        };
        let logger = create_logger(&config).unwrap();
        assert!(logger.file_path().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::file_only(dir.path().join("no/such/dir/x.log"));
        assert!(matches!(create_logger(&config), Err(Error::Io(_))));
    }
}
