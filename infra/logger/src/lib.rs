//! # Logger
//!
//! Diagnostics for the `lmarc` tools, built on `tracing-subscriber`.
//!
//! Commands print what the user asked for (tables, reports, saved paths) on stdout.
//! Everything logged through here goes to **stderr**, and optionally to a daily log
//! file in plain text or JSON lines.
//!
//! Filtering starts from [`LoggerBuilder::directives`] (or `RUST_LOG` when none are
//! given) over a default [`LoggerBuilder::level`]; [`LoggerBuilder::verbosity`] then
//! raises the archive's own crates to `debug` (`-v`) or `trace` (`-vv`) without
//! flooding the console with dependency output.
//!
//! ## Example
//!
//! ```rust
//! # use lmarc_logger::Logger;
//! let _logger = Logger::builder()
//!     .name("lmarc")
//!     .directives("warn")
//!     .verbosity(1)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 14;
const LOG_FILE_SUFFIX: &str = "log";
/// Target prefix shared by every crate of the archive (`lmarc_bench`, `lmarc_archive`, ...).
const OWN_TARGET: &str = "lmarc";

#[derive(Debug)]
struct Settings {
    level: LevelFilter,
    directives: Option<String>,
    verbosity: u8,
    console: bool,
    directory: Option<PathBuf>,
    json: bool,
    max_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            directives: None,
            verbosity: 0,
            console: true,
            directory: None,
            json: false,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl Settings {
    fn validate(&self, name: &str) -> Result<(), LoggerError> {
        let problem = if name.trim().is_empty() {
            Some("Logger name cannot be empty")
        } else if self.max_files == 0 {
            Some("max_files must be greater than zero")
        } else if !self.console && self.directory.is_none() {
            Some("No logging output enabled. Enable the console or a log directory.")
        } else {
            None
        };

        problem.map_or(Ok(()), |message| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        let filter = match &self.directives {
            Some(directives) => builder.parse(directives).map_err(|err| {
                LoggerError::InvalidConfiguration {
                    message: format!("Invalid filter '{directives}': {err}").into(),
                    context: None,
                }
            })?,
            None => builder.from_env_lossy(),
        };

        Ok(match self.verbosity_directive() {
            Some(directive) => filter.add_directive(directive),
            None => filter,
        })
    }

    fn verbosity_directive(&self) -> Option<Directive> {
        let level = match self.verbosity {
            0 => return None,
            1 => "debug",
            _ => "trace",
        };
        format!("{OWN_TARGET}={level}").parse().ok()
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}

/// Configures and installs the global subscriber.
///
/// [`LoggerBuilder::init`] is only reachable once a name is set; the name prefixes
/// log files (`lmarc.2025-06-14.log`).
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed> {
    settings: Settings,
    name: N,
}

impl LoggerBuilder<Unnamed> {
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()) }
    }
}

impl LoggerBuilder<Named> {
    /// Level of everything no directive mentions.
    #[must_use = "setters return the updated builder"]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Filter directives such as `info` or `lmarc_bench=debug,warn`.
    ///
    /// Replaces `RUST_LOG`. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "setters return the updated builder"]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    /// Number of `-v` flags. Also turns on timestamps and targets on the console.
    #[must_use = "setters return the updated builder"]
    pub const fn verbosity(mut self, count: u8) -> Self {
        self.settings.verbosity = count;
        self
    }

    #[must_use = "setters return the updated builder"]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Also writes a daily log file into `directory`.
    #[must_use = "setters return the updated builder"]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    /// JSON lines in the log file. The console stays human readable.
    #[must_use = "setters return the updated builder"]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }

    #[must_use = "setters return the updated builder"]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until exit; dropping it flushes and stops
    /// the file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad
    ///   directives, or with neither console nor directory enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when this process already has a global subscriber.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name) } = self;
        settings.validate(&name)?;

        let filter = settings.filter()?;
        let verbose = settings.verbosity > 0;
        let mut layers = Vec::new();

        if settings.console {
            let console = fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(verbose);
            layers.push(if verbose { console.boxed() } else { console.without_time().boxed() });
        }

        let mut guard = None;
        if let Some(directory) = &settings.directory {
            std::fs::create_dir_all(directory)
                .context(format!("Failed to create {}", directory.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(settings.max_files)
                .build(directory)?;
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);

            let file = fmt::layer().with_writer(writer).with_ansi(false);
            layers.push(if settings.json { file.json().boxed() } else { file.boxed() });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { guard })
    }
}

/// Handle to the installed subscriber.
#[must_use = "Dropping this handle stops the background log file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "Nothing is installed until .name(...).init() is called"]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed }
    }

    /// `true` when a log file is being written.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named() -> LoggerBuilder<Named> {
        Logger::builder().name("lmarc-test")
    }

    #[test]
    fn defaults_log_info_to_the_console() {
        let builder = named();
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert!(builder.settings.console);
        assert!(builder.settings.directives.is_none());
        assert!(builder.settings.directory.is_none());
        assert_eq!(builder.settings.max_files, DEFAULT_MAX_FILES);
    }

    #[test]
    fn verbosity_raises_own_crates_only() {
        assert!(named().settings.verbosity_directive().is_none());
        assert_eq!(
            named().verbosity(1).settings.verbosity_directive().map(|d| d.to_string().to_lowercase()),
            Some("lmarc=debug".to_owned())
        );
        assert_eq!(
            named().verbosity(5).settings.verbosity_directive().map(|d| d.to_string().to_lowercase()),
            Some("lmarc=trace".to_owned())
        );
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));

        let err = named().max_files(0).init().unwrap_err();
        assert!(err.to_string().contains("max_files"));

        let err = named().console(false).init().unwrap_err();
        assert!(err.to_string().contains("No logging output"));
    }

    #[test]
    fn malformed_directives_are_rejected() {
        let err = named().directives("lmarc=[[").settings.filter().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(named().directives("warn,lmarc_bench=debug").settings.filter().is_ok());
    }
}
