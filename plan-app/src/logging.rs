//! Process-wide `tracing` setup.
//!
//! [`init`] installs one subscriber with three controls that can change
//! after start-up: the filter directives, whether stdout shows anything, and
//! an optional log file. The `[logging]` table is applied through
//! [`LogControl::apply`] once the config file has been read, so anything
//! logged while reading it still reaches stdout.

use std::fs::File;
use std::io::{self, IsTerminal, LineWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, reload};

use crate::config::LoggingConfig;

const DEFAULT_DIRECTIVES: &str = "info";

static CONTROL: OnceLock<LogControl> = OnceLock::new();

/// Local wall-clock timestamps with milliseconds.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Log file that can be opened, swapped or closed while the subscriber runs.
/// Output is dropped while no file is open.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<LineWriter<File>>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<LineWriter<File>>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(
        &self,
        file: Option<File>,
    ) {
        *self.lock() = file.map(LineWriter::new);
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<LineWriter<File>>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

/// Runtime switches for the installed subscriber.
pub struct LogControl {
    directives: reload::Handle<EnvFilter, Registry>,
    stdout: Arc<AtomicBool>,
    file: LogFile,
}

impl LogControl {
    /// Replaces the filter. Accepts a bare level (`debug`) or full
    /// directives (`plan_core=debug,sqlx=warn`).
    pub fn set_level(
        &self,
        directives: &str,
    ) -> Result<()> {
        let filter = EnvFilter::try_new(directives).with_context(|| format!("invalid log level '{directives}'"))?;
        self.directives
            .reload(filter)
            .context("log filter is no longer installed")
    }

    /// Mutes or unmutes stdout. The log file is unaffected.
    pub fn set_stdout(
        &self,
        enabled: bool,
    ) {
        self.stdout.store(enabled, Ordering::Relaxed);
    }

    /// Appends to `path` from now on, closing any file already open. The
    /// parent directory must exist.
    pub fn log_to_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        self.file.replace(Some(file));
        tracing::debug!(path = %path.display(), "logging to file");
        Ok(())
    }

    pub fn stop_file_logging(&self) {
        self.file.replace(None);
    }

    /// Brings every switch in line with the `[logging]` table. An unset
    /// level keeps the current filter.
    pub fn apply(
        &self,
        config: &LoggingConfig,
    ) -> Result<()> {
        if let Some(level) = &config.level {
            self.set_level(level)?;
        }
        self.set_stdout(config.stdout);
        match &config.file {
            Some(path) => self.log_to_file(path),
            None => {
                self.stop_file_logging();
                Ok(())
            }
        }
    }
}

/// Installs the global subscriber on first call and returns its controls.
///
/// The starting filter comes from `RUST_LOG`, else `info`. Stdout is
/// coloured only on a terminal. If another subscriber is already installed
/// the controls are still returned but have no effect.
pub fn init() -> &'static LogControl {
    CONTROL.get_or_init(|| {
        let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
        let (filter_layer, directives) = reload::Layer::new(initial);
        let stdout = Arc::new(AtomicBool::new(true));
        let file = LogFile::default();

        let stdout_gate = stdout.clone();
        let stdout_layer = tracing_subscriber::fmt::layer()
            .with_timer(LocalTime)
            .with_ansi(io::stdout().is_terminal())
            .with_filter(filter_fn(move |_| stdout_gate.load(Ordering::Relaxed)));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_timer(LocalTime)
            .with_ansi(false)
            .with_writer(file.clone());

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(stdout_layer)
            .with(file_layer)
            .try_init();

        LogControl {
            directives,
            stdout,
            file,
        }
    })
}
