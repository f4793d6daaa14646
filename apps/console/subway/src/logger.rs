//! Logging for the subway console.
//!
//! The terminal belongs to the UI, so the full log goes to a file and only
//! warnings and errors are echoed (colored) to stderr.

use crate::error::SubwayError;

use common::ErrorLocation;

use std::io::stderr;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "subway.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Level echoed to the terminal.
const STDERR_LEVEL: LevelFilter = LevelFilter::Warn;

/// Initialize file + stderr logging.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`SubwayError::Subway`] if the log file cannot be created or a
/// global logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), SubwayError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(log_dir).and_then(|dispatch| {
            dispatch.apply().map_err(|e| SubwayError::Subway {
                message: format!("Failed to initialize logger: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })
        });
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

/// Dispatch writing to `{log_dir}/subway.log` and stderr. Not yet applied.
#[track_caller]
pub fn build_dispatch(log_dir: &Path) -> Result<Dispatch, SubwayError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stderr_dispatch = Dispatch::new()
        .level(STDERR_LEVEL)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{level}] {message}",
                level = color_configuration.color(record.level()),
                message = message,
            ))
        })
        .chain(stderr());

    let log_file = fern::log_file(&log_file_path).map_err(|e| SubwayError::Subway {
        message: format!("Failed to create log file {}: {e}", log_file_path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    Ok(Dispatch::new()
        .level(LOG_LEVEL)
        .level_for("hyper_util", LevelFilter::Info)
        .level_for("reqwest", LevelFilter::Info)
        .chain(stderr_dispatch)
        .chain(file_dispatch))
}
