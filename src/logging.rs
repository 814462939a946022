//! Tracing subscriber setup: console output, plus a rotating log file when
//! `LOG_DIR` is set.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

/// Keeps the non-blocking file writer flushing until the process exits.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

pub fn init() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(true)
        .with_level(true);

    match env::var("LOG_DIR") {
        Ok(dir) => {
            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            let writer = stdout.and(file_writer(&dir)?);
            builder.with_writer(writer).init();
        }
        Err(_) => builder.init(),
    }

    tracing::info!("📝 Logger initialized");
    Ok(())
}

fn file_writer(dir: &str) -> Result<NonBlocking, AppError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tentrackule-presence.log");

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder
        .build(dir)
        .map_err(|e| AppError::Config(format!("cannot open log directory {dir}: {e}")))?;

    let (file_writer, guard) = non_blocking(file_appender);
    if LOG_GUARD.set(guard).is_err() {
        return Err(AppError::Config("logger initialized twice".into()));
    }

    Ok(file_writer)
}
