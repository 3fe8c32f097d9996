//! File logging.
//!
//! The TUI owns the terminal, so diagnostics go to rotating files under
//! `<data_dir>/codebox/logs` instead of stderr.
//!
//! # Invariants
//! - Initialization happens at most once per process; later calls are no-ops.
//! - Initialization never panics. A failure leaves the app running unlogged.

use anyhow::{Context, Result, anyhow};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "codebox";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("codebox").join("logs"))
}

pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    let level = normalize_level(level)?;

    LOGGER.get_or_try_init(|| -> Result<LoggerHandle> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let handle = Logger::try_with_str(level)?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .context("Failed to start logger")?;

        info!(
            "event=app_start status=ok version={} level={}",
            env!("CARGO_PKG_VERSION"),
            level
        );
        Ok(handle)
    })?;

    Ok(())
}

/// Writes out buffered log lines. The handle lives in a static that is never
/// dropped, so short CLI runs must call this before exiting.
pub fn flush_logs() {
    if let Some(handle) = LOGGER.get() {
        handle.flush();
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(anyhow!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_normalized() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert_eq!(normalize_level("debug").unwrap(), "debug");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn flushed_lines_reach_the_log_file() {
        let dir = std::env::temp_dir().join(format!("codebox-logs-{}", std::process::id()));
        init_logging("info", &dir).unwrap();

        log::warn!("event=catalog_load status=error marker=flush-check");
        flush_logs();

        let written = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path()).ok())
            .any(|content| content.contains("marker=flush-check"));
        assert!(written);
    }
}
