use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

const MAX_LOG_BYTES: u64 = 1024 * 1024;

/// Route the `log` macros to `<data_dir>/expensetui.log`; the terminal
/// belongs to the TUI. Failure to open the file leaves logging disabled.
pub(crate) fn init(data_dir: &Path) {
    let level = std::env::var("EXPENSETUI_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Info);

    let path = data_dir.join("expensetui.log");
    let old = data_dir.join("expensetui.old.log");
    if let Err(e) = rotate_if_large(&path, &old, MAX_LOG_BYTES) {
        eprintln!(
            "Warning: could not rotate log file {} to {}: {e}",
            path.display(),
            old.display()
        );
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
            return;
        }
    };

    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if WriteLogger::init(level, config, file).is_ok() {
        log::info!("expensetui {} starting", env!("CARGO_PKG_VERSION"));
    }
}

/// Move `path` to `old` once it grows past `max_bytes`. Returns whether
/// a rotation happened.
fn rotate_if_large(path: &Path, old: &Path, max_bytes: u64) -> std::io::Result<bool> {
    if !std::fs::metadata(path).is_ok_and(|m| m.len() > max_bytes) {
        return Ok(false);
    }
    std::fs::rename(path, old)?;
    Ok(true)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
