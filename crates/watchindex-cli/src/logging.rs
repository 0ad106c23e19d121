use anyhow::Result;
use std::io;
use std::path::Path;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use watchindex_config::{LoggingConfig, PathManager};

/// Pick the filter directive: `-q` wins, then `-v`/`-vv`, then RUST_LOG, then the config level
fn filter_directive(verbose_level: u8, quiet: bool, configured_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose_level {
        0 => std::env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| configured_level.to_lowercase()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init_logging(verbose_level: u8, quiet: bool, config: &LoggingConfig, paths: &PathManager) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet, &config.level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| config.json_enabled());

    let registry = Registry::default().with(filter);

    // Logs go to stderr (or a file) so stdout stays clean for --output json
    if let Some(log_path) = config.resolve_file(paths) {
        let file_appender = rolling_appender(&log_path)?;

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);

            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);

            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(fmt_layer).init();
    }

    Ok(())
}

/// Daily-rotated appender: watchindex.log becomes watchindex.2026-01-17 and so on
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path.parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    // Drop the extension for the rotation prefix
    let log_prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(filter_directive(2, true, "info"), "error");
    }

    #[test]
    fn test_verbose_levels() {
        assert_eq!(filter_directive(1, false, "warn"), "debug");
        assert_eq!(filter_directive(3, false, "warn"), "trace");
    }
}
