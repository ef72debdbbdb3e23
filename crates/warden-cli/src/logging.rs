//! Structured logging for the CLI.
//!
//! Priority: `WARDEN_LOG` env filter, then `--log-level`. Logs go to stderr so
//! stdout stays machine-readable.

use clap::ValueEnum;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error, off
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log level {0:?}")]
    InvalidLevel(String),

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(config)?;
    let base = Registry::default().with(filter);

    let installed = match config.format {
        LogFormat::Json => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    filter_from(config, std::env::var("WARDEN_LOG").ok().as_deref())
}

fn filter_from(config: &LoggingConfig, env: Option<&str>) -> Result<EnvFilter, LoggingError> {
    if let Some(filter) = env.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }
    match config.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            Ok(EnvFilter::new(&config.level))
        }
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_level() {
        let config = LoggingConfig {
            level: "loud".into(),
            format: LogFormat::Text,
        };
        assert!(matches!(
            filter_from(&config, None),
            Err(LoggingError::InvalidLevel(l)) if l == "loud"
        ));
    }

    #[test]
    fn accepts_known_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "off"] {
            let config = LoggingConfig {
                level: level.into(),
                format: LogFormat::Json,
            };
            assert!(filter_from(&config, None).is_ok(), "{level}");
        }
    }

    #[test]
    fn env_directives_take_priority() {
        let config = LoggingConfig {
            level: "loud".into(),
            format: LogFormat::Text,
        };
        assert!(filter_from(&config, Some("warden_core=debug")).is_ok());
    }
}
