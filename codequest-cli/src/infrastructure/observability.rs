use crate::infrastructure::{CliError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub file_output: Option<String>,
    pub show_spans: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_logs: bool, // Whether to write logs to the terminal
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            file_output: None,
            show_spans: false,
            show_thread_ids: false,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Development configuration (verbose, human-readable)
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_spans: true,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    /// Interactive play: only warnings reach the terminal so the board
    /// stays readable
    pub fn quiet() -> Self {
        Self {
            default_level: tracing::Level::WARN,
            show_targets: false,
            ..Default::default()
        }
    }

    /// Hide terminal logs
    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    /// Also append logs to a file
    pub fn with_file_output(mut self, path: String) -> Self {
        self.file_output = Some(path);
        self
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        let core_directive = format!("codequest_core={}", self.default_level)
            .parse()
            .map_err(|e| CliError::Logging(format!("bad filter directive: {}", e)))?;

        Ok(EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            self.default_level
        ))
        .add_directive(core_directive))
    }

    pub fn init(self) -> Result<()> {
        let env_filter = self.env_filter()?;

        let span_events = if self.show_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let terminal_layer = self.show_logs.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
                .with_span_events(span_events.clone())
        });

        let file_layer = match &self.file_output {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(self.show_thread_ids)
                        .with_span_events(span_events),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(terminal_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.default_level, tracing::Level::INFO);
        assert!(config.file_output.is_none());
        assert!(config.show_logs);
    }

    #[test]
    fn test_dev_config() {
        let config = LogConfig::dev();
        assert_eq!(config.default_level, tracing::Level::DEBUG);
        assert!(config.show_spans);
        assert!(config.show_thread_ids);
    }

    #[test]
    fn test_quiet_config() {
        let config = LogConfig::quiet();
        assert_eq!(config.default_level, tracing::Level::WARN);
        assert!(!config.show_targets);
        assert!(config.show_logs);
    }

    #[test]
    fn test_without_logs() {
        let config = LogConfig::default().without_logs();
        assert!(!config.show_logs);
    }

    #[test]
    fn test_with_file_output() {
        let config = LogConfig::quiet().with_file_output("codequest.log".to_string());
        assert_eq!(config.file_output, Some("codequest.log".to_string()));
        assert_eq!(config.default_level, tracing::Level::WARN);
    }
}
