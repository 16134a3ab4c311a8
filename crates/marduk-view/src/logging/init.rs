use std::sync::Once;

/// Default filter when neither the config nor `RUST_LOG` provide one.
const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. `"marduk_view=debug,wgpu=warn"`.
/// It takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter string.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match self.env_filter.as_deref() {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder.filter_level(DEFAULT_LEVEL);
                }
            },
        }

        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // Another logger may already be installed by the host; keep it.
        if config.builder().try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::with_filter("marduk_view=trace"));
        init_logging(LoggingConfig::default());
        log::trace!("still alive after double init");
    }

    #[test]
    fn with_filter_keeps_default_write_style() {
        let cfg = LoggingConfig::with_filter("warn");
        assert_eq!(cfg.env_filter.as_deref(), Some("warn"));
        assert!(matches!(cfg.write_style, env_logger::WriteStyle::Auto));
    }
}
