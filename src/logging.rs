use std::collections::BTreeMap;

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `EnvFilter` directives used when `RUST_LOG` is unset.
///
/// Base level first, then per-target levels. `log_targets` wins over the
/// built-in `sqlx` and `tower_http` defaults.
pub fn filter_directives(config: &AppConfig) -> String {
    let mut targets: BTreeMap<&str, &str> = BTreeMap::new();
    targets.insert("sqlx", "warn");
    // TraceLayer emits at DEBUG
    targets.insert(
        "tower_http",
        if config.http_trace { "debug" } else { "off" },
    );
    for (target, level) in &config.log_targets {
        targets.insert(target, level);
    }

    std::iter::once(config.log_level.clone())
        .chain(targets.into_iter().map(|(t, l)| format!("{}={}", t, l)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Keep the guard alive until shutdown or buffered
/// file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
log_level: info
log_dir: ./logs
log_file: test.log
use_json: false
rotation: never
gateway:
  host: 127.0.0.1
  port: 3000
database:
  host: localhost
  user: music
  name: zenestreaming
"#;

    #[test]
    fn test_default_directives() {
        let config = AppConfig::from_yaml(BASE).unwrap();
        assert_eq!(filter_directives(&config), "info,sqlx=warn,tower_http=off");
    }

    #[test]
    fn test_http_trace_and_overrides() {
        let mut config = AppConfig::from_yaml(BASE).unwrap();
        config.http_trace = true;
        config
            .log_targets
            .insert("sqlx".to_string(), "debug".to_string());
        config
            .log_targets
            .insert("zenestreaming::catalog".to_string(), "trace".to_string());

        let directives = filter_directives(&config);
        assert_eq!(
            directives,
            "info,sqlx=debug,tower_http=debug,zenestreaming::catalog=trace"
        );
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
