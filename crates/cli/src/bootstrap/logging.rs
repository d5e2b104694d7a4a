use ferrous_doh_domain::config::LoggingConfig;
use ferrous_doh_infrastructure::logging::LogSink;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// Events go to the configured log file when it can be opened, otherwise to
/// stderr. `RUST_LOG` takes precedence over the configured level. Returns the
/// file sink so the rotation job can share its lock.
pub fn init_logging(config: &LoggingConfig) -> Option<LogSink> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let Some(path) = config.file_path() else {
        init_stderr(filter);
        return None;
    };

    match LogSink::open(path) {
        Ok(sink) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(sink.clone())
                        .with_ansi(false)
                        .with_target(false),
                )
                .init();
            Some(sink)
        }
        Err(e) => {
            init_stderr(filter);
            warn!(path = %path, error = %e, "Failed to open log file, logging to stderr");
            None
        }
    }
}

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
