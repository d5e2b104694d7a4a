use ferrous_doh_application::use_cases::RotateLogUseCase;
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::logging::{LogSink, TarGzLogArchiver};
use ferrous_doh_jobs::{JobRunner, LogRotationJob};
use std::sync::Arc;
use tracing::info;

/// Log rotation only runs when events are going to a file.
pub fn build_job_runner(config: &Config, log_sink: Option<LogSink>) -> JobRunner {
    let runner = JobRunner::new();

    let Some(sink) = log_sink else {
        info!("Logging to stderr, log rotation disabled");
        return runner;
    };

    let archiver = Arc::new(TarGzLogArchiver::new(sink));
    let rotate_log = Arc::new(RotateLogUseCase::new(archiver, config.logging.max_size));

    runner.with_log_rotation(LogRotationJob::new(
        rotate_log,
        config.logging.rotation_interval_secs,
    ))
}
