use std::path::Path;

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking writers flushing until dropped. Hold it for the
/// lifetime of the process.
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Console logging always; a `{service_name}.log` file under `log_dir` when
/// the directory is writable. The previous run's file is renamed aside first. Filter via `RUST_LOG`, default `info`.
pub fn init_service_logging(log_dir: &str, service_name: &str) -> Result<LogGuards, anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    if !can_write_to(log_dir) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(stdout_writer)
                    .with_ansi(true)
                    .with_target(false),
            )
            .try_init()?;

        info!("Logging initialized - console output only (could not write to {log_dir})");
        return Ok(LogGuards {
            _guards: vec![stdout_guard],
        });
    }

    let rotation = rotate_logs_on_startup(log_dir, service_name);

    let (file_writer, file_guard) = tracing_appender::non_blocking(open_log_file(log_dir, service_name));
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(
            fmt::layer()
                .with_writer(stdout_writer)
                .with_ansi(true)
                .with_target(false),
        )
        .try_init()?;

    if let Err(e) = rotation {
        warn!("Could not rotate previous log file: {:#}", e);
    }
    info!("Logging initialized - logs will be written to {log_dir}/{service_name}.log");
    Ok(LogGuards {
        _guards: vec![file_guard, stdout_guard],
    })
}

/// Fixed file name, so the next startup can find it and move it aside.
fn open_log_file(log_dir: &str, service_name: &str) -> RollingFileAppender {
    tracing_appender::rolling::never(log_dir, format!("{service_name}.log"))
}

fn can_write_to(log_dir: &str) -> bool {
    let probe = Path::new(log_dir).join(".write_probe");
    std::fs::create_dir_all(log_dir)
        .and_then(|_| std::fs::File::create(&probe))
        .and_then(|_| std::fs::remove_file(&probe))
        .is_ok()
}

pub fn rotate_logs_on_startup(log_dir: &str, service_name: &str) -> Result<(), anyhow::Error> {
    let log_path = Path::new(log_dir).join(format!("{service_name}.log"));

    if log_path.exists() {
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_path = Path::new(log_dir).join(format!("{service_name}.{timestamp}.log"));

        std::fs::rename(&log_path, &backup_path)?;
        info!("Previous log file backed up to: {}", backup_path.display());
    }

    Ok(())
}
