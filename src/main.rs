//! msgtree binary entrypoint: logging setup and argument dispatch.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

/// Log timestamp in local time, e.g. `2025-01-31-T 14:05:09`.
struct MsgtreeTimer;

impl tracing_subscriber::fmt::time::FormatTime for MsgtreeTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking file writer flushing until exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the tracing subscriber.
///
/// Details:
/// - `RUST_LOG` wins over `--log-level` / `--verbose`
/// - Logs go to `--log-file` when it can be opened, stderr otherwise
fn init_logging(args: &args::Args) {
    let level = args::determine_log_level(args);
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level))
    };

    if let Some(path) = &args.log_file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(MsgtreeTimer)
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %path.display(), "logging initialized");
                return;
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_timer(MsgtreeTimer)
                    .init();
                tracing::warn!(error = %e, "failed to open log file; using stderr");
                return;
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(MsgtreeTimer)
        .init();
}

fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args);

    match args::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "msgtree failed");
            eprintln!("msgtree: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: `FormatTime` impl writes a non-empty timestamp without panicking.
    fn msgtree_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let _ = super::MsgtreeTimer.format_time(&mut writer);
        assert!(buf.contains("-T "));
    }
}
