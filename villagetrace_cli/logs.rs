use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up logging to stderr and to a daily rotating file in `logs/`.
///
/// Log levels are controlled by `RUST_LOG`, defaulting to `info` for everything
/// and `debug` for the villagetrace crates. Stdout is left to the reconstruction
/// output so it can be piped.
///
/// The returned guard flushes the file writer when dropped, keep it alive until exit.
pub fn setup_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "villagetrace.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);

    let default_filter = "info,villagetrace=debug";

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
