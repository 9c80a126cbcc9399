use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact, human readable lines.
    Compact,
    /// One JSON object per event.
    Json,
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `default_directive` (e.g. `debug` or `info,h2=warn`)
pub fn init_logging_default(default_directive: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Span fields (`op`, `email`, `app_id`, ...) are flattened into every event
/// so log lines can be correlated per RPC.
pub fn init_logging_json(default_directive: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(io::stdout)
        .try_init();
}

/// Install the global subscriber in the requested format.
pub fn init_logging(format: LogFormat, default_directive: &str) {
    match format {
        LogFormat::Compact => init_logging_default(default_directive),
        LogFormat::Json => init_logging_json(default_directive),
    }
}
