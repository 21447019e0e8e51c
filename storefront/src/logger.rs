//! Logging Infrastructure
//!
//! Console logging through `tracing-subscriber`. `RUST_LOG` takes precedence
//! over the configured level; JSON output is meant for log collectors.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level used when `RUST_LOG` is unset (e.g., "info", "debug")
/// * `json_format` - Emit JSON lines instead of human-readable output
///
/// # Examples
/// ```no_run
/// storefront::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer().with_target(true).with_thread_ids(false);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
