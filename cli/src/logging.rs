//! Log output for the command-line tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber. `-v` raises the level from WARN.
///
/// `RUST_LOG` directives are honored in addition to the verbosity level.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
