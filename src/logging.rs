//! Logging setup

use tracing::info;

/// Install the fmt subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if std::env::var("HUGOPANE_DEBUG").is_ok() {
        "hugopane=trace,pane_core=trace,pane_gtk4=debug,info"
    } else {
        "hugopane=info,pane_core=info,pane_gtk4=info,warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(filter)
        .init();

    info!("hugopane v{} starting up", env!("CARGO_PKG_VERSION"));
}
