//! Tracing setup for the `fontprune` binary
//!
//! Filtering follows `RUST_LOG` (default `warn`, so the report stays the only
//! stdout output). `FONTPRUNE_LOG_FORMAT=json` switches to structured lines.
//! Logs always go to stderr.

use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_standard_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("FONTPRUNE_LOG_FORMAT")
        .unwrap_or_default()
        .to_lowercase();

    if log_format == "json" {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(json_layer.with_filter(filter))
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .compact()
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(
                fmt_layer
                    .with_timer(tracing_subscriber::fmt::time::SystemTime)
                    .with_filter(filter),
            )
            .init();
    }
}
