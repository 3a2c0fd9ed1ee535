use std::io;

use tracing::metadata::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initializes the tracing system. Logs go to stderr so that stdout stays
/// free for image output.
pub fn setup_tracing(verbosity: u8) {
    // Short circuit if we don't need to initialize debugging.
    if verbosity == 0 {
        tracing_subscriber::fmt()
            .without_time()
            .with_writer(io::stderr)
            .with_max_level(LevelFilter::OFF)
            .init();
        return;
    }

    // Build the FMT layer printing to the console.
    let fmt_layer = fmt::Layer::default()
        .without_time()
        .with_writer(io::stderr)
        .with_filter(level_filter(verbosity));

    // Error layer for building backtraces
    let error_layer = ErrorLayer::default();

    tracing_subscriber::registry().with(fmt_layer).with(error_layer).init();
}

/// Returns the log level filter for the given verbosity level.
fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
