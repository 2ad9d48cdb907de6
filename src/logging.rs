//! Tracing subscriber setup

use crate::cli::LogLevel;

/// Install the global fmt subscriber for the chosen verbosity.
///
/// Per-event output (g-shift changes, executed commands) is emitted at
/// `debug`, lifecycle messages at `info` and failures at `warn`/`error`.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(level.level_filter())
        .with_target(false)
        .init();
}

/// Startup advice about how the mouse should be configured
pub fn print_banner() {
    tracing::info!("Starting G600 Linux controller.");
    tracing::info!(
        "It's a good idea to configure G600 with Logitech Gaming Software before running this program:"
    );
    tracing::info!(
        " - assign left, right, middle mouse button and vertical mouse wheel to their normal functions"
    );
    tracing::info!(" - assign the G-Shift button to \"G-Shift\"");
    tracing::info!(
        " - assign all other keys (including horizontal mouse wheel) to arbitrary (unique) keyboard keys"
    );
}
