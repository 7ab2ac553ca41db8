//! Logging infrastructure for frame conversion.
//!
//! Every event is emitted through `tracing` under the target "flightframe"
//! and carries an `event` field for filtering.
//!
//! ## Library Integration
//!
//! The crate never installs a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem emitting the event ("frame", "copy", "fault")
//! - Use `%` for Display, `?` for Debug formatting
//! - Row-level events are never emitted; one event per column at most

/// Target for all flightframe log events.
pub(crate) const FRAME_TARGET: &str = "flightframe";

/// Macro for info-level log events.
///
/// # Example
/// ```ignore
/// log_info!(
///     component = "frame",
///     event = "frame_allocated",
///     columns = fields.len(),
/// );
/// ```
macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::FRAME_TARGET, $($field)*)
    };
}

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::FRAME_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::FRAME_TARGET, $($field)*)
    };
}

/// Macro for error-level log events.
macro_rules! log_error {
    ($($field:tt)*) => {
        ::tracing::error!(target: $crate::observability::FRAME_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_error;
pub(crate) use log_info;
pub(crate) use log_warn;
