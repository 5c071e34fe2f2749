//! Tracing/logging setup shared by every portal entry point.

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Output::Json);
}

/// Initialize process-wide logging with human-readable output.
pub fn init_pretty() {
    tracing::init(tracing::Output::Pretty);
}
