//! Tracing and logging setup shared by the binaries.

/// Initialize process-wide structured logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_DIRECTIVES);
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
