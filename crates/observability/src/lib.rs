//! Process-wide tracing setup shared by the nexus binaries.

/// Tracing subscriber configuration (filters, layers, writer).
pub mod tracing;

/// Initialize process-wide tracing with `default_filter` as the fallback
/// directive when `RUST_LOG` is unset.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}
