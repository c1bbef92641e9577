//! Cross-cutting utility functions shared by the planner, orchestrator, and
//! the demonstration CLI.
//!
//! Submodules:
//! - [`cores`]     — CPU core counting via [`std::thread::available_parallelism`]
//! - [`file_size`] — file size queries (`get_file_size`, `get_open_file_size`,
//!                   `get_total_file_size`), used by the demonstration binary
//!                   to turn real files into [`crate::planner::ScanTask`]s.
//!
//! The most commonly needed symbols are re-exported at the `util` module level.

pub mod cores;
pub mod file_size;

pub use cores::count_cores;
pub use file_size::{get_file_size, get_open_file_size, get_total_file_size};

/// Default rewrite concurrency: one group per physical core.
///
/// Physical rather than logical core count, since each in-flight group
/// drives CPU-bound encode work rather than I/O-bound waiting.
pub fn default_concurrency() -> usize {
    num_cpus::get_physical()
}

// ── Sleep helpers ─────────────────────────────────────────────────────────────
// Used by the orchestrator's committer loop as its poll-interval yield
// between drain attempts.

/// Blocks the current thread for `millis` milliseconds.
pub fn sleep_millis(millis: u64) {
    std::thread::sleep(std::time::Duration::from_millis(millis));
}
