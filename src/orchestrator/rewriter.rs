//! The external collaborator contract the orchestrator drives.

use crate::planner::{FileGroup, ScanTask};

/// Performs the actual file I/O the orchestrator schedules: writing new
/// files for a group, committing a batch of finished groups, and aborting
/// an abandoned one.
///
/// Implementations may block the calling thread and may fail; the
/// orchestrator treats every method as potentially slow and potentially
/// fallible. `commit` must be atomic: either every named group's new files
/// become visible or none do. `abort` must be idempotent and is expected to
/// suppress its own errors internally where possible, since the caller only
/// logs abort failures rather than propagating them.
pub trait Rewriter<T: ScanTask>: Send + Sync + 'static {
    /// Rewrites the scan tasks in `group` into one or more new files,
    /// returning their descriptors (e.g. paths).
    fn rewrite(&self, group_id: u64, group: &FileGroup<T>) -> anyhow::Result<Vec<String>>;

    /// Atomically commits the named groups: their new files become part of
    /// the table and their rewritten inputs are retired.
    fn commit(&self, group_ids: &[u64]) -> anyhow::Result<()>;

    /// Best-effort cleanup of a group that will never be committed.
    fn abort(&self, group_id: u64);
}
