//! Scan tasks, file groups, and the identifiers that track them through
//! planning and rewriting.

use std::sync::atomic::{AtomicU64, Ordering};

/// An opaque, file-scoped read unit to be considered for compaction.
///
/// Immutable, with an observable `length` in bytes and an opaque
/// `partition` key. Partitions are represented as plain strings — the
/// planner and orchestrator never interpret their structure,
/// only compare them for equality and use them to group and order output,
/// so a canonicalized string (e.g. `"year=2024/month=01"`) stands in for
/// whatever partition-value representation the surrounding catalog uses.
pub trait ScanTask: Clone + Send + Sync + 'static {
    /// Size of this scan task's underlying data, in bytes.
    fn length(&self) -> u64;

    /// The partition this task belongs to.
    fn partition(&self) -> &str;
}

/// A minimal [`ScanTask`] implementation used by tests and the
/// demonstration binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleScanTask {
    pub id: String,
    pub length: u64,
    pub partition: String,
}

impl SimpleScanTask {
    pub fn new(id: impl Into<String>, length: u64, partition: impl Into<String>) -> Self {
        SimpleScanTask {
            id: id.into(),
            length,
            partition: partition.into(),
        }
    }
}

impl ScanTask for SimpleScanTask {
    fn length(&self) -> u64 {
        self.length
    }

    fn partition(&self) -> &str {
        &self.partition
    }
}

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a fresh, process-unique group identifier.
pub fn next_group_id() -> u64 {
    NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed)
}

/// A finite ordered sequence of [`ScanTask`]s belonging to one partition.
/// The planner upholds the invariant that the sum of member lengths is at
/// most `maxGroupSize`, except for a single oversize task which forms its
/// own group.
#[derive(Debug, Clone)]
pub struct FileGroup<T: ScanTask> {
    pub partition: String,
    pub tasks: Vec<T>,
}

impl<T: ScanTask> FileGroup<T> {
    pub fn new(partition: String, tasks: Vec<T>) -> Self {
        FileGroup { partition, tasks }
    }

    /// Sum of member task lengths.
    pub fn total_size(&self) -> u64 {
        self.tasks.iter().map(|t| t.length()).sum()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Metadata attached to an emitted [`FileGroup`] once it is handed to the
/// orchestrator for rewriting. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileGroupInfo {
    /// Fresh unique identifier, stable for the lifetime of this group.
    pub group_id: u64,
    /// 1-based index across all groups in dispatch order.
    pub global_index: usize,
    /// 1-based index within this group's partition, in dispatch order.
    pub partition_index: usize,
    pub partition: String,
}

/// Outcome of successfully rewriting a [`FileGroup`]. Produced by the
/// rewriter and attached to its [`FileGroupInfo`] in the final result map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileGroupResult {
    pub added_files_count: usize,
    pub rewritten_files_count: usize,
}
