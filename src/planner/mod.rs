//! Bin-pack compaction planner.
//!
//! Turns a stream of [`ScanTask`]s into a set of [`FileGroup`]s ready for
//! rewriting, applying the selection/grouping/filtering pipeline in
//! [`binpack`] and the output-file sizing policy in [`sizing`].
//!
//! Submodules:
//! - [`task`]    — `ScanTask`, `FileGroup`, `FileGroupInfo`, `FileGroupResult`
//! - [`config`]  — `PlannerConfig` and its option parsing/validation
//! - [`binpack`] — selection, packing, filtering
//! - [`sizing`]  — output file count and split size rounding policy

pub mod binpack;
pub mod config;
pub mod sizing;
pub mod task;

pub use binpack::{pack_groups, plan_all_partitions, plan_partition, select_files_to_rewrite};
pub use config::{PlannerConfig, DEFAULT_MAX_GROUP_SIZE_BYTES};
pub use sizing::{num_output_files, split_size, write_max_file_size};
pub use task::{next_group_id, FileGroup, FileGroupInfo, FileGroupResult, ScanTask, SimpleScanTask};
