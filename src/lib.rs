//! Z-order byte codec and bin-pack compaction planner/orchestrator core.
//!
//! This crate covers the compute-only core of a table-format compaction
//! subsystem: turning a stream of scan tasks into bin-packed rewrite groups
//! ([`planner`]), driving those groups through a pluggable rewriter to
//! completion ([`orchestrator`]), and encoding sort keys in an
//! order-preserving byte form suitable for Z-order clustering ([`codec`]).
//! Catalog access, distributed commit coordination, and query planning are
//! out of scope; the [`orchestrator::Rewriter`] trait is the seam where a
//! caller plugs those concerns in.

use std::collections::HashMap;
use std::sync::Arc;

pub mod codec;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod planner;
pub mod threadpool;
pub mod util;

pub use error::{CompactError, ConfigError, OrchestratorError, Result};
pub use orchestrator::{run_all_or_nothing, run_partial_progress, OrchestratorConfig, Rewriter};
pub use planner::{
    plan_all_partitions, FileGroup, FileGroupInfo, FileGroupResult, PlannerConfig, ScanTask,
    SimpleScanTask,
};

/// Validates `orchestrator_config`, then dispatches `dispatched` through
/// [`run_all_or_nothing`] or [`run_partial_progress`] depending on
/// `orchestrator_config.partial_progress_enabled`.
///
/// The single entry point that can fail with either a configuration error or
/// an orchestrator error, which is why it returns the aggregate
/// [`CompactError`] rather than either error type alone.
pub fn compact<T, R>(
    dispatched: Vec<(FileGroupInfo, FileGroup<T>)>,
    rewriter: Arc<R>,
    orchestrator_config: OrchestratorConfig,
) -> Result<HashMap<FileGroupInfo, FileGroupResult>>
where
    T: ScanTask,
    R: Rewriter<T>,
{
    orchestrator_config.validate()?;
    let results = if orchestrator_config.partial_progress_enabled {
        run_partial_progress(dispatched, rewriter, orchestrator_config)?
    } else {
        run_all_or_nothing(dispatched, rewriter, orchestrator_config)?
    };
    Ok(results)
}
