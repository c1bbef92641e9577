//! Demonstration CLI: plans a bin-pack compaction over a directory of files
//! and, optionally, drives it through the orchestrator with a rewriter that
//! copies each group's files into an output directory.
//!
//! This binary exists to exercise [`compactcore`] end to end; it is not
//! part of the library's public contract.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use walkdir::WalkDir;

use compactcore::orchestrator::{OrchestratorConfig, Rewriter};
use compactcore::planner::{plan_all_partitions, FileGroup, PlannerConfig, SimpleScanTask};
use compactcore::util::default_concurrency;

/// Plans (and optionally executes) a bin-pack compaction over files under a directory.
#[derive(Parser, Debug)]
#[command(name = "compactplan", author, version, about)]
struct Cli {
    /// Root directory to scan for files. Each immediate subdirectory under
    /// this root is treated as a partition; files directly under the root
    /// form a single partition named `"root"`.
    directory: PathBuf,

    /// Target size, in bytes, for each rewritten output file.
    #[arg(long)]
    target_file_size_bytes: u64,

    /// Below this size (bytes) a file is eligible for rewriting. Defaults
    /// to 0.75x the target size.
    #[arg(long)]
    min_file_size_bytes: Option<u64>,

    /// Above this size (bytes) a file is eligible for rewriting. Defaults
    /// to 1.80x the target size.
    #[arg(long)]
    max_file_size_bytes: Option<u64>,

    /// Minimum number of files a group must contain to be worth rewriting,
    /// unless its total size already exceeds the target.
    #[arg(long)]
    min_input_files: Option<usize>,

    /// Upper bound, in bytes, on a single rewrite group's total size.
    #[arg(long)]
    max_file_group_size_bytes: Option<u64>,

    /// Actually rewrite each planned group by copying its files into this
    /// directory, exercising the orchestrator. If omitted, only the plan is
    /// printed.
    #[arg(long)]
    execute_into: Option<PathBuf>,

    /// Number of rewrite groups to process concurrently when `--execute-into`
    /// is given. Defaults to the number of physical cores.
    #[arg(long, default_value_t = default_concurrency())]
    max_concurrent_groups: usize,

    /// Commit groups as they complete, in batches, instead of all-or-nothing.
    #[arg(long)]
    partial_progress: bool,

    /// Number of commit batches when `--partial-progress` is set.
    #[arg(long, default_value_t = 1)]
    max_commits: usize,

    /// Notification verbosity: 0 silent, 1 errors, 2 outcomes (default), 3+ detail.
    #[arg(long, default_value_t = 2)]
    notification_level: i32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    compactcore::logging::set_notification_level(cli.notification_level);

    let mut config = PlannerConfig::with_target(cli.target_file_size_bytes);
    if let Some(v) = cli.min_file_size_bytes {
        config.min_file_size = v;
    }
    if let Some(v) = cli.max_file_size_bytes {
        config.max_file_size = v;
    }
    if let Some(v) = cli.min_input_files {
        config.min_input_files = v;
    }
    if let Some(v) = cli.max_file_group_size_bytes {
        config.max_group_size = v;
    }
    config
        .validate()
        .context("planner configuration is invalid")?;

    let tasks = scan_directory(&cli.directory)?;
    compactlevel_info(&format!("scanned {} file(s) under {}", tasks.len(), cli.directory.display()));

    let planned = plan_all_partitions(tasks, &config);
    let total_groups: usize = planned.iter().map(|(_, groups)| groups.len()).sum();
    compactlevel_info(&format!("planned {total_groups} rewrite group(s) across {} partition(s)", planned.len()));

    for (partition, groups) in &planned {
        for (i, group) in groups.iter().enumerate() {
            println!(
                "partition={partition} group#{i} files={} total_bytes={}",
                group.len(),
                group.total_size()
            );
        }
    }

    let Some(output_dir) = cli.execute_into else {
        return Ok(());
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let orchestrator_config = if cli.partial_progress {
        OrchestratorConfig::new(cli.max_concurrent_groups).with_partial_progress(cli.max_commits)
    } else {
        OrchestratorConfig::new(cli.max_concurrent_groups)
    };

    let dispatched = compactcore::orchestrator::dispatch_order(planned);
    let rewriter = Arc::new(CopyRewriter::new(output_dir));

    let results = compactcore::compact(dispatched, rewriter, orchestrator_config)
        .context("compaction run failed")?;

    print_results(&results);
    Ok(())
}

fn compactlevel_info(msg: &str) {
    compactcore::compactlevel!(2, "{msg}");
}

fn print_results(
    results: &HashMap<compactcore::FileGroupInfo, compactcore::FileGroupResult>,
) {
    println!("committed {} group(s)", results.len());
    for (info, result) in results {
        println!(
            "  group_id={} partition={} added_files={} rewritten_files={}",
            info.group_id, info.partition, result.added_files_count, result.rewritten_files_count
        );
    }
}

/// Walks `root` one level deep: immediate subdirectories become partitions;
/// files directly under `root` fall into the `"root"` partition.
fn scan_directory(root: &Path) -> Result<Vec<SimpleScanTask>> {
    let mut tasks = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let length = compactcore::util::get_file_size(entry.path());
        let partition = entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(|rel| rel.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        tasks.push(SimpleScanTask::new(
            entry.path().to_string_lossy().into_owned(),
            length,
            partition,
        ));
    }
    Ok(tasks)
}

/// A [`Rewriter`] that "rewrites" a group by concatenating its member files
/// into one new file under `output_dir`, named after the group id.
struct CopyRewriter {
    output_dir: PathBuf,
}

impl CopyRewriter {
    fn new(output_dir: PathBuf) -> Self {
        CopyRewriter { output_dir }
    }
}

impl Rewriter<SimpleScanTask> for CopyRewriter {
    fn rewrite(
        &self,
        group_id: u64,
        group: &FileGroup<SimpleScanTask>,
    ) -> anyhow::Result<Vec<String>> {
        let out_path = self.output_dir.join(format!("group-{group_id}.bin"));
        let mut out = Vec::new();
        for task in &group.tasks {
            let bytes = std::fs::read(&task.id)
                .with_context(|| format!("reading {} for group {group_id}", task.id))?;
            out.extend(bytes);
        }
        std::fs::write(&out_path, &out)
            .with_context(|| format!("writing {}", out_path.display()))?;
        Ok(vec![out_path.to_string_lossy().into_owned()])
    }

    fn commit(&self, group_ids: &[u64]) -> anyhow::Result<()> {
        compactlevel_info(&format!("committing group(s): {group_ids:?}"));
        Ok(())
    }

    fn abort(&self, group_id: u64) {
        let path = self.output_dir.join(format!("group-{group_id}.bin"));
        let _ = std::fs::remove_file(path);
    }
}
