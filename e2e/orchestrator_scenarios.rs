// Orchestrator scenarios: all-or-nothing happy path and failure, partial
// progress batching and partial-batch-failure, run end to end through the
// public API with a fake in-memory rewriter.

use std::sync::{Arc, Mutex};

use compactcore::orchestrator::{
    dispatch_order, run_all_or_nothing, run_partial_progress, OrchestratorConfig, Rewriter,
};
use compactcore::planner::{FileGroup, FileGroupInfo, SimpleScanTask};
use compactcore::OrchestratorError;

/// Records every call it receives; fails rewrites for configured group ids
/// and can be told to fail its first N commit calls.
struct FakeRewriter {
    commits: Mutex<Vec<Vec<u64>>>,
    aborts: Mutex<Vec<u64>>,
    fail_rewrites: Vec<u64>,
    remaining_commit_failures: Mutex<usize>,
}

impl FakeRewriter {
    fn new() -> Self {
        FakeRewriter {
            commits: Mutex::new(Vec::new()),
            aborts: Mutex::new(Vec::new()),
            fail_rewrites: Vec::new(),
            remaining_commit_failures: Mutex::new(0),
        }
    }

    fn failing_rewrites(mut self, ids: Vec<u64>) -> Self {
        self.fail_rewrites = ids;
        self
    }

    fn failing_commits(self, n: usize) -> Self {
        *self.remaining_commit_failures.lock().unwrap() = n;
        self
    }
}

impl Rewriter<SimpleScanTask> for FakeRewriter {
    fn rewrite(&self, group_id: u64, group: &FileGroup<SimpleScanTask>) -> anyhow::Result<Vec<String>> {
        if self.fail_rewrites.contains(&group_id) {
            anyhow::bail!("rewrite refused for group {group_id}");
        }
        Ok(vec![format!("group-{group_id}.parquet"); group.len()])
    }

    fn commit(&self, group_ids: &[u64]) -> anyhow::Result<()> {
        let mut remaining = self.remaining_commit_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            anyhow::bail!("commit refused");
        }
        self.commits.lock().unwrap().push(group_ids.to_vec());
        Ok(())
    }

    fn abort(&self, group_id: u64) {
        self.aborts.lock().unwrap().push(group_id);
    }
}

fn groups_of(count: usize, partition: &str) -> Vec<(FileGroupInfo, FileGroup<SimpleScanTask>)> {
    let planned = vec![(
        partition.to_string(),
        (0..count)
            .map(|i| {
                FileGroup::new(
                    partition.to_string(),
                    vec![SimpleScanTask::new(format!("{partition}-{i}"), 10, partition)],
                )
            })
            .collect(),
    )];
    dispatch_order(planned)
}

#[test]
fn scenario_all_or_nothing_happy_path_commits_all_three_groups_once() {
    let dispatched = groups_of(3, "p");
    let rewriter = Arc::new(FakeRewriter::new());
    let config = OrchestratorConfig::new(3);

    let results = run_all_or_nothing(dispatched, Arc::clone(&rewriter), config).unwrap();

    assert_eq!(results.len(), 3);
    let commits = rewriter.commits.lock().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].len(), 3);
}

#[test]
fn scenario_all_or_nothing_rewrite_failure_aborts_completed_groups_and_surfaces() {
    let dispatched = groups_of(3, "p");
    let failing_id = dispatched[2].0.group_id;
    let rewriter = Arc::new(FakeRewriter::new().failing_rewrites(vec![failing_id]));
    let config = OrchestratorConfig::new(2);

    let err = run_all_or_nothing(dispatched, Arc::clone(&rewriter), config).unwrap_err();

    // Worker execution order across groups is unspecified, so only the
    // groups written before the failure was observed get aborted — that
    // count can vary, but no commit must ever happen once any rewrite has
    // failed.
    assert!(matches!(err, OrchestratorError::RewriteFailed { .. }));
    assert!(rewriter.commits.lock().unwrap().is_empty());
    assert!(rewriter.aborts.lock().unwrap().len() <= 2);
}

#[test]
fn scenario_partial_progress_four_groups_two_commits_of_two() {
    let dispatched = groups_of(4, "p");
    let rewriter = Arc::new(FakeRewriter::new());
    let config = OrchestratorConfig::new(4).with_partial_progress(2);

    let results = run_partial_progress(dispatched, Arc::clone(&rewriter), config).unwrap();

    assert_eq!(results.len(), 4);
    let commits = rewriter.commits.lock().unwrap();
    assert_eq!(commits.len(), 2);
    assert!(commits.iter().all(|batch| batch.len() == 2));
}

#[test]
fn scenario_partial_progress_failing_commit_batch_yields_results_from_surviving_batch_only() {
    let dispatched = groups_of(4, "p");
    let rewriter = Arc::new(FakeRewriter::new().failing_commits(1));
    let config = OrchestratorConfig::new(4).with_partial_progress(2);

    let results = run_partial_progress(dispatched, Arc::clone(&rewriter), config).unwrap();

    assert_eq!(results.len(), 2);
}
