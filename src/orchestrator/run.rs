//! The two rewrite-and-commit execution strategies: all-or-nothing and
//! partial progress.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::compactlevel;
use crate::error::OrchestratorError;
use crate::planner::{FileGroup, FileGroupInfo, FileGroupResult, ScanTask};
use crate::threadpool::GroupPool;
use crate::util::sleep_millis;

use super::config::OrchestratorConfig;
use super::rewriter::Rewriter;
use super::state::GroupState;

/// How long the committer thread is given to drain and commit every
/// remaining batch once rewriting has finished, before the run is
/// considered fatally stuck.
pub const COMMITTER_TIMEOUT: Duration = Duration::from_secs(600);

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Moves `group_id` to `next` in `states`, checked against
/// [`GroupState::can_transition_to`]. Every state change a run makes to a
/// group goes through here so the lifecycle stays internally consistent.
fn transition(states: &Mutex<HashMap<u64, GroupState>>, group_id: u64, next: GroupState) {
    let mut states = states.lock().unwrap();
    let current = states
        .get(&group_id)
        .copied()
        .unwrap_or(GroupState::Pending);
    debug_assert!(
        current.can_transition_to(next),
        "illegal group state transition for group {group_id}: {current:?} -> {next:?}"
    );
    states.insert(group_id, next);
}

/// Rewrites every dispatched group concurrently (bounded by
/// `config.max_concurrent_groups`), stopping submission at the first
/// failure, aborting every group that had already been written, and
/// surfacing the failure. On success, commits every written group in one
/// atomic call; a commit failure aborts everything written and is
/// surfaced too.
pub fn run_all_or_nothing<T, R>(
    dispatched: Vec<(FileGroupInfo, FileGroup<T>)>,
    rewriter: Arc<R>,
    config: OrchestratorConfig,
) -> Result<HashMap<FileGroupInfo, FileGroupResult>, OrchestratorError>
where
    T: ScanTask,
    R: Rewriter<T>,
{
    let pool = GroupPool::new(config.max_concurrent_groups, config.max_concurrent_groups)
        .expect("max_concurrent_groups was validated to be >= 1");

    let states: Arc<Mutex<HashMap<u64, GroupState>>> = Arc::new(Mutex::new(
        dispatched
            .iter()
            .map(|(info, _)| (info.group_id, GroupState::Pending))
            .collect(),
    ));
    let written: Arc<Mutex<Vec<(FileGroupInfo, FileGroup<T>, Vec<String>)>>> =
        Arc::new(Mutex::new(Vec::new()));
    let failure: Arc<Mutex<Option<(FileGroupInfo, anyhow::Error)>>> = Arc::new(Mutex::new(None));

    for (info, group) in dispatched {
        if failure.lock().unwrap().is_some() {
            break;
        }
        let rewriter = Arc::clone(&rewriter);
        let written = Arc::clone(&written);
        let failure = Arc::clone(&failure);
        let states = Arc::clone(&states);
        let info_for_job = info.clone();
        pool.submit_job(Box::new(move || {
            transition(&states, info_for_job.group_id, GroupState::InFlight);
            match rewriter.rewrite(info_for_job.group_id, &group) {
                Ok(files) => {
                    transition(&states, info_for_job.group_id, GroupState::Written);
                    written.lock().unwrap().push((info_for_job, group, files));
                }
                Err(source) => {
                    transition(&states, info_for_job.group_id, GroupState::Aborted);
                    let mut f = failure.lock().unwrap();
                    if f.is_none() {
                        *f = Some((info_for_job, source));
                    }
                }
            }
        }));
    }

    pool.jobs_completed();

    let failure = Arc::try_unwrap(failure)
        .unwrap_or_else(|_| panic!("all worker jobs have finished"))
        .into_inner()
        .unwrap();
    let written = Arc::try_unwrap(written)
        .unwrap_or_else(|_| panic!("all worker jobs have finished"))
        .into_inner()
        .unwrap();

    if let Some((group, source)) = failure {
        for (info, _group, _files) in &written {
            rewriter.abort(info.group_id);
            transition(&states, info.group_id, GroupState::Aborted);
        }
        compactlevel!(1, "rewrite failed for group {:?}, aborting {} written group(s)", group, written.len());
        return Err(OrchestratorError::RewriteFailed { group, source });
    }

    let ids: Vec<u64> = written.iter().map(|(info, _, _)| info.group_id).collect();
    if let Err(source) = rewriter.commit(&ids) {
        for (info, _, _) in &written {
            rewriter.abort(info.group_id);
            transition(&states, info.group_id, GroupState::Aborted);
        }
        compactlevel!(1, "commit failed, aborting {} written group(s)", written.len());
        return Err(OrchestratorError::CommitFailed { source });
    }

    for (info, _, _) in &written {
        transition(&states, info.group_id, GroupState::Committed);
    }
    compactlevel!(2, "committed {} group(s)", written.len());
    Ok(written
        .into_iter()
        .map(|(info, group, files)| {
            let result = FileGroupResult {
                added_files_count: files.len(),
                rewritten_files_count: group.len(),
            };
            (info, result)
        })
        .collect())
}

/// Rewrites every dispatched group concurrently, recovering individual
/// rewrite failures (aborted and excluded rather than fatal), and commits
/// successfully-rewritten groups in batches of
/// `ceil(totalGroups / maxCommits)` as they complete. A failing commit
/// batch is dropped; its groups are simply absent from the result. Returns
/// once the single-threaded committer has drained every batch, or fails
/// fatally if it does not do so within [`COMMITTER_TIMEOUT`].
pub fn run_partial_progress<T, R>(
    dispatched: Vec<(FileGroupInfo, FileGroup<T>)>,
    rewriter: Arc<R>,
    config: OrchestratorConfig,
) -> Result<HashMap<FileGroupInfo, FileGroupResult>, OrchestratorError>
where
    T: ScanTask,
    R: Rewriter<T>,
{
    let total_groups = dispatched.len();
    if total_groups == 0 {
        return Ok(HashMap::new());
    }
    let groups_per_commit = ceil_div(total_groups, config.max_commits.max(1));

    let states: Arc<Mutex<HashMap<u64, GroupState>>> = Arc::new(Mutex::new(
        dispatched
            .iter()
            .map(|(info, _)| (info.group_id, GroupState::Pending))
            .collect(),
    ));
    let (tx, rx) = crossbeam_channel::unbounded::<(FileGroupInfo, FileGroup<T>, Vec<String>)>();
    let results: Arc<Mutex<HashMap<FileGroupInfo, FileGroupResult>>> =
        Arc::new(Mutex::new(HashMap::new()));
    let rewriting_finished = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);

    let committer_handle = {
        let rewriter = Arc::clone(&rewriter);
        let results = Arc::clone(&results);
        let rewriting_finished = Arc::clone(&rewriting_finished);
        let states = Arc::clone(&states);
        thread::spawn(move || {
            let mut buffer: Vec<(FileGroupInfo, FileGroup<T>, Vec<String>)> = Vec::new();
            loop {
                while let Ok(item) = rx.try_recv() {
                    buffer.push(item);
                }

                let finished = rewriting_finished.load(Ordering::Acquire);
                if buffer.len() > groups_per_commit || (finished && !buffer.is_empty()) {
                    let take = groups_per_commit.min(buffer.len());
                    let batch: Vec<_> = buffer.drain(..take).collect();
                    let ids: Vec<u64> = batch.iter().map(|(info, _, _)| info.group_id).collect();
                    match rewriter.commit(&ids) {
                        Ok(()) => {
                            let mut r = results.lock().unwrap();
                            for (info, group, files) in batch {
                                transition(&states, info.group_id, GroupState::Committed);
                                r.insert(
                                    info,
                                    FileGroupResult {
                                        added_files_count: files.len(),
                                        rewritten_files_count: group.len(),
                                    },
                                );
                            }
                            compactlevel!(2, "committed batch of {} group(s)", ids.len());
                        }
                        Err(source) => {
                            for id in &ids {
                                transition(&states, *id, GroupState::Abandoned);
                            }
                            compactlevel!(1, "commit batch of {} group(s) failed, dropping: {source}", ids.len());
                        }
                    }
                    continue;
                }

                if finished && buffer.is_empty() {
                    break;
                }

                sleep_millis(5);
            }
            let _ = done_tx.send(());
        })
    };

    let pool = GroupPool::new(config.max_concurrent_groups, config.max_concurrent_groups)
        .expect("max_concurrent_groups was validated to be >= 1");

    for (info, group) in dispatched {
        let rewriter = Arc::clone(&rewriter);
        let tx = tx.clone();
        let states = Arc::clone(&states);
        let info_for_job = info.clone();
        pool.submit_job(Box::new(move || {
            transition(&states, info_for_job.group_id, GroupState::InFlight);
            match rewriter.rewrite(info_for_job.group_id, &group) {
                Ok(files) => {
                    transition(&states, info_for_job.group_id, GroupState::Written);
                    let _ = tx.send((info_for_job, group, files));
                }
                Err(source) => {
                    transition(&states, info_for_job.group_id, GroupState::Aborted);
                    compactlevel!(
                        1,
                        "rewrite failed for group {:?}, excluding from this run: {source}",
                        info_for_job
                    );
                    rewriter.abort(info_for_job.group_id);
                }
            }
        }));
    }
    pool.jobs_completed();
    drop(tx);
    rewriting_finished.store(true, Ordering::Release);

    if done_rx.recv_timeout(COMMITTER_TIMEOUT).is_err() {
        return Err(OrchestratorError::CommitterTimeout);
    }
    let _ = committer_handle.join();

    Ok(Arc::try_unwrap(results)
        .unwrap_or_else(|_| panic!("committer thread has exited"))
        .into_inner()
        .unwrap())
}
