//! Fixed-size rewrite worker pool with a bounded in-flight job limit.
//!
//! The orchestrator (`orchestrator::run`) needs a worker pool sized to
//! exactly `maxConcurrentGroups` plus a way to block until all submitted
//! jobs have drained, without shutting the pool down in between —
//! `rayon::ThreadPool::spawn` alone gives neither a concurrency cap nor a
//! drain barrier, so this wraps it with a `crossbeam_channel::bounded`
//! semaphore channel and a condvar-guarded pending counter.

use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::ThreadPool as RayonPool;
use std::sync::{Arc, Condvar, Mutex};

type JobFn = Box<dyn FnOnce() + Send + 'static>;

struct PoolState {
    pending: usize,
}

/// Bounded worker pool: at most `nb_threads` jobs run concurrently, and at
/// most `nb_threads + queue_size` jobs may be queued-or-running at once —
/// `submit_job` blocks once that capacity is exhausted.
pub struct GroupPool {
    pool: Arc<RayonPool>,
    /// Acts as a semaphore: a token must be acquired before a job is posted
    /// and is returned by the job on completion.
    slot_tx: Sender<()>,
    slot_rx: Receiver<()>,
    state: Arc<(Mutex<PoolState>, Condvar)>,
}

impl GroupPool {
    /// Builds a pool with `nb_threads` workers and room for `queue_size`
    /// additional jobs beyond those actively running. Returns `None` if
    /// either argument is zero or the underlying rayon pool fails to start.
    pub fn new(nb_threads: usize, queue_size: usize) -> Option<Self> {
        if nb_threads < 1 || queue_size < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .build()
            .ok()?;

        let capacity = queue_size + nb_threads;
        let (slot_tx, slot_rx) = bounded(capacity);
        for _ in 0..capacity {
            slot_tx.send(()).ok()?;
        }

        let state = Arc::new((Mutex::new(PoolState { pending: 0 }), Condvar::new()));

        Some(GroupPool {
            pool: Arc::new(pool),
            slot_tx,
            slot_rx,
            state,
        })
    }

    /// Submits `job` for execution, blocking the caller if the pool is
    /// already at capacity.
    pub fn submit_job(&self, job: JobFn) {
        self.slot_rx.recv().expect("worker pool slot channel closed");

        {
            let (lock, _cvar) = &*self.state;
            let mut s = lock.lock().unwrap();
            s.pending += 1;
        }

        let state = Arc::clone(&self.state);
        let slot_tx = self.slot_tx.clone();
        self.pool.spawn(move || {
            job();

            let (lock, cvar) = &*state;
            let mut s = lock.lock().unwrap();
            s.pending -= 1;
            if s.pending == 0 {
                cvar.notify_all();
            }
            let _ = slot_tx.send(());
        });
    }

    /// Blocks until every job submitted so far has finished. The pool
    /// remains usable afterwards.
    pub fn jobs_completed(&self) {
        let (lock, cvar) = &*self.state;
        let mut s = lock.lock().unwrap();
        while s.pending > 0 {
            s = cvar.wait(s).unwrap();
        }
    }
}

impl Drop for GroupPool {
    fn drop(&mut self) {
        self.jobs_completed();
    }
}
