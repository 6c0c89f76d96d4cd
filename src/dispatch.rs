//! Parallel export phase.
//!
//! A fixed pool of detached worker threads drains an unbounded queue of
//! glyph jobs. Worker threads never keep the process alive by themselves;
//! the caller blocks on a oneshot completion channel that the task
//! observing the work counter's zero transition resolves. Decrement and
//! check is a single atomic `fetch_sub`, so exactly one task sees the
//! transition.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use log::{error, info};
use tokio::sync::oneshot;

use crate::center::render_centered;
use crate::error::{Error, Result};
use crate::export::export_canvas;
use crate::jobs::BuiltRun;
use crate::report::code_point_report;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Worker threads per pool: at least the core count, never more than four
/// times it.
pub fn clamp_workers(requested: Option<usize>) -> usize {
    let cores = num_cpus::get().max(1);
    match requested {
        Some(n) => n.clamp(cores, cores * 4),
        None => cores,
    }
}

/// Fixed-size pool over an unbounded queue. Threads are detached: once
/// the queue sender drops and drains, they exit on their own.
pub struct WorkerPool {
    tx: mpsc::Sender<Job>,
    workers: usize,
}

impl WorkerPool {
    /// Spawn a pool. Failure to obtain threads is a configuration-level
    /// fatal condition; no degraded pool is returned.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));
        for i in 0..workers {
            let rx = Arc::clone(&rx);
            thread::Builder::new()
                .name(format!("charpix-worker-{i}"))
                .spawn(move || loop {
                    let job = match rx.lock() {
                        Ok(guard) => guard.recv(),
                        Err(_) => break,
                    };
                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                })
                .map_err(|e| Error::Dispatch(format!("could not spawn worker: {e}")))?;
        }
        Ok(Self { tx, workers })
    }

    pub fn with_default_size() -> Result<Self> {
        Self::new(clamp_workers(None))
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queue a job. The queue is unbounded, so refusal only happens when
    /// every worker is gone; that is a fatal condition, not silent drop.
    pub fn submit(&self, job: Job) -> Result<()> {
        self.tx
            .send(job)
            .map_err(|_| Error::Dispatch("worker queue is disconnected".to_string()))
    }
}

/// End-of-run accounting, emitted exactly once per batch.
#[derive(Debug)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub files_attempted: usize,
    pub failed_writes: usize,
    pub no_font: Vec<u32>,
    pub no_image: Vec<u32>,
}

/// Dispatch an already-built run onto the pool. Returns the completion
/// channel; the summary arrives when the last task decrements the work
/// counter to zero. The entire task set is queued before returning, and
/// the counter was initialized to the full task count before any task ran.
pub fn dispatch_run(
    pool: &WorkerPool,
    built: BuiltRun,
    start: Instant,
) -> Result<oneshot::Receiver<RunSummary>> {
    let (done_tx, done_rx) = oneshot::channel();

    let (width, height) = (built.width, built.height);
    let task_count = built.task_count;
    let no_font = Arc::new(built.no_font);
    let no_image = Arc::new(built.no_image);

    if task_count == 0 {
        // Nothing to drain; resolve immediately instead of hanging.
        emit_summary(start, 0, 0, &no_font, &no_image, Some(done_tx));
        return Ok(done_rx);
    }

    let counter = Arc::new(AtomicUsize::new(task_count));
    let failed = Arc::new(AtomicUsize::new(0));
    let done_tx = Arc::new(Mutex::new(Some(done_tx)));

    for job in built.jobs {
        let counter = Arc::clone(&counter);
        let failed = Arc::clone(&failed);
        let no_font = Arc::clone(&no_font);
        let no_image = Arc::clone(&no_image);
        let done_tx = Arc::clone(&done_tx);

        pool.submit(Box::new(move || {
            for task in job.tasks {
                let canvas = render_centered(
                    task.face.as_ref(),
                    task.code_point,
                    task.centering,
                    &task.color,
                    width,
                    height,
                );
                if let Err(e) = export_canvas(&canvas, &task.path) {
                    error!("{e}");
                    failed.fetch_add(1, Ordering::Relaxed);
                }
                // Decremented on success and failure alike so the run
                // always drains.
                if counter.fetch_sub(1, Ordering::AcqRel) == 1 {
                    let tx = done_tx.lock().ok().and_then(|mut guard| guard.take());
                    emit_summary(
                        start,
                        task_count,
                        failed.load(Ordering::Relaxed),
                        &no_font,
                        &no_image,
                        tx,
                    );
                }
            }
        }))?;
    }

    Ok(done_rx)
}

fn emit_summary(
    start: Instant,
    files_attempted: usize,
    failed_writes: usize,
    no_font: &[u32],
    no_image: &[u32],
    tx: Option<oneshot::Sender<RunSummary>>,
) {
    let elapsed = start.elapsed();
    println!("Run time (millis): {}", elapsed.as_millis());
    println!("{}", code_point_report("No font support: ", no_font));
    println!("{}", code_point_report("Ink exceeds canvas: ", no_image));
    info!(
        "batch drained: {files_attempted} files attempted, {failed_writes} write failures"
    );
    if let Some(tx) = tx {
        let _ = tx.send(RunSummary {
            elapsed,
            files_attempted,
            failed_writes,
            no_font: no_font.to_vec(),
            no_image: no_image.to_vec(),
        });
    }
}

/// Dispatch and block until the run drains. This is what keeps the
/// process alive: the detached workers cannot.
pub fn run_to_completion(pool: &WorkerPool, built: BuiltRun) -> Result<RunSummary> {
    let rx = dispatch_run(pool, built, Instant::now())?;
    rx.blocking_recv()
        .map_err(|_| Error::Dispatch("completion channel closed before the run drained".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn clamp_stays_within_core_bounds() {
        let cores = num_cpus::get().max(1);
        assert_eq!(clamp_workers(None), cores);
        assert_eq!(clamp_workers(Some(0)), cores);
        assert_eq!(clamp_workers(Some(usize::MAX)), cores * 4);
    }

    #[test]
    fn pool_runs_submitted_jobs() {
        let pool = WorkerPool::new(2).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();
        for _ in 0..8 {
            let hits = Arc::clone(&hits);
            let tx = tx.clone();
            pool.submit(Box::new(move || {
                hits.fetch_add(1, Ordering::Relaxed);
                let _ = tx.send(());
            }))
            .unwrap();
        }
        for _ in 0..8 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(hits.load(Ordering::Relaxed), 8);
    }
}
