//! Executors for chunked search
//!
//! A search call takes two executors: one runs the per-chunk work, the other
//! runs the caller's completion sink. Keeping them separate lets a UI thread
//! receive results on its own loop while chunks run on a pool, and lets tests
//! force everything onto the calling thread with [`Inline`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;
use tracing::warn;

/// A unit of work handed to an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run jobs
pub trait Executor: Send + Sync {
    fn execute(&self, job: Job);
}

/// Runs each job immediately on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Inline;

impl Executor for Inline {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Runs jobs on a rayon thread pool
#[cfg(feature = "parallel")]
#[derive(Clone, Default)]
pub struct RayonExecutor {
    pool: Option<Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl RayonExecutor {
    /// Use rayon's process-wide pool
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Start a dedicated pool with `threads` workers
    pub fn with_threads(threads: usize) -> crate::Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fuzzy-search-{i}"))
            .build()
            .map_err(|e| crate::FuseError::WorkerPool(e.to_string()))?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Process-wide single-thread pool reserved for completion sinks, so
    /// results never queue behind chunk jobs on the global pool. Falls back to
    /// the global pool if the thread cannot be started.
    pub fn completion() -> Self {
        static POOL: OnceLock<Option<Arc<rayon::ThreadPool>>> = OnceLock::new();
        let pool = POOL.get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(1)
                .thread_name(|_| COMPLETION_THREAD.to_string())
                .build()
                .map(Arc::new)
                .map_err(|e| warn!(error = %e, "Completion pool unavailable, using global pool"))
                .ok()
        });
        Self { pool: pool.clone() }
    }
}

#[cfg(feature = "parallel")]
const COMPLETION_THREAD: &str = "fuzzy-search-completion";

#[cfg(feature = "parallel")]
impl Executor for RayonExecutor {
    fn execute(&self, job: Job) {
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

#[cfg(feature = "parallel")]
impl fmt::Debug for RayonExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayonExecutor")
            .field("dedicated", &self.pool.is_some())
            .finish()
    }
}

/// Sending half of a main-context queue. Jobs wait until the owner of the
/// matching [`MainLoop`] drains them.
#[derive(Debug, Clone)]
pub struct MainQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl Executor for MainQueue {
    fn execute(&self, job: Job) {
        if self.tx.send(job).is_err() {
            warn!("Main loop is gone; dropping completion");
        }
    }
}

/// Receiving half of a main-context queue, owned by the designated thread
#[derive(Debug)]
pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl MainLoop {
    /// Run every job queued so far without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Block until one job arrives and run it. Returns `false` once every
    /// [`MainQueue`] has been dropped.
    ///
    /// Must not be called from inside an async runtime.
    pub fn run_next_blocking(&mut self) -> bool {
        match self.rx.blocking_recv() {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Async counterpart of [`MainLoop::run_next_blocking`]
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }
}

/// Create a linked main-context queue
pub fn main_queue() -> (MainQueue, MainLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MainQueue { tx }, MainLoop { rx })
}

/// The pair of executors used by chunked search
#[derive(Clone)]
pub struct Dispatcher {
    workers: Arc<dyn Executor>,
    completion: Arc<dyn Executor>,
}

impl Dispatcher {
    pub fn new(workers: impl Executor + 'static, completion: impl Executor + 'static) -> Self {
        Self {
            workers: Arc::new(workers),
            completion: Arc::new(completion),
        }
    }

    /// Everything runs on the calling thread
    pub fn inline() -> Self {
        Self::new(Inline, Inline)
    }

    pub fn workers(&self) -> &Arc<dyn Executor> {
        &self.workers
    }

    pub fn completion(&self) -> &Arc<dyn Executor> {
        &self.completion
    }
}

impl Default for Dispatcher {
    /// Chunks run on rayon's global pool and completions on the dedicated
    /// [`RayonExecutor::completion`] thread.
    #[cfg(feature = "parallel")]
    fn default() -> Self {
        Self::new(RayonExecutor::global(), RayonExecutor::completion())
    }

    #[cfg(not(feature = "parallel"))]
    fn default() -> Self {
        Self::inline()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
