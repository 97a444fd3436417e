//! Chunked search on the worker executor
//!
//! The input is split into contiguous chunks of `chunk_size` items, one job per
//! chunk. Each job collects its hits locally and appends them to a shared
//! buffer under a lock. The job that finishes last sorts the buffer and hands
//! the caller's sink to the completion executor, so the sink runs exactly once
//! (even for an empty result) and never inline on a worker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::engine::{record_hit, sort_by_score, string_hit, Fuse, Ranked};
use crate::dispatch::Executor;
use crate::record::{FuseProp, RecordHit, StringHit};

type Sink<H> = Box<dyn FnOnce(Vec<H>) + Send + 'static>;

/// Completion barrier shared by the chunks of one call
struct ChunkBarrier<H> {
    hits: Mutex<Vec<H>>,
    remaining: AtomicUsize,
    sink: Mutex<Option<Sink<H>>>,
    completion: Arc<dyn Executor>,
    started: Instant,
}

impl<H: Ranked + Send + 'static> ChunkBarrier<H> {
    fn new(chunks: usize, sink: Sink<H>, completion: Arc<dyn Executor>) -> Arc<Self> {
        Arc::new(Self {
            hits: Mutex::new(Vec::new()),
            remaining: AtomicUsize::new(chunks),
            sink: Mutex::new(Some(sink)),
            completion,
            started: Instant::now(),
        })
    }

    /// Record one chunk's hits; the last chunk in completes the call.
    fn submit(&self, local: Vec<H>) {
        if !local.is_empty() {
            self.hits.lock().extend(local);
        }
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.finish();
        }
    }

    fn finish(&self) {
        let mut hits = std::mem::take(&mut *self.hits.lock());
        sort_by_score(&mut hits);

        debug!(
            hits = hits.len(),
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "Chunked search complete"
        );

        if let Some(sink) = self.sink.lock().take() {
            self.completion.execute(Box::new(move || sink(hits)));
        }
    }
}

/// Contiguous `[start, end)` bounds of each chunk
fn chunk_bounds(len: usize, chunk_size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len)
        .step_by(chunk_size)
        .map(move |start| (start, (start + chunk_size).min(len)))
}

impl Fuse {
    /// Search `text` in `candidates` chunk by chunk on the worker executor.
    ///
    /// `completion` receives the sorted hits on the completion executor.
    /// Indices are positions in `candidates`.
    pub fn search_strings_with<S, F>(&self, text: &str, candidates: Vec<S>, completion: F)
    where
        S: AsRef<str> + Send + Sync + 'static,
        F: FnOnce(Vec<StringHit>) + Send + 'static,
    {
        let completion_executor = self.dispatcher.completion().clone();
        let Some(pattern) = self.create_pattern(text) else {
            ChunkBarrier::<StringHit>::new(0, Box::new(completion), completion_executor)
                .finish();
            return;
        };

        let chunk_size = self.config.chunk_size;
        let chunk_count = candidates.len().div_ceil(chunk_size);
        debug!(
            candidates = candidates.len(),
            chunks = chunk_count,
            "Dispatching chunked string search"
        );

        let barrier =
            ChunkBarrier::<StringHit>::new(chunk_count, Box::new(completion), completion_executor);
        if chunk_count == 0 {
            barrier.finish();
            return;
        }

        let pattern = Arc::new(pattern);
        let candidates = Arc::new(candidates);
        for (start, end) in chunk_bounds(candidates.len(), chunk_size) {
            let pattern = pattern.clone();
            let candidates = candidates.clone();
            let barrier = barrier.clone();
            let config = self.config;

            self.dispatcher.workers().execute(Box::new(move || {
                let local: Vec<StringHit> = candidates[start..end]
                    .iter()
                    .enumerate()
                    .filter_map(|(offset, candidate)| {
                        string_hit(&pattern, &config, start + offset, candidate.as_ref())
                    })
                    .collect();
                barrier.submit(local);
            }));
        }
    }

    /// Search `text` in the fields of each record, chunk by chunk on the
    /// worker executor.
    ///
    /// Unlike [`Fuse::search_records`], a perfect unweighted field keeps its
    /// 0.0 score here.
    pub fn search_records_with<T, E, F>(
        &self,
        text: &str,
        records: Vec<T>,
        fields: E,
        completion: F,
    ) where
        T: Send + Sync + 'static,
        E: Fn(&T) -> Vec<FuseProp> + Send + Sync + 'static,
        F: FnOnce(Vec<RecordHit>) + Send + 'static,
    {
        let completion_executor = self.dispatcher.completion().clone();
        let Some(pattern) = self.create_pattern(text) else {
            ChunkBarrier::<RecordHit>::new(0, Box::new(completion), completion_executor)
                .finish();
            return;
        };

        let chunk_size = self.config.chunk_size;
        let chunk_count = records.len().div_ceil(chunk_size);
        debug!(
            records = records.len(),
            chunks = chunk_count,
            "Dispatching chunked record search"
        );

        let barrier =
            ChunkBarrier::<RecordHit>::new(chunk_count, Box::new(completion), completion_executor);
        if chunk_count == 0 {
            barrier.finish();
            return;
        }

        let pattern = Arc::new(pattern);
        let records = Arc::new(records);
        let fields = Arc::new(fields);
        for (start, end) in chunk_bounds(records.len(), chunk_size) {
            let pattern = pattern.clone();
            let records = records.clone();
            let fields = fields.clone();
            let barrier = barrier.clone();
            let config = self.config;

            self.dispatcher.workers().execute(Box::new(move || {
                let local: Vec<RecordHit> = records[start..end]
                    .iter()
                    .enumerate()
                    .filter_map(|(offset, record)| {
                        record_hit(&pattern, &config, start + offset, &(*fields)(record), false)
                    })
                    .collect();
                barrier.submit(local);
            }));
        }
    }

    /// Async form of [`Fuse::search_strings_with`]. Resolves once the
    /// completion executor has run the sink.
    pub async fn search_strings_async<S>(&self, text: &str, candidates: Vec<S>) -> Vec<StringHit>
    where
        S: AsRef<str> + Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.search_strings_with(text, candidates, move |hits| {
            let _ = tx.send(hits);
        });
        rx.await.unwrap_or_else(|_| {
            warn!("String search completion was dropped");
            Vec::new()
        })
    }

    /// Async form of [`Fuse::search_records_with`]
    pub async fn search_records_async<T, E>(
        &self,
        text: &str,
        records: Vec<T>,
        fields: E,
    ) -> Vec<RecordHit>
    where
        T: Send + Sync + 'static,
        E: Fn(&T) -> Vec<FuseProp> + Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.search_records_with(text, records, fields, move |hits| {
            let _ = tx.send(hits);
        });
        rx.await.unwrap_or_else(|_| {
            warn!("Record search completion was dropped");
            Vec::new()
        })
    }
}
