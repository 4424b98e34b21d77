use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use crate::blurring::domain::blur_request::BlurRequest;
use crate::blurring::domain::image_blurrer::ImageBlurrer;
use crate::imaging::domain::image_io_error::ImageIoError;
use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::pixel_buffer::PixelBuffer;

pub type JobId = u64;

/// Results reported by the worker, one per submitted job.
#[derive(Debug)]
pub enum ProcessorEvent {
    Completed {
        job: JobId,
        strength: i32,
        buffer: PixelBuffer,
    },
    Failed {
        job: JobId,
        error: String,
    },
    Cancelled {
        job: JobId,
    },
}

impl ProcessorEvent {
    pub fn job(&self) -> JobId {
        match self {
            ProcessorEvent::Completed { job, .. }
            | ProcessorEvent::Failed { job, .. }
            | ProcessorEvent::Cancelled { job } => *job,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("blur worker has stopped")]
pub struct WorkerStopped;

struct BlurJob {
    id: JobId,
    path: PathBuf,
    strength: i32,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl BlurJob {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Handle the processor keeps on its most recent job.
struct LatestJob {
    id: JobId,
    path: PathBuf,
    strength: i32,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl LatestJob {
    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::Relaxed) && !self.finished.load(Ordering::Relaxed)
    }
}

/// Last decoded source, so repeated strengths on one image decode once.
struct SourceCache {
    path: PathBuf,
    buffer: PixelBuffer,
}

/// Background blur worker with latest-wins semantics.
///
/// Each [`submit`](Self::submit) cancels every earlier job, except that a
/// request identical to the still-running latest job is folded into it.
/// Jobs run one at a time on a dedicated thread; results arrive on
/// [`results`](Self::results).
pub struct BlurProcessor {
    jobs_tx: Option<Sender<BlurJob>>,
    events_rx: Receiver<ProcessorEvent>,
    worker: Option<JoinHandle<()>>,
    latest: Option<LatestJob>,
    next_id: JobId,
}

impl BlurProcessor {
    pub fn spawn(reader: Box<dyn ImageReader>, blurrer: Box<dyn ImageBlurrer>) -> Self {
        let (jobs_tx, jobs_rx) = crossbeam_channel::unbounded::<BlurJob>();
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<ProcessorEvent>();

        let worker = std::thread::spawn(move || run_worker(reader, blurrer, jobs_rx, events_tx));

        Self {
            jobs_tx: Some(jobs_tx),
            events_rx,
            worker: Some(worker),
            latest: None,
            next_id: 1,
        }
    }

    /// Queues a blur of `path` at `strength` and returns the job that will
    /// answer it.
    pub fn submit(&mut self, path: impl Into<PathBuf>, strength: i32) -> Result<JobId, WorkerStopped> {
        let path = path.into();
        if let Some(latest) = &self.latest {
            if latest.is_live() && latest.strength == strength && latest.path == path {
                log::debug!("Coalescing strength {strength} into job {}", latest.id);
                return Ok(latest.id);
            }
        }
        self.cancel_all();

        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let job = BlurJob {
            id,
            path: path.clone(),
            strength,
            cancelled: cancelled.clone(),
            finished: finished.clone(),
        };

        let tx = self.jobs_tx.as_ref().ok_or(WorkerStopped)?;
        tx.send(job).map_err(|_| WorkerStopped)?;
        self.latest = Some(LatestJob {
            id,
            path,
            strength,
            cancelled,
            finished,
        });
        Ok(id)
    }

    /// Cancels the queued or running job, if any.
    pub fn cancel_all(&mut self) {
        if let Some(latest) = self.latest.take() {
            latest.cancelled.store(true, Ordering::Relaxed);
        }
    }

    pub fn results(&self) -> &Receiver<ProcessorEvent> {
        &self.events_rx
    }
}

impl Drop for BlurProcessor {
    fn drop(&mut self) {
        self.cancel_all();
        // Closing the queue ends the worker loop.
        self.jobs_tx.take();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("Blur worker panicked");
            }
        }
    }
}

fn run_worker(
    reader: Box<dyn ImageReader>,
    blurrer: Box<dyn ImageBlurrer>,
    jobs_rx: Receiver<BlurJob>,
    events_tx: Sender<ProcessorEvent>,
) {
    let mut cache: Option<SourceCache> = None;
    for job in jobs_rx {
        let event = process_job(&job, &*reader, &*blurrer, &mut cache);
        job.finished.store(true, Ordering::Relaxed);
        if events_tx.send(event).is_err() {
            break;
        }
    }
}

fn process_job(
    job: &BlurJob,
    reader: &dyn ImageReader,
    blurrer: &dyn ImageBlurrer,
    cache: &mut Option<SourceCache>,
) -> ProcessorEvent {
    let cancelled = || {
        log::debug!("Job {} cancelled", job.id);
        ProcessorEvent::Cancelled { job: job.id }
    };
    if job.is_cancelled() {
        return cancelled();
    }

    let source = match load_source(reader, cache, &job.path) {
        Ok(source) => source,
        Err(e) => {
            return ProcessorEvent::Failed {
                job: job.id,
                error: e.to_string(),
            }
        }
    };
    if job.is_cancelled() {
        return cancelled();
    }

    let result = blurrer.blur(BlurRequest::new(source, job.strength));
    if job.is_cancelled() {
        return cancelled();
    }
    match result {
        Ok(buffer) => ProcessorEvent::Completed {
            job: job.id,
            strength: job.strength,
            buffer,
        },
        Err(e) => ProcessorEvent::Failed {
            job: job.id,
            error: e.to_string(),
        },
    }
}

fn load_source<'c>(
    reader: &dyn ImageReader,
    cache: &'c mut Option<SourceCache>,
    path: &Path,
) -> Result<&'c PixelBuffer, ImageIoError> {
    let entry = match cache.take() {
        Some(entry) if entry.path == path => entry,
        _ => SourceCache {
            path: path.to_path_buf(),
            buffer: reader.read(path)?,
        },
    };
    Ok(&cache.insert(entry).buffer)
}
