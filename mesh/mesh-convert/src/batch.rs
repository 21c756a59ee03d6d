//! Batch conversion with progress reporting and cooperative cancellation.
//!
//! A [`BatchConverter`] walks an ordered job list once. Everything it has to
//! say goes out through an [`EventSink`] as [`BatchEvent`]s: free-form log
//! text, integer progress, and exactly one terminal [`BatchEvent::Done`].
//! [`BatchConverter::spawn`] runs the batch on a worker thread and hands the
//! caller a channel receiver plus a [`CancelHandle`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::convert::Converter;
use crate::error::{ConvertError, ConvertResult};
use crate::naming::ConversionJob;
use crate::options::ConvertOptions;

/// A notification from a running batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// A line (or block) of user-facing log text.
    Log(String),
    /// Overall progress, 0-100.
    Progress(u8),
    /// The batch finished. Always the last event.
    Done {
        /// Whether every job was converted.
        success: bool,
        /// Summary for the user.
        message: String,
    },
}

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BatchState {
    /// Not started.
    #[default]
    Idle,
    /// Jobs are being processed.
    Running,
    /// Every job was converted.
    Completed,
    /// Stopped at a job boundary on request.
    Cancelled,
    /// Stopped by an error, or there was nothing to do.
    Failed,
}

impl BatchState {
    /// Whether the batch has reached a terminal state.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Receives batch events.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: BatchEvent);
}

impl EventSink for Vec<BatchEvent> {
    fn emit(&mut self, event: BatchEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<BatchEvent> {
    fn emit(&mut self, event: BatchEvent) {
        // A dropped receiver means nobody is listening; keep converting.
        if mpsc::Sender::send(self, event).is_err() {
            debug!("batch event receiver dropped");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: BatchEvent) {
        (**self).emit(event);
    }
}

/// Adapts a closure into an [`EventSink`].
///
/// ```
/// use mesh_convert::{BatchEvent, EventSink, FnSink};
///
/// let mut lines = Vec::new();
/// let mut sink = FnSink(|event| {
///     if let BatchEvent::Log(text) = event {
///         lines.push(text);
///     }
/// });
/// sink.emit(BatchEvent::Log("hello".into()));
/// sink.emit(BatchEvent::Progress(50));
/// drop(sink);
/// assert_eq!(lines, ["hello"]);
/// ```
pub struct FnSink<F>(pub F);

impl<F: FnMut(BatchEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: BatchEvent) {
        (self.0)(event);
    }
}

/// Handle for requesting cancellation of a batch.
///
/// Cancellation is checked before each job starts; a job already in progress
/// runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// A fresh, un-cancelled handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Converts an ordered list of jobs, one after another.
///
/// The first failing job stops the batch; outputs already written stay on
/// disk. A converter runs at most once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mesh_convert::{BatchConverter, BatchEvent, BatchState, ConvertOptions};
///
/// let mut batch = BatchConverter::new(Arc::from(Vec::new()), Arc::new(ConvertOptions::default()));
/// let mut events = Vec::new();
///
/// assert_eq!(batch.run(&mut events), BatchState::Failed);
/// assert_eq!(
///     events,
///     [BatchEvent::Done { success: false, message: "No files to convert.".into() }]
/// );
/// ```
#[derive(Debug)]
pub struct BatchConverter {
    jobs: Arc<[ConversionJob]>,
    options: Arc<ConvertOptions>,
    cancel: CancelHandle,
    state: BatchState,
}

impl BatchConverter {
    /// Create an idle batch over `jobs`.
    #[must_use]
    pub fn new(jobs: Arc<[ConversionJob]>, options: Arc<ConvertOptions>) -> Self {
        Self {
            jobs,
            options,
            cancel: CancelHandle::new(),
            state: BatchState::Idle,
        }
    }

    /// A handle that cancels this batch.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BatchState {
        self.state
    }

    /// Run every job on the calling thread, reporting through `sink`.
    ///
    /// Returns the terminal state. Calling this again after the batch has
    /// run emits nothing and returns the same state.
    pub fn run<S: EventSink>(&mut self, mut sink: S) -> BatchState {
        if self.state != BatchState::Idle {
            warn!(state = %self.state, "batch already ran");
            return self.state;
        }
        self.state = self.execute(&mut sink);
        info!(state = %self.state, jobs = self.jobs.len(), "batch finished");
        self.state
    }

    /// Move the batch to a worker thread.
    ///
    /// # Errors
    ///
    /// Fails if the operating system refuses to start the thread.
    pub fn spawn(mut self) -> std::io::Result<BatchHandle> {
        let (tx, rx) = mpsc::channel();
        let cancel = self.cancel_handle();
        let join = thread::Builder::new()
            .name("stl2obj-batch".into())
            .spawn(move || self.run(tx))?;

        Ok(BatchHandle {
            events: rx,
            cancel,
            join,
        })
    }

    fn execute(&mut self, sink: &mut impl EventSink) -> BatchState {
        let total = self.jobs.len();
        if total == 0 {
            done(sink, false, "No files to convert.");
            return BatchState::Failed;
        }

        self.state = BatchState::Running;
        sink.emit(BatchEvent::Log(format!("Starting conversion of {total} file(s)...")));
        sink.emit(BatchEvent::Progress(0));

        let converter = match Converter::new(&self.options) {
            Ok(converter) => converter,
            Err(e) => return fail(sink, &e),
        };

        for (i, job) in self.jobs.iter().enumerate() {
            let i = i + 1;
            if self.cancel.is_cancelled() {
                sink.emit(BatchEvent::Log("Cancelled.".into()));
                done(sink, false, "Cancelled by user.");
                return BatchState::Cancelled;
            }

            sink.emit(BatchEvent::Log(format!(
                "\n[{i}/{total}] Loading: {}",
                file_name(&job.input)
            )));

            match guard_job(|| converter.convert(&job.input, &job.output)) {
                Ok(report) => {
                    sink.emit(BatchEvent::Log(format!(
                        "Exported: {}\n{}",
                        file_name(&job.output),
                        report.stats
                    )));
                    sink.emit(BatchEvent::Progress(percent(i, total)));
                }
                Err(e) => return fail(sink, &e),
            }
        }

        done(sink, true, &format!("Converted {total} file(s) successfully."));
        BatchState::Completed
    }
}

/// A batch running on a worker thread.
#[derive(Debug)]
pub struct BatchHandle {
    /// Events from the worker; the channel closes after [`BatchEvent::Done`].
    pub events: mpsc::Receiver<BatchEvent>,
    /// Cancels the running batch.
    pub cancel: CancelHandle,
    /// The worker thread.
    pub join: JoinHandle<BatchState>,
}

impl BatchHandle {
    /// Wait for the worker to finish. A panicked worker counts as failed.
    pub fn wait(self) -> BatchState {
        self.join.join().unwrap_or_else(|_| {
            error!("batch worker panicked");
            BatchState::Failed
        })
    }
}

fn done(sink: &mut impl EventSink, success: bool, message: &str) {
    sink.emit(BatchEvent::Done {
        success,
        message: message.to_string(),
    });
}

fn fail(sink: &mut impl EventSink, err: &dyn std::error::Error) -> BatchState {
    error!(error = %err, "batch job failed");
    sink.emit(BatchEvent::Log(format!("Error: {err}")));
    done(sink, false, &format!("Failed: {err}"));
    BatchState::Failed
}

/// Run one job, turning a panic into [`ConvertError::Panicked`] so the
/// batch still reaches its `Done` event.
fn guard_job<T>(job: impl FnOnce() -> ConvertResult<T>) -> ConvertResult<T> {
    panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ConvertError::Panicked { message })
    })
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn percent(done: usize, total: usize) -> u8 {
    u8::try_from(done * 100 / total.max(1)).unwrap_or(100)
}
