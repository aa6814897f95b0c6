//! Single-writer scan worker.
//!
//! A [`ScanSession`] is not meant to be shared. The worker moves it onto a
//! dedicated thread and serializes every mutation through a channel, so
//! batch delivery, ground detection and the finish request may come from
//! different threads without racing. Measurement runs on the worker thread
//! against a snapshot, in the same order as the commands that preceded it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use foot_types::{FootMeasurement, FootSide, GroundTransform, Vertex};
use tracing::{debug, warn};

use crate::aggregator::AcceptResult;
use crate::error::{ScanError, ScanResult};
use crate::session::{ScanEvent, ScanSession};
use crate::status::SessionStatus;

type Reply<T> = Sender<T>;

enum Command {
    Start(Reply<()>),
    Ground(GroundTransform, Reply<ScanResult<bool>>),
    Ingest(Vec<Vertex>, Option<Reply<ScanResult<AcceptResult>>>),
    Finish(FootSide, Reply<ScanResult<FootMeasurement>>),
    Restart(Reply<ScanResult<()>>),
    Abandon(Reply<()>),
    Status(Reply<SessionStatus>),
    DrainEvents(Reply<Vec<ScanEvent>>),
    Shutdown,
}

/// Cloneable, `Send` handle to a running [`ScanWorker`].
///
/// Every call blocks until the worker has applied it, except
/// [`submit`](Self::submit). Once the worker has stopped every call returns
/// [`ScanError::WorkerStopped`].
#[derive(Debug, Clone)]
pub struct ScanHandle {
    tx: Sender<Command>,
}

impl ScanHandle {
    fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> ScanResult<T> {
        let (reply, rx) = mpsc::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| ScanError::WorkerStopped)?;
        rx.recv().map_err(|_| ScanError::WorkerStopped)
    }

    /// See [`ScanSession::start`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the worker has exited.
    pub fn start(&self) -> ScanResult<()> {
        self.request(Command::Start)
    }

    /// See [`ScanSession::on_ground_detected`].
    ///
    /// # Errors
    ///
    /// Returns the session's error, or [`ScanError::WorkerStopped`].
    pub fn ground_detected(&self, transform: GroundTransform) -> ScanResult<bool> {
        self.request(|reply| Command::Ground(transform, reply))?
    }

    /// See [`ScanSession::ingest_batch`].
    ///
    /// # Errors
    ///
    /// Returns the session's error, or [`ScanError::WorkerStopped`].
    pub fn ingest(&self, batch: Vec<Vertex>) -> ScanResult<AcceptResult> {
        self.request(|reply| Command::Ingest(batch, Some(reply)))?
    }

    /// Queue a batch without waiting for the verdict.
    ///
    /// Rejections and phase errors are still recorded in the session's
    /// event log.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the worker has exited.
    pub fn submit(&self, batch: Vec<Vertex>) -> ScanResult<()> {
        self.tx
            .send(Command::Ingest(batch, None))
            .map_err(|_| ScanError::WorkerStopped)
    }

    /// See [`ScanSession::finish`]. Batches submitted earlier from this
    /// handle are applied first.
    ///
    /// # Errors
    ///
    /// Returns the session's error, or [`ScanError::WorkerStopped`].
    pub fn finish(&self, foot_side: FootSide) -> ScanResult<FootMeasurement> {
        self.request(|reply| Command::Finish(foot_side, reply))?
    }

    /// See [`ScanSession::restart`].
    ///
    /// # Errors
    ///
    /// Returns the session's error, or [`ScanError::WorkerStopped`].
    pub fn restart(&self) -> ScanResult<()> {
        self.request(Command::Restart)?
    }

    /// See [`ScanSession::abandon`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the worker has exited.
    pub fn abandon(&self) -> ScanResult<()> {
        self.request(Command::Abandon)
    }

    /// See [`ScanSession::status`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the worker has exited.
    pub fn status(&self) -> ScanResult<SessionStatus> {
        self.request(Command::Status)
    }

    /// See [`ScanSession::drain_events`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the worker has exited.
    pub fn drain_events(&self) -> ScanResult<Vec<ScanEvent>> {
        self.request(Command::DrainEvents)
    }
}

/// Owns the thread that owns the session.
///
/// Dropping the worker stops the thread after it has drained the commands
/// already queued.
///
/// # Example
///
/// ```
/// use foot_scan::{PhaseKind, ScanSession, ScanWorker};
///
/// let worker = ScanWorker::spawn(ScanSession::default()).unwrap();
/// let handle = worker.handle();
/// handle.start().unwrap();
///
/// let remote = handle.clone();
/// std::thread::spawn(move || remote.status().unwrap().phase)
///     .join()
///     .map(|phase| assert_eq!(phase, PhaseKind::Scanning))
///     .unwrap();
///
/// let session = worker.shutdown().unwrap();
/// assert_eq!(session.phase().kind(), PhaseKind::Scanning);
/// ```
#[derive(Debug)]
pub struct ScanWorker {
    handle: ScanHandle,
    thread: Option<JoinHandle<ScanSession>>,
}

impl ScanWorker {
    /// Move `session` onto a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the thread cannot be spawned.
    pub fn spawn(session: ScanSession) -> ScanResult<Self> {
        let (tx, rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("foot-scan".into())
            .spawn(move || run(session, &rx))
            .map_err(|err| {
                warn!(%err, "failed to spawn scan worker");
                ScanError::WorkerStopped
            })?;
        Ok(Self {
            handle: ScanHandle { tx },
            thread: Some(thread),
        })
    }

    /// A new handle to this worker.
    #[must_use]
    pub fn handle(&self) -> ScanHandle {
        self.handle.clone()
    }

    /// Stop the thread and take the session back.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkerStopped`] if the thread panicked.
    pub fn shutdown(mut self) -> ScanResult<ScanSession> {
        self.stop().ok_or(ScanError::WorkerStopped)
    }

    fn stop(&mut self) -> Option<ScanSession> {
        let thread = self.thread.take()?;
        // The thread may already be gone; joining still reports how it ended.
        let _ = self.handle.tx.send(Command::Shutdown);
        thread.join().ok()
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        if self.thread.is_some() && self.stop().is_none() {
            warn!("scan worker did not shut down cleanly");
        }
    }
}

fn run(mut session: ScanSession, rx: &Receiver<Command>) -> ScanSession {
    debug!("scan worker started");
    // Reply sends fail only when the caller stopped waiting; nothing to do.
    while let Ok(command) = rx.recv() {
        match command {
            Command::Start(reply) => {
                session.start();
                let _ = reply.send(());
            }
            Command::Ground(transform, reply) => {
                let _ = reply.send(session.on_ground_detected(&transform));
            }
            Command::Ingest(batch, reply) => {
                let result = session.ingest_batch(&batch);
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(err) = result {
                            debug!(%err, "submitted batch ignored");
                        }
                    }
                }
            }
            Command::Finish(side, reply) => {
                let _ = reply.send(session.finish(side));
            }
            Command::Restart(reply) => {
                let _ = reply.send(session.restart());
            }
            Command::Abandon(reply) => {
                session.abandon();
                let _ = reply.send(());
            }
            Command::Status(reply) => {
                let _ = reply.send(session.status());
            }
            Command::DrainEvents(reply) => {
                let _ = reply.send(session.drain_events());
            }
            Command::Shutdown => break,
        }
    }
    debug!("scan worker stopped");
    session
}
