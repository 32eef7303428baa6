use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::distro::DistroProbe;
use crate::types::UpdateCount;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WorkerState {
    Idle,
    Running,
    StopRequested,
    Stopped,
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Update check worker was already started")]
    AlreadyStarted,

    #[error("Failed to spawn update check thread: {0}")]
    Spawn(#[from] io::Error),
}

struct Shared {
    state: Mutex<WorkerState>,
    wake: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, WorkerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_running(&self) -> bool {
        *self.lock() == WorkerState::Running
    }

    /// Sleeps for `timeout` unless a stop is requested first.
    /// Returns `true` when the worker should keep polling.
    fn wait_while_running(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .wake
            .wait_timeout_while(guard, timeout, |state| *state == WorkerState::Running)
            .unwrap_or_else(PoisonError::into_inner);
        *guard == WorkerState::Running
    }

    fn set(&self, state: WorkerState) {
        *self.lock() = state;
        self.wake.notify_all();
    }
}

/// Background thread that polls a [`DistroProbe`] and publishes each result.
pub(crate) struct PollingWorker {
    probe: Arc<dyn DistroProbe>,
    interval: Duration,
    shared: Arc<Shared>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl PollingWorker {
    pub(crate) fn new(probe: Arc<dyn DistroProbe>, interval: Duration) -> Self {
        Self {
            probe,
            interval,
            shared: Arc::new(Shared {
                state: Mutex::new(WorkerState::Idle),
                wake: Condvar::new(),
            }),
            thread: Mutex::new(None),
        }
    }

    pub(crate) fn state(&self) -> WorkerState {
        *self.shared.lock()
    }

    /// Starts polling. `publish` is only ever called from the worker thread,
    /// one count at a time.
    pub(crate) fn start<F>(&self, publish: F) -> Result<(), WorkerError>
    where
        F: Fn(UpdateCount) + Send + 'static,
    {
        {
            let mut state = self.shared.lock();
            if *state != WorkerState::Idle {
                return Err(WorkerError::AlreadyStarted);
            }
            *state = WorkerState::Running;
        }

        let probe = Arc::clone(&self.probe);
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        let spawned = thread::Builder::new()
            .name("update-check".to_string())
            .spawn(move || run_loop(probe.as_ref(), interval, &shared, publish));

        match spawned {
            Ok(handle) => {
                *self.thread.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
                info!(interval_secs = interval.as_secs(), "update checks started");
                Ok(())
            }
            Err(err) => {
                self.shared.set(WorkerState::Stopped);
                Err(WorkerError::Spawn(err))
            }
        }
    }

    /// Requests the loop to exit. Idempotent and safe from any thread; an
    /// in-progress wait is cut short immediately.
    pub(crate) fn stop(&self) {
        let mut state = self.shared.lock();
        match *state {
            WorkerState::Idle => *state = WorkerState::Stopped,
            WorkerState::Running => *state = WorkerState::StopRequested,
            WorkerState::StopRequested | WorkerState::Stopped => {}
        }
        drop(state);
        self.shared.wake.notify_all();
    }

    /// Blocks until the worker thread has exited. Nothing is published after
    /// this returns.
    pub(crate) fn join(&self) {
        let handle = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("update check thread panicked");
                self.shared.set(WorkerState::Stopped);
            }
        }
    }
}

impl Drop for PollingWorker {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

fn run_loop<F>(probe: &dyn DistroProbe, interval: Duration, shared: &Shared, publish: F)
where
    F: Fn(UpdateCount),
{
    while shared.is_running() {
        let count = match probe.updateable_count() {
            Ok(count) => UpdateCount::Available(count),
            Err(err) => {
                warn!("Update check failed: {}", err);
                UpdateCount::ProbeFailed
            }
        };

        if !shared.is_running() {
            break;
        }
        debug!(?count, "publishing update count");
        publish(count);

        if !shared.wait_while_running(interval) {
            break;
        }
    }

    shared.set(WorkerState::Stopped);
    info!("update checks stopped");
}
