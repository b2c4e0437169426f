use crate::error::WorkflowError;
use tokio::sync::watch;

/// Monotonic per-job counter. Each trigger gets a fresh one; only the response carrying
/// the current value may settle the job.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(WorkflowError),
}

impl<T> JobState<T> {
    /// A stable string label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Idle => "idle",
            JobState::Pending => "pending",
            JobState::Succeeded(_) => "succeeded",
            JobState::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Pending)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            JobState::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            JobState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobSnapshot<T> {
    pub generation: Generation,
    pub state: JobState<T>,
}

/// Owns one job's state and its generation counter.
///
/// Both live inside the same watch cell, so "bump generation + enter Pending" and
/// "check generation + settle" are each atomic against each other.
pub struct JobSlot<T> {
    name: &'static str,
    tx: watch::Sender<JobSnapshot<T>>,
}

impl<T: Clone> JobSlot<T> {
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(JobSnapshot {
            generation: 0,
            state: JobState::Idle,
        });
        Self { name, tx }
    }

    /// Clears any previous result/error and enters `Pending` under a new generation.
    pub fn begin(&self) -> Generation {
        let mut generation = 0;
        self.tx.send_modify(|s| {
            s.generation += 1;
            s.state = JobState::Pending;
            generation = s.generation;
        });
        log::debug!("{}: pending (generation {generation})", self.name);
        generation
    }

    /// Applies `state` if `generation` is still current. Returns whether it was applied.
    pub fn settle(&self, generation: Generation, state: JobState<T>) -> bool {
        let label = state.label();
        let applied = self.tx.send_if_modified(|s| {
            if s.generation == generation {
                s.state = state;
                true
            } else {
                false
            }
        });
        if applied {
            log::debug!("{}: {label} (generation {generation})", self.name);
        } else {
            log::debug!(
                "{}: discarding superseded {label} response (generation {generation})",
                self.name
            );
        }
        applied
    }

    /// Fails immediately without a remote call. Supersedes anything still in flight.
    pub fn reject(&self, error: WorkflowError) -> Generation {
        let mut generation = 0;
        self.tx.send_modify(|s| {
            s.generation += 1;
            s.state = JobState::Failed(error);
            generation = s.generation;
        });
        log::debug!("{}: rejected locally (generation {generation})", self.name);
        generation
    }

    pub fn snapshot(&self) -> JobSnapshot<T> {
        self.tx.borrow().clone()
    }

    pub fn state(&self) -> JobState<T> {
        self.tx.borrow().state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot<T>> {
        self.tx.subscribe()
    }
}
