use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{event, Level};
use evrental_data::StateData;
use crate::{Error, Flow, FlowSnapshot, Transition};

/// Why a [`FlowDriver::submit`] did not transition the flow
#[derive(Debug, thiserror::Error)]
pub enum SubmitError<E> {
  #[error(transparent)]
  Flow(#[from] Error),
  #[error("submission failed: {0}")]
  Work(E),
}

/// Owns a [`Flow`] on behalf of a UI that runs asynchronous work before a transition.
///
/// Only one submission may be outstanding at a time. Once the driver is
/// [`close`](FlowDriver::close)d, a submission still in flight finishes but its result is
/// dropped without touching the flow.
#[derive(Debug)]
pub struct FlowDriver {
  flow: Mutex<Flow>,
  submitting: AtomicBool,
  closed: AtomicBool,
}

struct Submitting<'a>(&'a AtomicBool);

impl Drop for Submitting<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

impl FlowDriver {
  pub fn new(flow: Flow) -> Self {
    FlowDriver {
      flow: Mutex::new(flow),
      submitting: AtomicBool::new(false),
      closed: AtomicBool::new(false),
    }
  }

  fn lock(&self) -> MutexGuard<'_, Flow> {
    self.flow.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn start_submission(&self) -> Result<Submitting<'_>, Error> {
    if self.is_closed() {
      return Err(Error::Discarded);
    }
    self.submitting
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .map_err(|_current| Error::Busy)?;
    Ok(Submitting(&self.submitting))
  }

  /// Run `work` and apply the data it yields through the `trigger` edge.
  ///
  /// The trigger is checked before `work` starts. The guard is evaluated against the data
  /// `work` returns, after it completes.
  pub async fn submit<F, E>(&self, trigger: &str, work: F) -> Result<Transition, SubmitError<E>>
    where F: Future<Output = Result<StateData, E>>
  {
    let _submitting = self.start_submission()?;
    self.lock().check_trigger(trigger)?;

    let result = work.await;
    if self.is_closed() {
      event!(Level::DEBUG, trigger, "discarding submission for closed flow");
      return Err(Error::Discarded.into());
    }
    let patch = result.map_err(SubmitError::Work)?;
    let transition = self.lock().transition(trigger, patch)?;
    Ok(transition)
  }

  /// Synchronous transition, refused while a submission is outstanding
  pub fn transition(&self, trigger: &str, patch: StateData) -> Result<Transition, Error> {
    let _submitting = self.start_submission()?;
    self.lock().transition(trigger, patch)
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting.load(Ordering::SeqCst)
  }

  /// End the driver's lifetime. Results arriving afterwards are discarded.
  pub fn close(&self) {
    self.closed.store(true, Ordering::SeqCst);
  }

  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::SeqCst)
  }

  pub fn current_state(&self) -> String {
    self.lock().current_state().to_owned()
  }

  pub fn can_transition(&self, trigger: &str) -> bool {
    self.lock().can_transition(trigger)
  }

  pub fn data(&self) -> StateData {
    self.lock().data().clone()
  }

  pub fn snapshot(&self) -> FlowSnapshot {
    self.lock().snapshot()
  }

  pub fn reset(&self) {
    self.lock().reset();
  }

  /// Take the flow back, e.g. once it is terminal
  pub fn into_flow(self) -> Flow {
    self.flow.into_inner().unwrap_or_else(PoisonError::into_inner)
  }
}
