use evrental_base::IdError;
use evrental_data::{InvalidVars, var::VarId};
use crate::{GuardFailure, StateId};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub enum Error {
  // ID errors
  #[error(transparent)]
  VarId(IdError<VarId>),
  #[error(transparent)]
  StateId(IdError<StateId>),

  // transition errors
  #[error("no `{trigger}` transition from state `{state}`")]
  InvalidTransition { state: String, trigger: String },
  #[error("{failure}")]
  GuardFailed { state: String, trigger: String, failure: GuardFailure },
  #[error("invalid flow data: {0}")]
  InvalidData(InvalidVars),

  // definition errors
  #[error("snapshot is for flow `{found}` but this flow is `{expected}`")]
  DefinitionMismatch { expected: String, found: String },
  #[error("terminal state `{state}` cannot have a `{trigger}` transition")]
  TerminalEdge { state: String, trigger: String },
  #[error("state `{state}` declares `{trigger}` more than once")]
  DuplicateTrigger { state: String, trigger: String },
  #[error("flow declares no states")]
  NoStates,

  // driver errors
  #[error("another submission is still in progress")]
  Busy,
  #[error("the flow was closed before the submission finished")]
  Discarded,
}

impl Error {
  /// Whether the user can fix this by changing their input
  pub fn is_guard_failure(&self) -> bool {
    matches!(self, Error::GuardFailed { .. } | Error::InvalidData(_))
  }
}

macro_rules! from_id_error {
  ($id_type:ident) => {
    impl From<IdError<$id_type>> for Error {
      fn from(err: IdError<$id_type>) -> Self {
        Error::$id_type(err)
      }
    }
  };
}

from_id_error!(VarId);
from_id_error!(StateId);


#[cfg(test)]
mod tests {
  use crate::GuardFailure;
  use super::Error;

  #[test]
  fn guard_failed_shows_failure() {
    let err = Error::GuardFailed {
      state: "documents".to_owned(),
      trigger: "next".to_owned(),
      failure: GuardFailure::NotConfirmed("documentVerified".to_owned()),
    };
    assert_eq!(err.to_string(), "documentVerified must be confirmed");
    assert!(err.is_guard_failure());
    assert!(!Error::Busy.is_guard_failure());
  }
}
