//! Predicates over accumulated flow data that gate a transition.
//!
//! A failing guard returns a [`GuardFailure`] whose `Display` text tells the user what is
//! still missing.

use evrental_data::{InvalidVars, RegistrationFields, StateData};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub enum GuardFailure {
  #[error("{0} is required")]
  Missing(String),
  #[error("{0} must be confirmed")]
  NotConfirmed(String),
  #[error("{start} must be before {end}")]
  NotBefore { start: String, end: String },
  #[error("{field} does not match")]
  Mismatch { field: String },
  #[error("{0}")]
  InvalidFields(InvalidVars),
  #[error("{0}")]
  Rejected(String),
}

pub trait Guard: std::fmt::Debug + Send + Sync {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure>;

  /// Check a transition that would merge `patch` into the `committed` flow data
  fn check_patch(&self, committed: &StateData, patch: &StateData) -> Result<(), GuardFailure> {
    self.check(&committed.merged(patch))
  }

  fn boxed(self) -> Box<dyn Guard> where Self: Sized + 'static {
    Box::new(self)
  }
}

fn present(data: &StateData, name: &str) -> bool {
  match data.get_str(name) {
    Some(s) => !s.trim().is_empty(),
    None => data.contains(name),
  }
}

/// Every named field is present. Blank strings count as missing.
#[derive(Debug, Clone)]
pub struct RequireVars {
  names: Vec<String>,
}

impl RequireVars {
  pub fn new<I, S>(names: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String>
  {
    RequireVars { names: names.into_iter().map(Into::into).collect() }
  }
}

impl Guard for RequireVars {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    match self.names.iter().find(|name| !present(data, name)) {
      Some(missing) => Err(GuardFailure::Missing(missing.clone())),
      None => Ok(()),
    }
  }
}

/// Every named field is `Boolean(true)`
#[derive(Debug, Clone)]
pub struct RequireTrue {
  names: Vec<String>,
}

impl RequireTrue {
  pub fn new<I, S>(names: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String>
  {
    RequireTrue { names: names.into_iter().map(Into::into).collect() }
  }
}

impl Guard for RequireTrue {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    match self.names.iter().find(|name| data.get_bool(name) != Some(true)) {
      Some(unconfirmed) => Err(GuardFailure::NotConfirmed(unconfirmed.clone())),
      None => Ok(()),
    }
  }
}

/// Both date fields are present and `start` is strictly earlier than `end`
#[derive(Debug, Clone)]
pub struct RequireBefore {
  start: String,
  end: String,
}

impl RequireBefore {
  pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
    RequireBefore { start: start.into(), end: end.into() }
  }
}

impl Guard for RequireBefore {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    let start = data.get_datetime(&self.start).ok_or_else(|| GuardFailure::Missing(self.start.clone()))?;
    let end = data.get_datetime(&self.end).ok_or_else(|| GuardFailure::Missing(self.end.clone()))?;
    if start < end {
      Ok(())
    } else {
      Err(GuardFailure::NotBefore { start: self.start.clone(), end: self.end.clone() })
    }
  }
}

/// `field` is present and holds the same value as `expected`.
///
/// During a transition `expected` is read from the committed data only, and a patch that
/// carries `expected` is refused.
#[derive(Debug, Clone)]
pub struct RequireMatch {
  field: String,
  expected: String,
}

impl RequireMatch {
  pub fn new<F: Into<String>, E: Into<String>>(field: F, expected: E) -> Self {
    RequireMatch { field: field.into(), expected: expected.into() }
  }
}

impl Guard for RequireMatch {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    if !present(data, &self.field) {
      return Err(GuardFailure::Missing(self.field.clone()));
    }
    match (data.get(&self.field), data.get(&self.expected)) {
      (Some(val), Some(expected)) if val == expected => Ok(()),
      _ => Err(GuardFailure::Mismatch { field: self.field.clone() }),
    }
  }

  fn check_patch(&self, committed: &StateData, patch: &StateData) -> Result<(), GuardFailure> {
    if patch.contains(&self.expected) {
      return Err(GuardFailure::Mismatch { field: self.expected.clone() });
    }
    let data = committed.merged(patch);
    if !present(&data, &self.field) {
      return Err(GuardFailure::Missing(self.field.clone()));
    }
    match (data.get(&self.field), committed.get(&self.expected)) {
      (Some(val), Some(expected)) if val == expected => Ok(()),
      _ => Err(GuardFailure::Mismatch { field: self.field.clone() }),
    }
  }
}

/// The sign-up fields in the data pass [`RegistrationFields::validate`]
#[derive(Debug, Clone, Default)]
pub struct RequireRegistration;

impl Guard for RequireRegistration {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    RegistrationFields::from_state_data(data)
      .validate()
      .map_err(GuardFailure::InvalidFields)
  }
}

/// Rejects with `message` when the numeric `field` is zero. An absent field passes.
#[derive(Debug, Clone)]
pub struct RequireNonZero {
  field: String,
  message: String,
}

impl RequireNonZero {
  pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
    RequireNonZero { field: field.into(), message: message.into() }
  }
}

impl Guard for RequireNonZero {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    match data.get_float(&self.field) {
      Some(val) if val == 0.0 => Err(GuardFailure::Rejected(self.message.clone())),
      _ => Ok(()),
    }
  }
}

/// Passes when every inner guard passes, reporting the first failure
#[derive(Debug)]
pub struct AllOf {
  guards: Vec<Box<dyn Guard>>,
}

impl AllOf {
  pub fn new(guards: Vec<Box<dyn Guard>>) -> Self {
    AllOf { guards }
  }
}

impl Guard for AllOf {
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    self.guards.iter().try_for_each(|guard| guard.check(data))
  }

  fn check_patch(&self, committed: &StateData, patch: &StateData) -> Result<(), GuardFailure> {
    self.guards.iter().try_for_each(|guard| guard.check_patch(committed, patch))
  }
}

/// Guard that wraps a closure.
pub struct CallbackGuard<F> {
  name: String,
  cb: F,
}

impl<F> std::fmt::Debug for CallbackGuard<F> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "CallbackGuard({})", self.name)
  }
}

impl<F> CallbackGuard<F>
    where F: Fn(&StateData) -> Result<(), GuardFailure> + Send + Sync
{
  pub fn new<STR: Into<String>>(name: STR, cb: F) -> Self {
    CallbackGuard { name: name.into(), cb }
  }
}

impl<F> Guard for CallbackGuard<F>
    where F: Fn(&StateData) -> Result<(), GuardFailure> + Send + Sync
{
  fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    (self.cb)(data)
  }
}
