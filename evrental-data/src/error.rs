use std::collections::BTreeMap;

/// Why a single value was rejected. The `Display` text is meant for the end user.
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidValue {
  #[error("has the wrong type")]
  WrongType,
  #[error("is not in the expected format")]
  BadFormat,
  #[error("is required")]
  Empty,
  #[error("is not an accepted value")]
  WrongValue,
  #[error("is too short")]
  TooShort,
  #[error("is too long")]
  TooLong,
  #[error("must contain an uppercase letter, a lowercase letter and a digit")]
  MissingCharClass,
  #[error("does not match")]
  Mismatch,
  #[error("is not a field of this form")]
  Undeclared,
}

/// Every rejected field of a form or data patch, keyed by field name
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidVars(pub BTreeMap<String, InvalidValue>);

impl InvalidVars {
  pub fn new() -> Self {
    Self(BTreeMap::new())
  }

  pub fn insert<STR: Into<String>>(&mut self, name: STR, invalid: InvalidValue) {
    self.0.insert(name.into(), invalid);
  }

  pub fn get(&self, name: &str) -> Option<&InvalidValue> {
    self.0.get(name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &InvalidValue)> {
    self.0.iter()
  }

  /// `Ok(())` when nothing was rejected
  pub fn into_result(self) -> Result<(), InvalidVars> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl std::error::Error for InvalidVars {}

impl std::fmt::Display for InvalidVars {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut first = true;
    for (name, invalid) in self.0.iter() {
      if !first {
        write!(f, "; ")?;
      }
      write!(f, "{} {}", name, invalid)?;
      first = false;
    }
    Ok(())
  }
}
