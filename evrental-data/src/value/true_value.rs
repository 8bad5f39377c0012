use crate::InvalidValue;
use super::BaseValue;

/// Existence-only value: a checkbox that has been ticked
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TrueValue;

impl TrueValue {
  pub fn new() -> Self { Self {} }
  pub fn val(&self) -> bool { true }
}

impl From<TrueValue> for BaseValue {
  fn from(_value: TrueValue) -> Self {
    BaseValue::Boolean(true)
  }
}

impl std::str::FromStr for TrueValue {
  type Err = InvalidValue;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match &s.trim().to_lowercase()[..] {
      "true" | "on" => Ok(TrueValue::new()),
      _ => Err(InvalidValue::WrongValue),
    }
  }
}


#[cfg(test)]
mod tests {
  use crate::{BaseValue, InvalidValue};
  use super::TrueValue;

  #[test]
  fn is_true() {
    let base: BaseValue = TrueValue::new().into();
    assert_eq!(base, BaseValue::Boolean(true));
  }

  #[test]
  fn from_str() {
    assert_eq!("true".parse::<TrueValue>(), Ok(TrueValue::new()));
    assert_eq!("tRuE".parse::<TrueValue>(), Ok(TrueValue::new()));
    assert_eq!("false".parse::<TrueValue>(), Err(InvalidValue::WrongValue));
    assert_eq!("tRuEe".parse::<TrueValue>(), Err(InvalidValue::WrongValue));
  }
}
