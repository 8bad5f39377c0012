use super::{BaseValue, InvalidValue};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// A password that satisfies the sign-up rules. `Debug` never prints the secret.
#[derive(PartialEq, Clone)]
pub struct PasswordValue {
  val: String,
}

impl PasswordValue {
  pub fn try_new<V: Into<String>>(val: V) -> Result<Self, InvalidValue> {
    let val = val.into();
    Self::validate(&val)?;
    Ok(Self { val })
  }

  pub fn validate(val: &String) -> Result<(), InvalidValue> {
    if val.is_empty() {
      return Err(InvalidValue::Empty);
    }
    let len = val.chars().count();
    if len < PASSWORD_MIN_LENGTH {
      return Err(InvalidValue::TooShort);
    }
    if len > PASSWORD_MAX_LENGTH {
      return Err(InvalidValue::TooLong);
    }
    let has_lower = val.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = val.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = val.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
      return Err(InvalidValue::MissingCharClass);
    }
    Ok(())
  }

  pub fn val(&self) -> &String {
    &self.val
  }
}

impl std::fmt::Debug for PasswordValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "PasswordValue(***)")
  }
}

impl std::str::FromStr for PasswordValue {
  type Err = InvalidValue;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    PasswordValue::try_new(s)
  }
}

impl From<PasswordValue> for BaseValue {
  fn from(value: PasswordValue) -> Self {
    BaseValue::String(value.val)
  }
}
