use super::{BaseValue, InvalidValue};

define_value!(UsernameValue, String, validate);

pub const USERNAME_MIN_LENGTH: usize = 3;

impl UsernameValue {
  pub fn validate(val: &String) -> Result<(), InvalidValue> {
    let trimmed = val.trim();
    if trimmed.is_empty() {
      return Err(InvalidValue::Empty);
    }
    if trimmed.chars().count() < USERNAME_MIN_LENGTH {
      return Err(InvalidValue::TooShort);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::super::InvalidValue;
  use super::UsernameValue;

  #[test]
  fn lengths() {
    assert_eq!(UsernameValue::try_new("   "), Err(InvalidValue::Empty));
    assert_eq!(UsernameValue::try_new("an"), Err(InvalidValue::TooShort));
    assert_eq!(UsernameValue::try_new(" an "), Err(InvalidValue::TooShort));
    assert!(UsernameValue::try_new("anh").is_ok());
  }
}
