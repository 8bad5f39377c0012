use once_cell::sync::Lazy;
use regex::Regex;
use super::{BaseValue, InvalidValue};

define_value!(PhoneValue, String, validate);

impl PhoneValue {
  pub fn validate(val: &String) -> Result<(), InvalidValue> {
    static REGEX_PHONE: Lazy<Regex> = Lazy::new(|| {
      Regex::new(r"^[0-9+\-\s()]{10,15}$").expect("phone pattern is valid")
    });

    if val.is_empty() {
      return Err(InvalidValue::Empty);
    }
    if !REGEX_PHONE.is_match(val) {
      return Err(InvalidValue::BadFormat);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::super::InvalidValue;
  use super::PhoneValue;

  #[test]
  fn formats() {
    assert!(PhoneValue::try_new("0901234567").is_ok());
    assert!(PhoneValue::try_new("+84 (90) 123-45").is_ok());
    assert_eq!(PhoneValue::try_new(""), Err(InvalidValue::Empty));
    assert_eq!(PhoneValue::try_new("090123"), Err(InvalidValue::BadFormat));
    assert_eq!(PhoneValue::try_new("0901234567890123"), Err(InvalidValue::BadFormat));
    assert_eq!(PhoneValue::try_new("09012345ab"), Err(InvalidValue::BadFormat));
  }
}
