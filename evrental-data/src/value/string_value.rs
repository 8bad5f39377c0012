use super::{BaseValue, InvalidValue};

define_value!(StringValue, String, validate);

impl StringValue {
  pub fn validate(val: &String) -> Result<(), InvalidValue> {
    if val.is_empty() {
      return Err(InvalidValue::Empty);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::super::InvalidValue;
  use super::StringValue;

  #[test]
  fn non_empty() {
    assert_eq!(StringValue::try_new(""), Err(InvalidValue::Empty));
    assert_eq!(StringValue::try_new("scratch on rear door").unwrap().val(), "scratch on rear door");
  }
}
