use super::{BaseValue, InvalidValue};

define_value!(BoolValue, bool);


impl std::str::FromStr for BoolValue {
  type Err = InvalidValue;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match &s.trim().to_lowercase()[..] {
      "true" | "on" => Ok(BoolValue::new(true)),
      "false" | "off" => Ok(BoolValue::new(false)),
      _ => Err(InvalidValue::WrongValue),
    }
  }
}
