use chrono::{DateTime, Utc};
use super::{BaseValue, InvalidValue};

define_value!(DateTimeValue, DateTime<Utc>);

impl std::str::FromStr for DateTimeValue {
  type Err = InvalidValue;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() {
      return Err(InvalidValue::Empty);
    }
    DateTime::parse_from_rfc3339(s)
      .map(|dt| DateTimeValue::new(dt.with_timezone(&Utc)))
      .map_err(|_e| InvalidValue::BadFormat)
  }
}
