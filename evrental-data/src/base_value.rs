use chrono::{DateTime, Utc};

/// The base store for step data. Every value in a [`StateData`](crate::StateData) is one of these.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "camelCase"))]
pub enum BaseValue {
  String(String),
  Boolean(bool),
  Float(f64),
  DateTime(DateTime<Utc>),
}

impl BaseValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      BaseValue::String(s) => Some(s.as_str()),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      BaseValue::Boolean(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_float(&self) -> Option<f64> {
    match self {
      BaseValue::Float(float) => Some(*float),
      _ => None,
    }
  }

  pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
    match self {
      BaseValue::DateTime(dt) => Some(dt),
      _ => None,
    }
  }
}

impl From<String> for BaseValue {
  fn from(s: String) -> Self {
    BaseValue::String(s)
  }
}

impl From<&str> for BaseValue {
  fn from(s: &str) -> Self {
    BaseValue::String(s.to_owned())
  }
}

impl From<bool> for BaseValue {
  fn from(b: bool) -> Self {
    BaseValue::Boolean(b)
  }
}

impl From<f64> for BaseValue {
  fn from(float: f64) -> Self {
    BaseValue::Float(float)
  }
}

impl From<i64> for BaseValue {
  fn from(int: i64) -> Self {
    BaseValue::Float(int as f64)
  }
}

impl From<u32> for BaseValue {
  fn from(int: u32) -> Self {
    BaseValue::Float(f64::from(int))
  }
}

impl From<DateTime<Utc>> for BaseValue {
  fn from(dt: DateTime<Utc>) -> Self {
    BaseValue::DateTime(dt)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use super::BaseValue;

  #[test]
  fn accessors_match_variant() {
    let station: BaseValue = "1".into();
    assert_eq!(station.as_str(), Some("1"));
    assert_eq!(station.as_bool(), None);

    let verified: BaseValue = true.into();
    assert_eq!(verified.as_bool(), Some(true));

    let battery: BaseValue = 85u32.into();
    assert_eq!(battery.as_float(), Some(85.0));

    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let start_val: BaseValue = start.into();
    assert_eq!(start_val.as_datetime(), Some(&start));
    assert_eq!(start_val.as_str(), None);
  }
}
