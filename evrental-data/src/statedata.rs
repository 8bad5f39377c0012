use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use evrental_base::ObjectStore;
use super::{BaseValue, InvalidValue, InvalidVars};
use super::var::{Var, VarId};

/// Named [`BaseValue`]s accumulated by a flow, also used for the patches a step contributes.
///
/// # Examples
/// ```
/// # use evrental_data::StateData;
/// let mut data = StateData::new().with("stationId", "1");
/// data.merge_from(StateData::new().with("vehicleId", "5"));
/// assert_eq!(data.get_str("stationId"), Some("1"));
/// assert_eq!(data.get_str("vehicleId"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(transparent))]
pub struct StateData {
  data: BTreeMap<String, BaseValue>,
}

impl StateData {
  /// Create a new StateData instance
  pub fn new() -> Self {
    Self {
      data: BTreeMap::new()
    }
  }

  /// Builder form of [`insert`](StateData::insert)
  pub fn with<K, V>(mut self, name: K, val: V) -> Self
    where K: Into<String>, V: Into<BaseValue>
  {
    self.insert(name, val);
    self
  }

  /// Add a value, returning the one it replaced
  pub fn insert<K, V>(&mut self, name: K, val: V) -> Option<BaseValue>
    where K: Into<String>, V: Into<BaseValue>
  {
    self.data.insert(name.into(), val.into())
  }

  pub fn get(&self, name: &str) -> Option<&BaseValue> {
    self.data.get(name)
  }

  pub fn get_str(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(BaseValue::as_str)
  }

  pub fn get_bool(&self, name: &str) -> Option<bool> {
    self.get(name).and_then(BaseValue::as_bool)
  }

  pub fn get_float(&self, name: &str) -> Option<f64> {
    self.get(name).and_then(BaseValue::as_float)
  }

  pub fn get_datetime(&self, name: &str) -> Option<&DateTime<Utc>> {
    self.get(name).and_then(BaseValue::as_datetime)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.data.contains_key(name)
  }

  pub fn remove(&mut self, name: &str) -> Option<BaseValue> {
    self.data.remove(name)
  }

  pub fn clear(&mut self) {
    self.data.clear();
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Merge the data from another `StateData` into this one. Values in `src` win.
  pub fn merge_from(&mut self, src: StateData) {
    for (k, v) in src.data {
      self.data.insert(k, v);
    }
  }

  /// Copy of this data with `patch` merged on top
  pub fn merged(&self, patch: &StateData) -> StateData {
    let mut merged = self.clone();
    merged.merge_from(patch.clone());
    merged
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &BaseValue)> {
    self.data.iter()
  }

  /// Check every entry against the declared `vars`, collecting all failures
  pub fn validate_against(&self, vars: &ObjectStore<Var, VarId>) -> Result<(), InvalidVars> {
    let mut invalid = InvalidVars::new();
    for (name, val) in self.data.iter() {
      let result = match vars.get_by_name(name) {
        Some(var) => var.validate_val(val),
        None => Err(InvalidValue::Undeclared),
      };
      if let Err(e) = result {
        invalid.insert(name.clone(), e);
      }
    }
    invalid.into_result()
  }

  /// Create a `StateData` from raw string input (e.g. a submitted form), parsing each entry by its declared var
  pub fn from_strs<'a, T>(vars: &ObjectStore<Var, VarId>, iter: T) -> Result<Self, InvalidVars>
    where T: IntoIterator<Item = (&'a str, &'a str)>
  {
    let mut invalid = InvalidVars::new();
    let mut data = StateData::new();
    for (name, raw) in iter {
      let parsed = vars.get_by_name(name)
        .ok_or(InvalidValue::Undeclared)
        .and_then(|var| var.value_from_str(raw));
      match parsed {
        Ok(val) => { data.insert(name, val); },
        Err(e) => invalid.insert(name, e),
      }
    }
    invalid.into_result()?;
    Ok(data)
  }
}

impl<K, V> FromIterator<(K, V)> for StateData
  where K: Into<String>, V: Into<BaseValue>
{
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut data = StateData::new();
    for (name, val) in iter {
      data.insert(name, val);
    }
    data
  }
}
