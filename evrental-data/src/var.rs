use evrental_base::{ObjectStoreContent, generate_id_type};
use super::{BaseValue, InvalidValue, BoolValue, DateTimeValue, EmailValue, TrueValue};

generate_id_type!(VarId);

/// The kind of value a [`Var`] accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum VarKind {
  String,
  Boolean,
  /// A boolean that is only accepted once it is `true` (e.g. a ticked checkbox)
  True,
  Float,
  DateTime,
  Email,
}

/// A declared slot of step data
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
  id: VarId,
  kind: VarKind,
}

impl Var {
  pub fn new(id: VarId, kind: VarKind) -> Self {
    Self { id, kind }
  }

  pub fn id(&self) -> &VarId {
    &self.id
  }

  pub fn kind(&self) -> VarKind {
    self.kind
  }

  /// Check `val` is acceptable for this var
  pub fn validate_val(&self, val: &BaseValue) -> Result<(), InvalidValue> {
    match (self.kind, val) {
      (VarKind::String, BaseValue::String(_)) |
      (VarKind::Boolean, BaseValue::Boolean(_)) |
      (VarKind::Float, BaseValue::Float(_)) |
      (VarKind::DateTime, BaseValue::DateTime(_)) => Ok(()),
      (VarKind::True, BaseValue::Boolean(true)) => Ok(()),
      (VarKind::True, BaseValue::Boolean(false)) => Err(InvalidValue::WrongValue),
      (VarKind::Email, BaseValue::String(s)) => EmailValue::validate(s),
      _ => Err(InvalidValue::WrongType),
    }
  }

  /// Parse raw form input into a value for this var
  pub fn value_from_str(&self, s: &str) -> Result<BaseValue, InvalidValue> {
    match self.kind {
      VarKind::String => Ok(BaseValue::String(s.to_owned())),
      VarKind::Boolean => Ok(s.parse::<BoolValue>()?.into()),
      VarKind::True => Ok(s.parse::<TrueValue>()?.into()),
      VarKind::Float => s.trim().parse::<f64>()
        .map(BaseValue::Float)
        .map_err(|_e| InvalidValue::BadFormat),
      VarKind::DateTime => Ok(s.parse::<DateTimeValue>()?.into()),
      VarKind::Email => Ok(s.parse::<EmailValue>()?.into()),
    }
  }
}

impl ObjectStoreContent for Var {
  type IdType = VarId;

  fn new_id(id_val: u32) -> Self::IdType {
    VarId::new(id_val)
  }

  fn id(&self) -> &Self::IdType {
    &self.id
  }
}
