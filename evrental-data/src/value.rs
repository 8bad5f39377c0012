//! Validated values for form input. Each type checks its input on creation, typically with a
//! [`<YourValue>::try_new`](EmailValue::try_new) constructor, and converts into a [`BaseValue`]
//! for storage in a [`StateData`](crate::StateData).
//!
//! # Examples
//! ```
//! # use evrental_data::value::EmailValue;
//! assert!(matches!(EmailValue::try_new("bad email"), Err(_)));
//! assert!(matches!(EmailValue::try_new("renter@evrental.vn"), Ok(_)));
//! ```

use super::{BaseValue, InvalidValue};

macro_rules! define_base_value {
  ($name:ident, $basetype:ty) => {
    #[derive(Debug, PartialEq, Clone)]
    pub struct $name {
      val: $basetype,
    }

    impl $name {
      pub fn val(&self) -> &$basetype {
        &self.val
      }
    }

    impl From<$name> for BaseValue {
      fn from(value: $name) -> Self {
        BaseValue::from(value.val)
      }
    }
  };
}

macro_rules! define_value {
  ($name:ident, $basetype:ty) => {
    define_base_value!($name, $basetype);
    impl $name {
      pub fn new(val: $basetype) -> Self {
        $name { val }
      }
    }
  };

  ($name:ident, $basetype:ty, $validate_fn:ident) => {
    define_base_value!($name, $basetype);
    impl $name {
      pub fn try_new<V: Into<$basetype>>(val: V) -> Result<Self, InvalidValue> {
        let val = val.into();
        Self::$validate_fn(&val)?;
        Ok(Self { val })
      }
    }

    impl std::str::FromStr for $name {
      type Err = InvalidValue;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        $name::try_new(s)
      }
    }
  };
}

mod string_value;
pub use string_value::StringValue;

mod email_value;
pub use email_value::EmailValue;

mod username_value;
pub use username_value::UsernameValue;

mod password_value;
pub use password_value::PasswordValue;

mod phone_value;
pub use phone_value::PhoneValue;

mod bool_value;
pub use bool_value::BoolValue;

mod true_value;
pub use true_value::TrueValue;

mod datetime_value;
pub use datetime_value::DateTimeValue;
