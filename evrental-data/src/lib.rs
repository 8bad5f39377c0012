//! Data for the EV rental client core
//!
//! Flows accumulate step data as a [`StateData`] map of named [`BaseValue`]s. Each
//! name is declared up front as a [`Var`] so data entering a flow can be type-checked.
//! Form input is checked with the validated value types (e.g. [`EmailValue`]) which
//! [`RegistrationFields`] combines into the sign-up rules.

mod error;
pub use error::{InvalidValue, InvalidVars};

mod base_value;
pub use base_value::BaseValue;

mod statedata;
pub use statedata::StateData;

pub mod var;
pub use var::{Var, VarId, VarKind};

pub mod value;
pub use value::{BoolValue, DateTimeValue, EmailValue, PasswordValue, PhoneValue, StringValue, TrueValue, UsernameValue};

mod registration;
pub use registration::RegistrationFields;
