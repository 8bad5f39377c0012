//! Client core for the EV rental platform
//!
//! Two pieces of logic live here:
//! - [`session`]: a [`SessionManager`](session::SessionManager) that signs users in, attaches
//!   their token to API calls and refreshes it once when it expires
//! - [`flow`]: a generic state machine for the guarded multi-step workflows of the product
//!   (booking, check-in, registration)
//!
//! # Examples
//! ```
//! # use std::sync::Arc;
//! use evrental::flow::{Flow, FlowId, workflows};
//! use evrental::data::StateData;
//!
//! let mut flow = Flow::new(FlowId::new(0), Arc::new(workflows::check_in().unwrap()));
//! flow.transition("next", StateData::new().with("bookingId", "BK-1042")).unwrap();
//!
//! // documents must be verified before inspection
//! let err = flow.transition("next", StateData::new()).unwrap_err();
//! assert_eq!(err.to_string(), "documentVerified must be confirmed");
//! assert_eq!(flow.current_state(), "documents");
//! ```

// include commonly used traits
pub mod prelude {
  pub use evrental_base::ObjectStoreContent;
  pub use evrental_flow::Guard;
  pub use evrental_session::{AuthTransport, TokenStore};
}

pub mod object {
  pub use evrental_base::{IdError, ObjectStore};
}

pub mod data {
  pub use evrental_data::{BaseValue, StateData, InvalidValue, InvalidVars, RegistrationFields};
  pub use evrental_data::var::{Var, VarId, VarKind};
  pub use evrental_data::value::{BoolValue, DateTimeValue, EmailValue, PasswordValue, PhoneValue, StringValue, TrueValue, UsernameValue};
}

pub mod flow {
  pub use evrental_flow::{Flow, FlowId, FlowDefinition, FlowDefinitionBuilder, FlowSnapshot, Transition};
  pub use evrental_flow::{State, StateId, Edge};
  pub use evrental_flow::{FlowDriver, SubmitError};
  pub use evrental_flow::{Guard, GuardFailure};
  pub use evrental_flow::guard;
  pub use evrental_flow::workflows;
  pub use evrental_flow::Error;
}

pub mod session {
  pub use evrental_session::{SessionManager, Session, User, Role, Capability};
  pub use evrental_session::{AuthConfig, AuthError};
  pub use evrental_session::{AuthTransport, HttpTransport, ApiRequest, ApiResponse, Method, TransportError};
  pub use evrental_session::{TokenStore, MemoryTokenStore};
  pub use evrental_session::store;
}
