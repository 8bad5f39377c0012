//! Authenticated API sessions for the EV rental client core
//!
//! [`SessionManager`] exchanges credentials for a [`Session`], attaches its access token to
//! outgoing calls and recovers once from an expired token. Network access goes through the
//! [`AuthTransport`] seam ([`HttpTransport`] in production) and the token pair is persisted
//! through a [`TokenStore`].

mod config;
pub use config::AuthConfig;

mod error;
pub use error::AuthError;

mod models;
pub use models::{ApiErrorBody, AuthResponse, Capability, LoginRequest, RefreshRequest, Role, Session, User};

pub mod store;
pub use store::{MemoryTokenStore, TokenStore};

mod transport;
pub use transport::{ApiRequest, ApiResponse, AuthTransport, HttpTransport, Method, TransportError};

mod manager;
pub use manager::SessionManager;

#[cfg(test)]
mod test;
