use std::collections::BTreeMap;
use evrental_data::InvalidVars;
use crate::{Capability, Role, TransportError};

/// Failures of the session manager, one variant per way the UI reacts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
  /// Client-side field checks failed. Nothing was sent.
  #[error("please correct the highlighted fields: {0}")]
  Validation(InvalidVars),
  #[error("{message}")]
  InvalidCredentials { message: String },
  #[error("{message}")]
  DuplicateAccount { message: String },
  /// The session is gone. The user has to log in again.
  #[error("your session has ended, please log in again")]
  Unauthenticated,
  #[error("a {role} account cannot {capability}")]
  Forbidden { capability: Capability, role: Role },
  /// Network failure, timeout or 5xx. Worth trying again.
  #[error("the service is unavailable, please try again ({reason})")]
  ServiceUnavailable { reason: String },
  #[error("request failed with status {status}: {message}")]
  Api { status: u16, message: String, errors: BTreeMap<String, Vec<String>> },
  #[error("unexpected response: {0}")]
  Decode(String),
}

impl AuthError {
  pub fn is_unauthenticated(&self) -> bool {
    matches!(self, AuthError::Unauthenticated)
  }

  pub fn is_retryable(&self) -> bool {
    matches!(self, AuthError::ServiceUnavailable { .. })
  }

  /// Per-field messages for the form, empty for errors that are not about fields
  pub fn field_errors(&self) -> BTreeMap<String, String> {
    match self {
      AuthError::Validation(invalid) => invalid.iter()
        .map(|(field, invalid)| (field.clone(), invalid.to_string()))
        .collect(),
      AuthError::Api { errors, .. } => errors.iter()
        .map(|(field, messages)| (field.clone(), messages.join(" ")))
        .collect(),
      _ => BTreeMap::new(),
    }
  }
}

impl From<TransportError> for AuthError {
  fn from(err: TransportError) -> Self {
    AuthError::ServiceUnavailable { reason: err.to_string() }
  }
}


#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;
  use evrental_data::{InvalidValue, InvalidVars};
  use crate::{Capability, Role, TransportError};
  use super::AuthError;

  #[test]
  fn three_treatments() {
    let mut invalid = InvalidVars::new();
    invalid.insert("email", InvalidValue::BadFormat);
    let validation = AuthError::Validation(invalid);
    assert_eq!(validation.field_errors().get("email").map(String::as_str), Some("is not in the expected format"));
    assert!(!validation.is_retryable());

    let unavailable: AuthError = TransportError::Timeout.into();
    assert!(unavailable.is_retryable());
    assert!(unavailable.field_errors().is_empty());

    assert!(AuthError::Unauthenticated.is_unauthenticated());
  }

  #[test]
  fn messages() {
    let forbidden = AuthError::Forbidden { capability: Capability::PerformCheckIn, role: Role::Customer };
    assert_eq!(forbidden.to_string(), "a customer account cannot perform check-in");

    let mut errors = BTreeMap::new();
    errors.insert("Email".to_owned(), vec!["is taken".to_owned(), "is invalid".to_owned()]);
    let api = AuthError::Api { status: 422, message: "Unprocessable".to_owned(), errors };
    assert_eq!(api.field_errors()["Email"], "is taken is invalid");
  }
}
