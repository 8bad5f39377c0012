use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use crate::AuthError;

/// What a signed-in user may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[serde(alias = "renter")]
  Customer,
  Staff,
  Admin,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Customer => "customer",
      Role::Staff => "staff",
      Role::Admin => "admin",
    }
  }

  pub fn allows(&self, capability: Capability) -> bool {
    match capability {
      Capability::BookVehicle => true,
      Capability::PerformCheckIn | Capability::ManageVehicles => matches!(self, Role::Staff | Role::Admin),
      Capability::ManageStations | Capability::ManageUsers => matches!(self, Role::Admin),
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Actions gated by [`Role`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
  BookVehicle,
  PerformCheckIn,
  ManageVehicles,
  ManageStations,
  ManageUsers,
}

impl std::fmt::Display for Capability {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Capability::BookVehicle => "book a vehicle",
      Capability::PerformCheckIn => "perform check-in",
      Capability::ManageVehicles => "manage vehicles",
      Capability::ManageStations => "manage stations",
      Capability::ManageUsers => "manage users",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(deserialize_with = "string_or_number")]
  pub id: String,
  pub username: String,
  pub email: String,
  pub role: Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contact_number: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Id {
    Text(String),
    Number(i64),
  }

  Ok(match Id::deserialize(deserializer)? {
    Id::Text(text) => text,
    Id::Number(number) => number.to_string(),
  })
}

/// The signed-in state. `Debug` never prints the tokens.
#[derive(Clone, PartialEq)]
pub struct Session {
  pub access_token: String,
  pub refresh_token: Option<String>,
  /// When the access token was said to expire. Expiry is still discovered through 401s.
  pub expires_at: Option<DateTime<Utc>>,
  pub user: User,
}

impl Session {
  pub fn role(&self) -> Role {
    self.user.role
  }
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("access_token", &"***")
      .field("refresh_token", &self.refresh_token.as_ref().map(|_token| "***"))
      .field("expires_at", &self.expires_at)
      .field("user", &self.user)
      .finish()
  }
}

/// Successful body of the login, register and refresh endpoints
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
  pub access_token: String,
  #[serde(default)]
  pub refresh_token: Option<String>,
  #[serde(default)]
  pub expires_in: Option<i64>,
  #[serde(default)]
  pub user: Option<User>,
}

impl AuthResponse {
  pub fn from_body(body: &serde_json::Value) -> Result<Self, AuthError> {
    Self::deserialize(body).map_err(|e| AuthError::Decode(e.to_string()))
  }

  /// Build the new session. Fields the response leaves out are taken from `previous`.
  pub fn into_session(self, now: DateTime<Utc>, previous: Option<&Session>) -> Result<Session, AuthError> {
    let user = match (self.user, previous) {
      (Some(user), _) => user,
      (None, Some(previous)) => previous.user.clone(),
      (None, None) => return Err(AuthError::Decode("response has no user record".to_owned())),
    };
    Ok(Session {
      access_token: self.access_token,
      refresh_token: self.refresh_token.or_else(|| previous.and_then(|p| p.refresh_token.clone())),
      expires_at: self.expires_in.map(|secs| now + Duration::seconds(secs)),
      user,
    })
  }
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
  pub identifier: &'a str,
  pub secret: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
  pub refresh_token: &'a str,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub status_code: Option<u16>,
  #[serde(default)]
  pub errors: Option<serde_json::Value>,
}

impl ApiErrorBody {
  /// Lenient decode: anything that is not an error object yields an empty body
  pub fn from_body(body: &serde_json::Value) -> Self {
    Self::deserialize(body).unwrap_or_default()
  }

  pub fn message(&self) -> String {
    self.message.clone()
      .filter(|m| !m.is_empty())
      .or_else(|| self.title.clone())
      .unwrap_or_else(|| "An error occurred".to_owned())
  }

  /// Field errors as `field -> messages`. Accepts both a list and a single string per field.
  pub fn field_errors(&self) -> std::collections::BTreeMap<String, Vec<String>> {
    let mut fields = std::collections::BTreeMap::new();
    if let Some(serde_json::Value::Object(map)) = &self.errors {
      for (field, val) in map {
        let messages = match val {
          serde_json::Value::String(message) => vec![message.clone()],
          serde_json::Value::Array(items) => items.iter().filter_map(|m| m.as_str().map(str::to_owned)).collect(),
          _ => continue,
        };
        fields.insert(field.clone(), messages);
      }
    }
    fields
  }
}
