use serde_json::{json, Value};

pub fn test_id_val() -> u32 {
  use std::sync::atomic::{AtomicU32, Ordering};
  static COUNT: AtomicU32 = AtomicU32::new(0);

  // add extra bits to make it easy to identiy test IDs
  (u16::MAX as u32) << 16 | COUNT.fetch_add(1, Ordering::SeqCst)
}

#[macro_export]
macro_rules! test_id {
  ($id_type:ident) => {
    $id_type::new($crate::test_id_val())
  }
}

/// User record as the auth API returns it
pub fn user_json(id: &str, role: &str) -> Value {
  json!({
    "id": id,
    "username": format!("user-{}", id),
    "email": format!("user-{}@evrental.test", id),
    "role": role,
    "contactNumber": "0901234567",
  })
}

/// Successful login/register/refresh body
pub fn auth_response_json(access_token: &str, refresh_token: &str, role: &str) -> Value {
  json!({
    "accessToken": access_token,
    "refreshToken": refresh_token,
    "expiresIn": 3600,
    "user": user_json("42", role),
  })
}

/// Error body in the shape the auth API uses for non-2xx responses
pub fn api_error_json(status: u16, message: &str) -> Value {
  json!({
    "message": message,
    "statusCode": status,
  })
}
