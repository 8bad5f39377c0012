use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use evrental_test_util::{api_error_json, auth_response_json};
use serde_json::{json, Value};
use tokio::sync::{Barrier, Notify};
use crate::{ApiRequest, ApiResponse, AuthTransport, TransportError};

pub const PASSWORD: &str = "Charge2026";

struct BackendState {
  accounts: HashMap<String, String>,
  valid_access: Option<String>,
  valid_refresh: Option<String>,
  refresh_roles: HashMap<String, String>,
  issued: u32,
  refresh_status: u16,
  outage: bool,
  protected_status: u16,
}

/// In-process stand-in for the auth API and one protected resource
pub struct FakeBackend {
  state: Mutex<BackendState>,
  requests: Mutex<Vec<ApiRequest>>,
  refresh_calls: AtomicUsize,
  stale_barrier: Option<Barrier>,
  refresh_hold: Option<RefreshHold>,
}

struct RefreshHold {
  arrived: Notify,
  release: Notify,
}

impl FakeBackend {
  pub fn new() -> Self {
    let mut accounts = HashMap::new();
    accounts.insert("renter".to_owned(), "customer".to_owned());
    accounts.insert("staff".to_owned(), "staff".to_owned());
    accounts.insert("admin".to_owned(), "admin".to_owned());
    FakeBackend {
      state: Mutex::new(BackendState {
        accounts,
        valid_access: None,
        valid_refresh: None,
        refresh_roles: HashMap::new(),
        issued: 0,
        refresh_status: 200,
        outage: false,
        protected_status: 200,
      }),
      requests: Mutex::new(Vec::new()),
      refresh_calls: AtomicUsize::new(0),
      stale_barrier: None,
      refresh_hold: None,
    }
  }

  /// Requests with a stale token wait until `count` of them have arrived before getting their 401
  pub fn with_stale_barrier(mut self, count: usize) -> Self {
    self.stale_barrier = Some(Barrier::new(count));
    self
  }

  /// Wait alongside the stale-token requests held by [`with_stale_barrier`](FakeBackend::with_stale_barrier)
  pub async fn meet_stale_requests(&self) {
    if let Some(barrier) = &self.stale_barrier {
      barrier.wait().await;
    }
  }

  /// Accepted refresh requests wait for [`release_refresh`](FakeBackend::release_refresh) before answering
  pub fn with_refresh_hold(mut self) -> Self {
    self.refresh_hold = Some(RefreshHold { arrived: Notify::new(), release: Notify::new() });
    self
  }

  /// Resolves once a held refresh request has arrived
  pub async fn refresh_arrived(&self) {
    if let Some(hold) = &self.refresh_hold {
      hold.arrived.notified().await;
    }
  }

  pub fn release_refresh(&self) {
    if let Some(hold) = &self.refresh_hold {
      hold.release.notify_one();
    }
  }

  fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Stop accepting the current access token, as if it expired
  pub fn expire_access_token(&self) {
    self.state().valid_access = None;
  }

  pub fn reject_refresh(&self, status: u16) {
    self.state().refresh_status = status;
  }

  /// Reject access tokens even right after issuing them
  pub fn reject_all_tokens(&self) {
    self.state().protected_status = 401;
  }

  pub fn set_protected_status(&self, status: u16) {
    self.state().protected_status = status;
  }

  pub fn set_outage(&self, outage: bool) {
    self.state().outage = outage;
  }

  pub fn refresh_calls(&self) -> usize {
    self.refresh_calls.load(Ordering::SeqCst)
  }

  pub fn requests(&self) -> Vec<ApiRequest> {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn requests_to(&self, suffix: &str) -> usize {
    self.requests().iter().filter(|request| request.path.ends_with(suffix)).count()
  }

  fn issue(&self, role: &str) -> Value {
    let mut state = self.state();
    state.issued += 1;
    let access = format!("access-{}", state.issued);
    let refresh = format!("refresh-{}", state.issued);
    state.valid_access = Some(access.clone());
    state.valid_refresh = Some(refresh.clone());
    state.refresh_roles.insert(refresh.clone(), role.to_owned());
    auth_response_json(&access, &refresh, role)
  }

  fn body_str<'a>(request: &'a ApiRequest, field: &str) -> &'a str {
    request.body.as_ref().and_then(|body| body[field].as_str()).unwrap_or_default()
  }

  fn login(&self, request: &ApiRequest) -> ApiResponse {
    let identifier = Self::body_str(request, "identifier");
    let role = self.state().accounts.get(identifier).cloned();
    match role {
      Some(role) if Self::body_str(request, "secret") == PASSWORD => ApiResponse::new(200, self.issue(&role)),
      _ => ApiResponse::new(401, api_error_json(401, "Invalid username or password")),
    }
  }

  fn register(&self, request: &ApiRequest) -> ApiResponse {
    let username = Self::body_str(request, "username").to_owned();
    if self.state().accounts.contains_key(&username) {
      return ApiResponse::new(409, api_error_json(409, "Username is already taken"));
    }
    self.state().accounts.insert(username, "customer".to_owned());
    ApiResponse::new(201, self.issue("customer"))
  }

  async fn refresh(&self, request: &ApiRequest) -> ApiResponse {
    self.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let presented = Self::body_str(request, "refreshToken");
    let (status, role) = {
      let state = self.state();
      let role = match state.valid_refresh.as_deref() {
        Some(valid) if valid == presented => state.refresh_roles.get(presented).cloned(),
        _ => None,
      };
      (state.refresh_status, role)
    };
    if status != 200 {
      return ApiResponse::new(status, api_error_json(status, "Refresh token rejected"));
    }
    let Some(role) = role else {
      return ApiResponse::new(401, api_error_json(401, "Invalid refresh token"));
    };
    if let Some(hold) = &self.refresh_hold {
      hold.arrived.notify_one();
      hold.release.notified().await;
    }
    ApiResponse::new(200, self.issue(&role))
  }

  async fn protected(&self, request: &ApiRequest) -> ApiResponse {
    let (status, valid) = {
      let state = self.state();
      (state.protected_status, state.valid_access.clone())
    };
    let fresh = valid.is_some() && request.bearer == valid;
    if !fresh || status == 401 {
      if let Some(barrier) = &self.stale_barrier {
        if !fresh {
          barrier.wait().await;
        }
      }
      return ApiResponse::new(401, api_error_json(401, "Token expired"));
    }
    if status != 200 {
      return ApiResponse::new(status, api_error_json(status, "Station not found"));
    }
    ApiResponse::new(200, json!({"path": request.path, "token": request.bearer}))
  }
}

#[async_trait]
impl AuthTransport for FakeBackend {
  async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
    if self.state().outage {
      return Err(TransportError::Connect("connection refused".to_owned()));
    }
    let path = request.path.as_str();
    let response = if path.ends_with("/login") {
      self.login(&request)
    } else if path.ends_with("/register") {
      self.register(&request)
    } else if path.ends_with("/refresh") {
      self.refresh(&request).await
    } else if path.ends_with("/logout") {
      ApiResponse::new(204, Value::Null)
    } else {
      self.protected(&request).await
    };
    Ok(response)
  }
}
