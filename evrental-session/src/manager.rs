use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{event, Level};
use evrental_data::RegistrationFields;
use crate::{
  ApiErrorBody, ApiRequest, ApiResponse, AuthConfig, AuthError, AuthResponse, AuthTransport,
  Capability, HttpTransport, LoginRequest, MemoryTokenStore, Method, RefreshRequest, Session,
  TokenStore, User,
};
use crate::store::{ACCESS_TOKEN_KEY, CURRENT_USER_KEY, REFRESH_TOKEN_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
  Login,
  Register,
}

#[derive(Default)]
struct SessionSlot {
  session: Option<Session>,
  // bumped whenever the signed-in identity changes, never by a refresh
  epoch: u64,
}

/// Holds the signed-in session and applies it to outgoing calls.
///
/// An authenticated call that comes back 401 refreshes the tokens once and retries once.
/// Concurrent 401s share a single refresh. The session is destroyed when the refresh fails
/// or the retry is rejected again, after which callers get [`AuthError::Unauthenticated`].
///
/// The manager is meant to be constructed once and shared (e.g. in an `Arc`) with everything
/// that issues authenticated calls.
pub struct SessionManager {
  config: AuthConfig,
  transport: Arc<dyn AuthTransport>,
  store: Arc<dyn TokenStore>,
  session: RwLock<SessionSlot>,
  refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for SessionManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SessionManager")
      .field("config", &self.config)
      .field("session", &self.session())
      .finish()
  }
}

impl SessionManager {
  /// Create a manager, restoring the session persisted in `store` if there is a complete one
  pub fn new(config: AuthConfig, transport: Arc<dyn AuthTransport>, store: Arc<dyn TokenStore>) -> Self {
    let restored = restore_session(store.as_ref());
    if restored.is_none() {
      clear_store(store.as_ref());
    }
    SessionManager {
      config,
      transport,
      store,
      session: RwLock::new(SessionSlot { session: restored, epoch: 0 }),
      refresh_lock: Mutex::new(()),
    }
  }

  /// Manager over [`HttpTransport`] with an in-memory token store
  pub fn with_http(config: AuthConfig) -> Result<Self, AuthError> {
    let transport = HttpTransport::new(config.clone())?;
    Ok(Self::new(config, Arc::new(transport), Arc::new(MemoryTokenStore::new())))
  }

  pub fn config(&self) -> &AuthConfig {
    &self.config
  }

  pub fn session(&self) -> Option<Session> {
    self.slot().session.clone()
  }

  pub fn current_user(&self) -> Option<User> {
    self.session().map(|session| session.user)
  }

  pub fn access_token(&self) -> Option<String> {
    self.session().map(|session| session.access_token)
  }

  /// True when an access token is held. Expiry is not checked.
  pub fn is_authenticated(&self) -> bool {
    self.slot().session.is_some()
  }

  /// The current user, if their role allows `capability`
  pub fn require(&self, capability: Capability) -> Result<User, AuthError> {
    let user = self.current_user().ok_or(AuthError::Unauthenticated)?;
    if user.role.allows(capability) {
      Ok(user)
    } else {
      Err(AuthError::Forbidden { capability, role: user.role })
    }
  }

  pub async fn login(&self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
    let body = to_body(&LoginRequest { identifier, secret })?;
    let request = ApiRequest::post(self.config.login_url()).with_body(body);
    let session = self.exchange(request, Endpoint::Login).await?;
    event!(Level::INFO, user = %session.user.username, role = %session.user.role, "logged in");
    Ok(session)
  }

  /// Validate `fields`, then create the account and sign in as it
  pub async fn register(&self, fields: &RegistrationFields) -> Result<Session, AuthError> {
    fields.validate().map_err(AuthError::Validation)?;
    let request = ApiRequest::post(self.config.register_url()).with_body(to_body(fields)?);
    let session = self.exchange(request, Endpoint::Register).await?;
    event!(Level::INFO, user = %session.user.username, "registered");
    Ok(session)
  }

  async fn exchange(&self, request: ApiRequest, endpoint: Endpoint) -> Result<Session, AuthError> {
    let response = self.transport.send(request).await?;
    if !response.is_success() {
      let err = credential_failure(&response, endpoint);
      event!(Level::DEBUG, status = response.status, ?endpoint, "credentials rejected");
      return Err(err);
    }
    let session = AuthResponse::from_body(&response.body)?.into_session(Utc::now(), None)?;
    self.establish(session.clone());
    Ok(session)
  }

  /// Send an authenticated call, refreshing and retrying once on a 401
  pub async fn authenticated_request(&self, method: Method, path: &str, body: Option<Value>)
    -> Result<ApiResponse, AuthError>
  {
    let (token, epoch) = self.current_token().ok_or(AuthError::Unauthenticated)?;
    let mut request = ApiRequest::new(method, path);
    request.body = body;

    let response = self.transport.send(request.clone().with_bearer(token.as_str())).await?;
    if response.status != 401 {
      return check_response(response);
    }

    event!(Level::DEBUG, path, "access token rejected, refreshing");
    let new_token = self.refresh_after(&token, epoch).await?;
    let retry = self.transport.send(request.with_bearer(new_token)).await?;
    if retry.status == 401 {
      event!(Level::INFO, path, "refreshed token rejected, ending session");
      self.clear_if(epoch);
      return Err(AuthError::Unauthenticated);
    }
    check_response(retry)
  }

  /// [`authenticated_request`](SessionManager::authenticated_request) decoding the body as `T`
  pub async fn authenticated_json<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>)
    -> Result<T, AuthError>
  {
    let response = self.authenticated_request(method, path, body).await?;
    serde_json::from_value(response.body).map_err(|e| AuthError::Decode(e.to_string()))
  }

  /// Exchange the refresh token for a new token pair. Any failure ends the session.
  pub async fn refresh(&self) -> Result<Session, AuthError> {
    let _refreshing = self.refresh_lock.lock().await;
    self.refresh_locked().await
  }

  /// Refresh unless someone else already replaced `stale_token`, returning the token to retry with.
  ///
  /// `epoch` is the session the stale token belonged to. If a different user has signed in
  /// since, the call is not retried on their behalf.
  async fn refresh_after(&self, stale_token: &str, epoch: u64) -> Result<String, AuthError> {
    let _refreshing = self.refresh_lock.lock().await;
    match self.current_token() {
      None => Err(AuthError::Unauthenticated),
      Some((_, current_epoch)) if current_epoch != epoch => {
        event!(Level::DEBUG, "session changed while the request was in flight");
        Err(AuthError::Unauthenticated)
      },
      Some((current, _)) if current != stale_token => {
        event!(Level::DEBUG, "reusing token from concurrent refresh");
        Ok(current)
      },
      Some(_) => self.refresh_locked().await.map(|session| session.access_token),
    }
  }

  // callers hold `refresh_lock`
  async fn refresh_locked(&self) -> Result<Session, AuthError> {
    let (previous, epoch) = {
      let slot = self.slot();
      (slot.session.clone(), slot.epoch)
    };
    let refresh_token = match previous.as_ref().and_then(|session| session.refresh_token.clone()) {
      Some(token) => token,
      None => {
        event!(Level::DEBUG, "no refresh token, ending session");
        self.clear_if(epoch);
        return Err(AuthError::Unauthenticated);
      },
    };

    let body = to_body(&RefreshRequest { refresh_token: &refresh_token })?;
    let request = ApiRequest::post(self.config.refresh_url()).with_body(body);
    let response = match self.transport.send(request).await {
      Ok(response) => response,
      Err(err) => {
        event!(Level::INFO, error = %err, "refresh failed, ending session");
        self.clear_if(epoch);
        return Err(err.into());
      },
    };
    if !response.is_success() {
      event!(Level::INFO, status = response.status, "refresh rejected, ending session");
      self.clear_if(epoch);
      return Err(AuthError::Unauthenticated);
    }

    let refreshed = AuthResponse::from_body(&response.body)
      .and_then(|auth| auth.into_session(Utc::now(), previous.as_ref()));
    match refreshed {
      Ok(session) => {
        if self.replace_if(session.clone(), epoch) {
          event!(Level::DEBUG, "tokens refreshed");
          Ok(session)
        } else {
          event!(Level::DEBUG, "session changed during refresh, dropping refreshed tokens");
          Err(AuthError::Unauthenticated)
        }
      },
      Err(err) => {
        event!(Level::INFO, error = %err, "unreadable refresh response, ending session");
        self.clear_if(epoch);
        Err(AuthError::Unauthenticated)
      },
    }
  }

  /// Forget the session, then tell the server. Never fails.
  pub async fn logout(&self) {
    let previous = self.take();
    let Some(session) = previous else {
      return;
    };
    event!(Level::INFO, user = %session.user.username, "logged out");

    let request = ApiRequest::post(self.config.logout_url()).with_bearer(session.access_token);
    match self.transport.send(request).await {
      Ok(response) if response.is_success() => (),
      Ok(response) => event!(Level::DEBUG, status = response.status, "logout notification rejected"),
      Err(err) => event!(Level::DEBUG, error = %err, "logout notification failed"),
    }
  }

  fn slot(&self) -> RwLockReadGuard<'_, SessionSlot> {
    self.session.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn slot_mut(&self) -> RwLockWriteGuard<'_, SessionSlot> {
    self.session.write().unwrap_or_else(PoisonError::into_inner)
  }

  fn current_token(&self) -> Option<(String, u64)> {
    let slot = self.slot();
    slot.session.as_ref().map(|session| (session.access_token.clone(), slot.epoch))
  }

  /// Install a newly signed-in session
  fn establish(&self, session: Session) {
    let mut slot = self.slot_mut();
    self.persist(&session);
    slot.session = Some(session);
    slot.epoch += 1;
  }

  /// Swap in refreshed tokens, unless the session changed hands since `epoch`
  fn replace_if(&self, session: Session, epoch: u64) -> bool {
    let mut slot = self.slot_mut();
    if slot.epoch != epoch {
      return false;
    }
    self.persist(&session);
    slot.session = Some(session);
    true
  }

  fn persist(&self, session: &Session) {
    self.store.set(ACCESS_TOKEN_KEY, &session.access_token);
    match &session.refresh_token {
      Some(token) => self.store.set(REFRESH_TOKEN_KEY, token),
      None => self.store.remove(REFRESH_TOKEN_KEY),
    }
    match serde_json::to_string(&session.user) {
      Ok(user) => self.store.set(CURRENT_USER_KEY, &user),
      Err(err) => {
        event!(Level::WARN, error = %err, "could not persist user record");
        self.store.remove(CURRENT_USER_KEY);
      },
    }
  }

  fn take(&self) -> Option<Session> {
    let mut slot = self.slot_mut();
    slot.epoch += 1;
    clear_store(self.store.as_ref());
    slot.session.take()
  }

  /// End the session, unless it already changed hands since `epoch`
  fn clear_if(&self, epoch: u64) {
    let mut slot = self.slot_mut();
    if slot.epoch == epoch {
      slot.epoch += 1;
      clear_store(self.store.as_ref());
      slot.session = None;
    }
  }
}

fn restore_session(store: &dyn TokenStore) -> Option<Session> {
  let access_token = store.get(ACCESS_TOKEN_KEY)?;
  let user = serde_json::from_str(&store.get(CURRENT_USER_KEY)?).ok()?;
  Some(Session {
    access_token,
    refresh_token: store.get(REFRESH_TOKEN_KEY),
    expires_at: None,
    user,
  })
}

fn clear_store(store: &dyn TokenStore) {
  store.remove(ACCESS_TOKEN_KEY);
  store.remove(REFRESH_TOKEN_KEY);
  store.remove(CURRENT_USER_KEY);
}

fn to_body<T: serde::Serialize>(val: &T) -> Result<Value, AuthError> {
  serde_json::to_value(val).map_err(|e| AuthError::Decode(e.to_string()))
}

fn credential_failure(response: &ApiResponse, endpoint: Endpoint) -> AuthError {
  let body = ApiErrorBody::from_body(&response.body);
  match (response.status, endpoint) {
    (400 | 401, _) => AuthError::InvalidCredentials { message: body.message() },
    (409, Endpoint::Register) => AuthError::DuplicateAccount { message: body.message() },
    _ => api_failure(response.status, body),
  }
}

fn check_response(response: ApiResponse) -> Result<ApiResponse, AuthError> {
  if response.is_success() {
    Ok(response)
  } else {
    Err(api_failure(response.status, ApiErrorBody::from_body(&response.body)))
  }
}

fn api_failure(status: u16, body: ApiErrorBody) -> AuthError {
  if status >= 500 {
    AuthError::ServiceUnavailable { reason: format!("server responded with {}: {}", status, body.message()) }
  } else {
    AuthError::Api { status, message: body.message(), errors: body.field_errors() }
  }
}
