use async_trait::async_trait;
use serde_json::Value;
use tracing::{event, Level};
use crate::AuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl From<Method> for reqwest::Method {
  fn from(method: Method) -> Self {
    match method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
      Method::Put => reqwest::Method::PUT,
      Method::Patch => reqwest::Method::PATCH,
      Method::Delete => reqwest::Method::DELETE,
    }
  }
}

/// One call to the API. `path` is an absolute URL or a path relative to the API base.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub path: String,
  pub body: Option<Value>,
  pub bearer: Option<String>,
}

impl ApiRequest {
  pub fn new<STR: Into<String>>(method: Method, path: STR) -> Self {
    ApiRequest {
      method,
      path: path.into(),
      body: None,
      bearer: None,
    }
  }

  pub fn post<STR: Into<String>>(path: STR) -> Self {
    Self::new(Method::Post, path)
  }

  pub fn with_body(mut self, body: Value) -> Self {
    self.body = Some(body);
    self
  }

  pub fn with_bearer<STR: Into<String>>(mut self, token: STR) -> Self {
    self.bearer = Some(token.into());
    self
  }
}

impl std::fmt::Debug for ApiRequest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ApiRequest")
      .field("method", &self.method)
      .field("path", &self.path)
      .field("has_body", &self.body.is_some())
      .field("bearer", &self.bearer.as_ref().map(|_token| "***"))
      .finish()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status: u16,
  /// Decoded JSON body, `Null` when the body is empty or not JSON
  pub body: Value,
}

impl ApiResponse {
  pub fn new(status: u16, body: Value) -> Self {
    ApiResponse { status, body }
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
  #[error("request timed out")]
  Timeout,
  #[error("could not reach the server: {0}")]
  Connect(String),
  #[error("{0}")]
  Other(String),
}

impl From<reqwest::Error> for TransportError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      TransportError::Timeout
    } else if err.is_connect() {
      TransportError::Connect(err.to_string())
    } else {
      TransportError::Other(err.to_string())
    }
  }
}

/// Sends [`ApiRequest`]s. Any non-2xx status is an `Ok` response; only failing to get a
/// response at all is an error.
#[async_trait]
pub trait AuthTransport: Send + Sync {
  async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`AuthTransport`] over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
  config: AuthConfig,
}

impl HttpTransport {
  pub fn new(config: AuthConfig) -> Result<Self, TransportError> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()?;
    Ok(HttpTransport { client, config })
  }

  pub fn config(&self) -> &AuthConfig {
    &self.config
  }
}

#[async_trait]
impl AuthTransport for HttpTransport {
  async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    let url = self.config.api_url(&request.path);
    let mut builder = self.client
      .request(request.method.into(), &url)
      .header(reqwest::header::CONTENT_TYPE, "application/json");
    if let Some(token) = &request.bearer {
      builder = builder.bearer_auth(token);
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    event!(Level::DEBUG, method = ?request.method, url = %url, status, "api response");
    Ok(ApiResponse { status, body })
  }
}
