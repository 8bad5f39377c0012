use std::path::Path;
use std::time::Duration;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where the auth API lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
  /// Base for the auth endpoints
  pub auth_base: String,
  /// Base that relative paths of authenticated requests are joined to
  pub api_base: String,
  pub login_path: String,
  pub register_path: String,
  pub refresh_path: String,
  pub logout_path: String,
  #[serde(with = "humantime_serde")]
  pub timeout: Duration,
}

impl Default for AuthConfig {
  fn default() -> Self {
    AuthConfig {
      auth_base: "https://localhost:7250/api/Auth".to_owned(),
      api_base: "http://localhost:3001/api".to_owned(),
      login_path: "/login".to_owned(),
      register_path: "/register".to_owned(),
      refresh_path: "/refresh".to_owned(),
      logout_path: "/logout".to_owned(),
      timeout: Duration::from_secs(10),
    }
  }
}

impl AuthConfig {
  /// Load configuration from multiple sources in order of precedence:
  /// 1. Default values
  /// 2. `evrental.toml` in the working directory, if present
  /// 3. Environment variables prefixed with `EVRENTAL_` (e.g. `EVRENTAL_AUTH_BASE`)
  pub fn load() -> Result<Self, ConfigError> {
    let mut builder = Config::builder();
    if Path::new("evrental.toml").exists() {
      builder = builder.add_source(File::with_name("evrental"));
    }
    builder = builder.add_source(Environment::with_prefix("EVRENTAL").try_parsing(true));
    builder.build()?.try_deserialize()
  }

  pub fn login_url(&self) -> String {
    join(&self.auth_base, &self.login_path)
  }

  pub fn register_url(&self) -> String {
    join(&self.auth_base, &self.register_path)
  }

  pub fn refresh_url(&self) -> String {
    join(&self.auth_base, &self.refresh_path)
  }

  pub fn logout_url(&self) -> String {
    join(&self.auth_base, &self.logout_path)
  }

  /// Absolute URLs pass through, anything else is joined to `api_base`
  pub fn api_url(&self, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
      path.to_owned()
    } else {
      join(&self.api_base, path)
    }
  }
}

fn join(base: &str, path: &str) -> String {
  format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}


#[cfg(test)]
mod tests {
  use std::time::Duration;
  use config::{Config, File, FileFormat};
  use super::AuthConfig;

  #[test]
  fn defaults() {
    let config = AuthConfig::default();
    assert_eq!(config.login_url(), "https://localhost:7250/api/Auth/login");
    assert_eq!(config.refresh_url(), "https://localhost:7250/api/Auth/refresh");
    assert_eq!(config.timeout, Duration::from_secs(10));
  }

  #[test]
  fn api_urls() {
    let config = AuthConfig { api_base: "http://localhost:3001/api/".to_owned(), ..AuthConfig::default() };
    assert_eq!(config.api_url("/bookings"), "http://localhost:3001/api/bookings");
    assert_eq!(config.api_url("stations/3"), "http://localhost:3001/api/stations/3");
    assert_eq!(config.api_url("https://cdn.evrental.vn/x"), "https://cdn.evrental.vn/x");
  }

  #[test]
  fn partial_toml_keeps_defaults() {
    let config: AuthConfig = Config::builder()
      .add_source(File::from_str("auth_base = \"https://auth.evrental.vn/api/Auth\"\ntimeout = \"2s 500ms\"", FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(config.login_url(), "https://auth.evrental.vn/api/Auth/login");
    assert_eq!(config.timeout, Duration::from_millis(2500));
    assert_eq!(config.logout_path, "/logout");
  }
}
