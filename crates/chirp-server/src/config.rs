use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chirp_core::AppError;

use crate::auth::{ApiTokenVerifier, AuthMode};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4000";

/// Deployment mode. Production hides error details from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {s}")),
        }
    }
}

/// HTTP server settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    /// Mount the auth gate in front of the tweets routes.
    pub require_auth: bool,
    /// Bearer token accepted by the auth gate.
    pub api_token: Option<String>,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::default(),
            require_auth: false,
            api_token: None,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("require_auth", &self.require_auth)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `CHIRP_PORT` (optional, defaults to 8080)
    /// - `CHIRP_ENV` (optional, `development` | `test` | `production`, defaults to development)
    /// - `CHIRP_REQUIRE_AUTH` (optional, defaults to false)
    /// - `CHIRP_API_TOKEN` (required when auth is required)
    /// - `CHIRP_CORS_ORIGIN` (optional, defaults to `http://localhost:4000`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("CHIRP_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid CHIRP_PORT '{raw}': must be a port number"))
            })?,
        };

        let environment = match lookup("CHIRP_ENV") {
            None => Environment::default(),
            Some(raw) => raw.parse().map_err(AppError::ConfigError)?,
        };

        let require_auth = match lookup("CHIRP_REQUIRE_AUTH") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Invalid CHIRP_REQUIRE_AUTH '{raw}': expected true or false"
                ))
            })?,
        };

        let api_token = lookup("CHIRP_API_TOKEN").filter(|token| !token.is_empty());
        if require_auth && api_token.is_none() {
            return Err(AppError::ConfigError(
                "CHIRP_API_TOKEN must be set when CHIRP_REQUIRE_AUTH is enabled".into(),
            ));
        }

        let cors_origin =
            lookup("CHIRP_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            port,
            environment,
            require_auth,
            api_token,
            cors_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// The auth gate implied by this configuration.
    pub fn auth_mode(&self) -> Result<AuthMode, AppError> {
        if !self.require_auth {
            return Ok(AuthMode::Disabled);
        }

        let token = self.api_token.clone().ok_or_else(|| {
            AppError::ConfigError("Authentication is required but no API token is set".into())
        })?;
        Ok(AuthMode::Required(Arc::new(ApiTokenVerifier::new(token))))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
