//! Client registration data, read from the JSON file Google Cloud Console
//! hands out for an OAuth client.
//!
//! The file has a single top-level key naming the client type:
//!
//! ```json
//! { "installed": { "client_id": "...", "client_secret": "...",
//!                  "auth_uri": "...", "token_uri": "...",
//!                  "redirect_uris": ["http://localhost"] } }
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Installed,
    Web,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(skip, default = "default_client_type")]
    pub client_type: ClientType,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}
fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}
fn default_client_type() -> ClientType {
    ClientType::Installed
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Load and validate a client-secret file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            err,
        })?;
        Self::parse_at(&content, path)
    }

    /// Parse the file contents.
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_at(content, Path::new("<string>"))
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self> {
        Self::from_json(content).map_err(|e| match e {
            ParseFailure::Json(err) => ConfigError::Parse {
                path: path.to_path_buf(),
                err,
            }
            .into(),
            ParseFailure::Invalid(err) => err.into(),
        })
    }

    fn from_json(content: &str) -> std::result::Result<Self, ParseFailure> {
        let file: ClientSecretFile = serde_json::from_str(content).map_err(ParseFailure::Json)?;
        let mut secret = match (file.installed, file.web) {
            (Some(s), None) => s,
            (None, Some(mut s)) => {
                s.client_type = ClientType::Web;
                s
            }
            _ => return Err(ParseFailure::Invalid(ConfigError::UnknownClientType)),
        };
        secret.client_id = secret.client_id.trim().to_string();
        secret.client_secret = secret.client_secret.trim().to_string();
        secret.validate().map_err(ParseFailure::Invalid)?;
        Ok(secret)
    }

    /// Whether a loopback `http://localhost` style redirect is registered.
    /// Google accepts any port on such an entry.
    pub fn allows_loopback_redirect(&self) -> bool {
        self.redirect_uris.iter().any(|uri| {
            url::Url::parse(uri).is_ok_and(|u| {
                u.scheme() == "http"
                    && matches!(u.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
            })
        })
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::EmptyField("client_id"));
        }
        for (field, value) in [("auth_uri", &self.auth_uri), ("token_uri", &self.token_uri)] {
            url::Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
                field,
                value: value.clone(),
                err,
            })?;
        }
        Ok(())
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(ConfigError),
}
