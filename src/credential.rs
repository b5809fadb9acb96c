//! The credential produced by a successful consent flow.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use oauth2::TokenResponse;
use oauth2::basic::BasicTokenResponse;
use std::fmt;

use crate::auth::scope;
use crate::client_secret::ClientSecret;
use crate::error::{AuthError, Result};

#[derive(Debug, Clone)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_uri: String,
    pub scopes: Vec<String>,
    pub granted_scopes: Option<Vec<String>>,
    pub token_type: String,
    pub access_token: String,
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// Combine client registration and a token response.
    ///
    /// Fails if the provider did not issue a refresh token, since that is
    /// the one value the downstream system cannot do without.
    pub fn from_token_response(
        secret: &ClientSecret,
        tokens: &BasicTokenResponse,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let refresh_token = tokens
            .refresh_token()
            .map(|t| t.secret().clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;
        let granted_scopes = tokens
            .scopes()
            .map(|scopes| scopes.iter().map(|s| s.as_str().to_string()).collect());

        Ok(Self {
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
            refresh_token,
            token_uri: secret.token_uri.clone(),
            scopes: scope::SCOPES.iter().map(|s| s.to_string()).collect(),
            granted_scopes,
            token_type: tokens.token_type().as_ref().to_string(),
            access_token: tokens.access_token().secret().clone(),
            expiry: tokens.expires_in().and_then(|ttl| expiry_after(now, ttl)),
        })
    }
}

/// `None` when the lifetime does not fit a timestamp.
fn expiry_after(now: DateTime<Utc>, ttl: std::time::Duration) -> Option<DateTime<Utc>> {
    let expiry = TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl));
    if expiry.is_none() {
        tracing::warn!(expires_in = ttl.as_secs(), "token lifetime out of range, omitting expiry");
    }
    expiry
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "client_id: {}", self.client_id)?;
        writeln!(f, "client_secret: {}", self.client_secret)?;
        writeln!(f, "refresh_token: {}", self.refresh_token)?;
        writeln!(f, "token_uri: {}", self.token_uri)?;
        writeln!(f, "scopes: {}", self.scopes.join(" "))?;
        if let Some(granted) = &self.granted_scopes {
            writeln!(f, "granted_scopes: {}", granted.join(" "))?;
        }
        writeln!(f, "token_type: {}", self.token_type)?;
        writeln!(f, "access_token: {}", self.access_token)?;
        match self.expiry {
            Some(expiry) => writeln!(
                f,
                "expiry: {}",
                expiry.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            None => writeln!(f, "expiry: none"),
        }
    }
}
