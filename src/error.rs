//! Error kinds reported by the credential bootstrapper.
//!
//! Everything that goes wrong before the browser is opened is a
//! configuration error; everything after is an authorization error.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(ConfigError),

    #[error("authorization error: {0}")]
    Authorization(AuthError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Configuration(err)
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Authorization(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "{} not found.\n\
         Download it from Google Cloud Console → Clients → your Desktop app → Download JSON\n\
         and save it as credentials.json in the current directory.",
        .0.display()
    )]
    Missing(PathBuf),

    #[error("cannot read {}: {err}", .path.display())]
    Read {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("{} is not valid JSON: {err}", .path.display())]
    Parse {
        path: PathBuf,
        err: serde_json::Error,
    },

    #[error("client secrets must be for a web or installed app")]
    UnknownClientType,

    #[error("client secrets field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("invalid {field} `{value}`: {err}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        err: url::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("cannot start callback listener: {0}")]
    Listener(String),

    #[error("consent denied: {error}{}", .description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Denied {
        error: String,
        description: Option<String>,
    },

    #[error("callback state does not match the request (possible CSRF)")]
    StateMismatch,

    #[error("no consent received within {0} seconds")]
    Timeout(u64),

    #[error("callback listener failed: {0}")]
    Callback(std::io::Error),

    #[error("token request failed: {0}")]
    Network(String),

    #[error("token endpoint rejected the code: {error}{}", .description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    TokenRejected {
        error: String,
        description: Option<String>,
    },

    #[error("token endpoint returned no refresh token")]
    MissingRefreshToken,
}
