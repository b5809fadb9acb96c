//! One-shot localhost listener for the OAuth redirect.
//!
//! Binds an ephemeral port before the browser is opened, then blocks until
//! a request carrying `code` or `error` arrives or the deadline passes.

use std::time::{Duration, Instant};

use tiny_http::{Request, Response, Server};
use url::Url;

use crate::error::{AuthError, Result};

pub const BIND_HOST: &str = "127.0.0.1";

const SUCCESS_MESSAGE: &str =
    "The authentication flow has completed. You may close this window.";
const FAILURE_MESSAGE: &str =
    "The authentication flow did not complete. You may close this window.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub struct CallbackListener {
    server: Server,
    port: u16,
}

impl CallbackListener {
    /// Bind the listener. Port 0 asks the OS for a free port.
    pub fn bind(port: u16) -> Result<Self> {
        let server = Server::http((BIND_HOST, port))
            .map_err(|e| AuthError::Listener(format!("{BIND_HOST}:{port}: {e}")))?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .ok_or_else(|| AuthError::Listener("listener has no IP address".to_string()))?;
        tracing::debug!(port, "callback listener bound");
        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the redirect and return the authorization code.
    pub fn wait_for_code(&self, expected_state: &str, timeout: Duration) -> Result<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(AuthError::Timeout(timeout.as_secs()).into());
            }
            let request = match self.server.recv_timeout(remaining) {
                Ok(Some(request)) => request,
                Ok(None) => return Err(AuthError::Timeout(timeout.as_secs()).into()),
                Err(e) => return Err(AuthError::Callback(e).into()),
            };

            let Some(payload) = parse_callback_target(request.url()) else {
                tracing::debug!(url = request.url(), "ignoring unrelated request");
                respond(request, 404, "Not found");
                continue;
            };

            return match check_payload(payload, expected_state) {
                Ok(code) => {
                    respond(request, 200, SUCCESS_MESSAGE);
                    Ok(code)
                }
                Err(e) => {
                    respond(request, 400, FAILURE_MESSAGE);
                    Err(e.into())
                }
            };
        }
    }
}

fn respond(request: Request, status: u16, body: &str) {
    let response = Response::from_string(body).with_status_code(status);
    if let Err(e) = request.respond(response) {
        tracing::debug!(error = %e, "failed to answer callback request");
    }
}

/// Extract the OAuth fields from a request target such as `/?code=..&state=..`.
///
/// Returns `None` when the request carries neither a code nor an error.
pub fn parse_callback_target(target: &str) -> Option<CallbackPayload> {
    let url = Url::parse("http://localhost/").ok()?.join(target).ok()?;
    let mut payload = CallbackPayload {
        code: None,
        state: None,
        error: None,
        error_description: None,
    };
    for (key, value) in url.query_pairs() {
        let slot = match key.as_ref() {
            "code" => &mut payload.code,
            "state" => &mut payload.state,
            "error" => &mut payload.error,
            "error_description" => &mut payload.error_description,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }
    if payload.code.is_none() && payload.error.is_none() {
        return None;
    }
    Some(payload)
}

fn check_payload(payload: CallbackPayload, expected_state: &str) -> std::result::Result<String, AuthError> {
    if payload.state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    if let Some(error) = payload.error {
        return Err(AuthError::Denied {
            error,
            description: payload.error_description,
        });
    }
    match payload.code {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err(AuthError::Denied {
            error: "empty authorization code".to_string(),
            description: None,
        }),
    }
}
