//! Token endpoint: exchange an authorization code for tokens.
//!
//! `oauth2` builds and parses the requests; the transport below sends them
//! through a blocking `ureq` agent with a deadline.

use std::io::{self, Read};
use std::time::Duration;

use oauth2::basic::{BasicClient, BasicErrorResponse, BasicTokenResponse};
use oauth2::http::header::{HeaderName, HeaderValue};
use oauth2::http::{HeaderMap, Method, StatusCode};
use oauth2::{AuthorizationCode, HttpRequest, HttpResponse, PkceCodeVerifier, RequestTokenError};

use crate::error::{AuthError, Result};

pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

pub fn exchange_authorization_code(
    client: &BasicClient,
    code: String,
    pkce_verifier: PkceCodeVerifier,
    timeout: Duration,
) -> Result<BasicTokenResponse> {
    let agent = ureq::AgentBuilder::new()
        .redirects(0)
        .timeout(timeout)
        .build();

    tracing::debug!(token_uri = ?client.token_url().map(|u| u.as_str()), "exchanging authorization code");
    client
        .exchange_code(AuthorizationCode::new(code))
        .set_pkce_verifier(pkce_verifier)
        .request(|request| send(&agent, request))
        .map_err(|e| token_error(e).into())
}

/// Send one token request. Non-2xx answers are returned as responses so
/// `oauth2` can read the OAuth error body.
fn send(agent: &ureq::Agent, request: HttpRequest) -> io::Result<HttpResponse> {
    let mut req = match request.method {
        Method::POST => agent.post(request.url.as_str()),
        _ => agent.get(request.url.as_str()),
    };
    for (name, value) in request.headers.iter() {
        let value = value
            .to_str()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        req = req.set(name.as_str(), value);
    }

    let sent = match request.method {
        Method::POST => req.send_bytes(&request.body),
        _ => req.call(),
    };
    let response = match sent {
        Ok(response) | Err(ureq::Error::Status(_, response)) => response,
        Err(e) => return Err(io::Error::other(e.to_string())),
    };

    let status_code = StatusCode::from_u16(response.status())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut headers = HeaderMap::new();
    for name in response.headers_names() {
        if let (Ok(key), Some(Ok(value))) = (
            HeaderName::from_bytes(name.as_bytes()),
            response.header(&name).map(HeaderValue::from_str),
        ) {
            headers.append(key, value);
        }
    }
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

fn token_error(err: RequestTokenError<io::Error, BasicErrorResponse>) -> AuthError {
    match err {
        RequestTokenError::ServerResponse(resp) => AuthError::TokenRejected {
            error: resp.error().as_ref().to_string(),
            description: resp.error_description().cloned(),
        },
        RequestTokenError::Request(e) => AuthError::Network(e.to_string()),
        RequestTokenError::Parse(e, _) => AuthError::Network(format!("invalid token response: {e}")),
        RequestTokenError::Other(msg) => AuthError::Network(msg),
    }
}
