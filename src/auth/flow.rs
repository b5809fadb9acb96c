use std::time::Duration;

use chrono::Utc;

use super::browser::Browser;
use super::callback::CallbackListener;
use super::consent;
use super::token;
use crate::client_secret::ClientSecret;
use crate::credential::Credential;
use crate::error::Result;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Authorization-code flow for an installed application, using a loopback
/// redirect on an ephemeral port.
pub struct InstalledFlow {
    secret: ClientSecret,
    redirect_host: String,
    port: u16,
    timeout: Duration,
    token_timeout: Duration,
}

impl InstalledFlow {
    pub fn new(secret: ClientSecret) -> Self {
        Self {
            secret,
            redirect_host: "localhost".to_string(),
            port: 0,
            timeout: DEFAULT_TIMEOUT,
            token_timeout: token::DEFAULT_TOKEN_TIMEOUT,
        }
    }

    /// Host name placed in the redirect URI. The listener always binds the
    /// IPv4 loopback address.
    pub fn redirect_host(mut self, host: impl Into<String>) -> Self {
        self.redirect_host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// How long to wait for the user in the browser.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long the token endpoint gets to answer.
    pub fn token_timeout(mut self, timeout: Duration) -> Self {
        self.token_timeout = timeout;
        self
    }

    /// Run the flow to completion. Blocks until the browser redirects back,
    /// the user denies consent, or the timeout elapses.
    pub fn run_local_server<B: Browser>(&self, browser: &B) -> Result<Credential> {
        if !self.secret.allows_loopback_redirect() {
            tracing::warn!(
                redirect_uris = ?self.secret.redirect_uris,
                "client has no localhost redirect URI registered, the provider may refuse the redirect"
            );
        }

        let listener = CallbackListener::bind(self.port)?;
        let redirect_uri = format!("http://{}:{}/", self.redirect_host, listener.port());
        let client = consent::oauth_client(&self.secret, &redirect_uri)?;
        let request = consent::authorization_url(&client);

        eprintln!(
            "Please visit this URL to authorize this application: {}",
            request.url
        );
        if let Err(e) = browser.open(request.url.as_str()) {
            tracing::warn!(error = %e, "could not launch a browser, open the URL above manually");
        }

        let code = listener.wait_for_code(request.state.secret(), self.timeout)?;
        drop(listener);
        tracing::info!("consent granted, exchanging code");

        let tokens = token::exchange_authorization_code(
            &client,
            code,
            request.pkce_verifier,
            self.token_timeout,
        )?;
        Credential::from_token_response(&self.secret, &tokens, Utc::now())
    }
}
