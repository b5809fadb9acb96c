//! Load the client secret, run the consent flow, print the credential.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{Browser, InstalledFlow, SystemBrowser};
use crate::client_secret::ClientSecret;
use crate::resolve;

pub struct Options {
    pub credentials: PathBuf,
    pub port: u16,
    pub timeout: Duration,
    pub token_timeout: Duration,
    pub redirect_host: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            credentials: resolve::credentials_json(),
            port: 0,
            timeout: crate::auth::flow::DEFAULT_TIMEOUT,
            token_timeout: crate::auth::token::DEFAULT_TOKEN_TIMEOUT,
            redirect_host: "localhost".to_string(),
        }
    }
}

pub fn run(opts: &Options) -> Result<()> {
    let stdout = std::io::stdout();
    run_with(opts, &SystemBrowser, &mut stdout.lock())
}

/// Same as [`run`] with an injectable browser and output sink.
pub fn run_with<B: Browser, W: Write>(opts: &Options, browser: &B, out: &mut W) -> Result<()> {
    let secret = ClientSecret::load(&opts.credentials)?;
    tracing::debug!(
        path = %opts.credentials.display(),
        client_type = ?secret.client_type,
        "loaded client secret"
    );

    let credential = InstalledFlow::new(secret)
        .redirect_host(opts.redirect_host.clone())
        .port(opts.port)
        .timeout(opts.timeout)
        .token_timeout(opts.token_timeout)
        .run_local_server(browser)?;

    write!(out, "{}", credential)?;
    out.flush()?;
    Ok(())
}
