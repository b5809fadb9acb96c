//! Shared test fixtures: client-secret files, a fake browser and a mock
//! token endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use drive_creds::auth::Browser;
use tempfile::TempDir;

pub const CLIENT_ID: &str = "1234-test.apps.googleusercontent.com";
pub const CLIENT_SECRET: &str = "GOCSPX-test-secret";
pub const REFRESH_TOKEN: &str = "1//0gTestRefreshToken";

/// Write an `installed` client-secret file pointing at `token_uri`.
pub fn write_credentials_json(dir: &Path, token_uri: &str) -> PathBuf {
    let content = format!(
        r#"{{
  "installed": {{
    "client_id": "{CLIENT_ID}",
    "project_id": "relay-test",
    "auth_uri": "https://accounts.google.com/o/oauth2/auth",
    "token_uri": "{token_uri}",
    "client_secret": "{CLIENT_SECRET}",
    "redirect_uris": ["http://localhost"]
  }}
}}"#
    );
    let path = dir.join("credentials.json");
    std::fs::write(&path, content).unwrap();
    path
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// What the fake browser does with the consent URL.
#[derive(Clone, Copy)]
pub enum Consent {
    Grant,
    Deny,
    WrongState,
    /// Hit an unrelated path first, then grant.
    FaviconThenGrant,
    /// Never come back.
    Ignore,
}

/// Stands in for the user: parses the consent URL and calls the redirect.
pub struct FakeBrowser {
    consent: Consent,
    pub opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn new(consent: Consent) -> Self {
        Self {
            consent,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened_query(&self) -> HashMap<String, String> {
        let opened = self.opened.lock().unwrap();
        let url = url::Url::parse(opened.first().expect("browser never opened")).unwrap();
        url.query_pairs().into_owned().collect()
    }
}

impl Browser for FakeBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());

        let query: HashMap<String, String> = url::Url::parse(url)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect();
        let redirect = query["redirect_uri"].clone();
        let state = query["state"].clone();
        let consent = self.consent;

        thread::spawn(move || {
            let state = state.as_str();
            match consent {
                Consent::Grant => call_redirect(&redirect, &[("code", "4/0AdTestCode"), ("state", state)]),
                Consent::Deny => call_redirect(&redirect, &[("error", "access_denied"), ("state", state)]),
                Consent::WrongState => {
                    call_redirect(&redirect, &[("code", "4/0AdTestCode"), ("state", "forged")])
                }
                Consent::FaviconThenGrant => {
                    let _ = ureq::get(&format!("{redirect}favicon.ico")).call();
                    call_redirect(&redirect, &[("code", "4/0AdTestCode"), ("state", state)]);
                }
                Consent::Ignore => {}
            }
        });
        Ok(())
    }
}

fn call_redirect(redirect: &str, params: &[(&str, &str)]) {
    let mut req = ureq::get(redirect);
    for (key, value) in params {
        req = req.query(key, value);
    }
    // 4xx answers surface as Err; the listener side is what we assert on.
    let _ = req.call();
}

/// A browser that cannot be launched.
pub struct BrokenBrowser;

impl Browser for BrokenBrowser {
    fn open(&self, _url: &str) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"))
    }
}

/// One-shot token endpoint. Returns its URI and a receiver for the form
/// body of the request it served.
pub fn mock_token_endpoint(status: u16, body: &'static str) -> (String, Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut form = String::new();
            request.as_reader().read_to_string(&mut form).unwrap();
            let _ = tx.send(form);
            let header =
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .unwrap();
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{port}/token"), rx)
}

/// Token endpoint that accepts the request and never answers.
pub fn stalled_token_endpoint() -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();

    thread::spawn(move || {
        if let Ok(request) = server.recv() {
            thread::sleep(Duration::from_secs(60));
            drop(request);
        }
    });

    format!("http://127.0.0.1:{port}/token")
}

pub const TOKEN_OK: &str = r#"{
  "access_token": "ya29.a0TestAccess",
  "expires_in": 3599,
  "refresh_token": "1//0gTestRefreshToken",
  "scope": "https://www.googleapis.com/auth/drive",
  "token_type": "Bearer"
}"#;

pub const TOKEN_NO_REFRESH: &str = r#"{
  "access_token": "ya29.a0TestAccess",
  "expires_in": 3599,
  "token_type": "Bearer"
}"#;

pub const TOKEN_INVALID_GRANT: &str =
    r#"{"error": "invalid_grant", "error_description": "Bad Request"}"#;
