//! Installed-app OAuth 2.0 authorization-code flow (loopback redirect + PKCE),
//! built on the `oauth2` crate.

pub mod browser;
pub mod callback;
pub mod consent;
pub mod flow;
pub mod scope;
pub mod token;

pub use browser::{Browser, SystemBrowser};
pub use flow::InstalledFlow;
