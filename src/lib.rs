pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod client_secret;
pub mod credential;
pub mod error;
pub mod logging;
pub mod resolve;

pub use error::{AuthError, ConfigError, Error};
