use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::bootstrap::Options;
use crate::resolve;

#[derive(Parser)]
#[command(
    name = "drive-creds",
    version,
    about = "Run the Google Drive OAuth consent flow and print client id, secret and refresh token"
)]
pub struct Cli {
    /// Client-secret JSON downloaded from Google Cloud Console
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Callback listener port (0 picks a free one)
    #[arg(long, default_value_t = 0)]
    pub port: u16,

    /// Seconds to wait for consent in the browser
    #[arg(long, value_name = "SECS", default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            credentials: resolve::credentials_path(self.credentials.as_deref()),
            port: self.port,
            timeout: Duration::from_secs(self.timeout),
            ..Options::default()
        }
    }
}
