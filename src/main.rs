use anyhow::Result;
use clap::Parser;

use drive_creds::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    drive_creds::logging::init(cli.verbose);
    drive_creds::bootstrap::run(&cli.options())
}
