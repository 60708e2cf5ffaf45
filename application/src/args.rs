//! [`Args`] definitions.

use clap::Parser;

use crate::screen::Screen;

/// Command line client of the Toros Softball statistics API.
#[derive(Debug, Parser)]
#[command(name = "toros", version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "toros.toml", global = true)]
    pub config: String,

    /// [`Screen`] to open.
    #[command(subcommand)]
    pub screen: Screen,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments, or if the help or
    /// version is requested.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
