pub mod cli;
pub mod commands;
pub mod error;
pub mod format;

pub use cli::{Cli, Commands, QuoteArgs};
pub use error::AppError;

use attain_config::Settings;

/// Run one command and return what should be printed on stdout.
pub fn run(cli: &Cli) -> Result<String, AppError> {
    let settings = Settings::load_from(&cli.config_dir)?;

    match &cli.command {
        Commands::Plans => commands::plans(&settings),
        Commands::Quote(args) => commands::quote(&settings, args),
    }
}
