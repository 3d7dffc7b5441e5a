use std::process::ExitCode;
use attain_cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attain_cli=info,attain_config=info,attain_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Using config directory {}", cli.config_dir.display());

    match run(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "Command failed");
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
