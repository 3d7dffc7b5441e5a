use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attain", version, about = "Subscription revenue and quota attainment calculator")]
pub struct Cli {
    /// Directory holding default.toml and its overrides
    #[arg(short, long, default_value = "config", global = true)]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List catalog plans
    Plans,

    /// Compute revenue and attainment for one plan
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Plan name, exact match
    #[arg(short, long)]
    pub plan: String,

    /// Number of units (users, seats)
    #[arg(short, long, allow_negative_numbers = true)]
    pub units: i32,

    /// Contract term in months
    #[arg(short, long, allow_negative_numbers = true)]
    pub term: i32,

    /// Percentage discount on the secondary offering
    #[arg(short, long, allow_negative_numbers = true)]
    pub discount: Option<f64>,

    /// Target blended monthly price per unit (ignored when --discount is set)
    #[arg(long, allow_negative_numbers = true)]
    pub unit_price: Option<f64>,

    /// Quota target for the term, in dollars
    #[arg(short, long, allow_negative_numbers = true)]
    pub quota: Option<f64>,

    /// Print the raw breakdown as JSON
    #[arg(long)]
    pub json: bool,
}
