use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sonar-portfolio")]
#[command(about = "Quality measures and portfolio scores from a SonarQube server")]
pub struct Cli {
    /// Path to the portfolio TOML configuration
    #[arg(long, short, default_value = "portfolio.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every project visible to the configured token
    Projects,
    /// Fetch per-project measures for the configured portfolio
    Measures,
    /// Reduce the portfolio to summary statistics
    Aggregate,
}
