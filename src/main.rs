use clap::Parser;
use sonar_portfolio::config::cli::{Cli, Command};
use sonar_portfolio::utils::{logger, validation::Validate};
use sonar_portfolio::{HttpClient, PortfolioConfig, SonarqubeInstance};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sonar-portfolio CLI");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let config = PortfolioConfig::from_file(&cli.config)?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let http = HttpClient::new(&config.server.url, config.server.token.clone())?;
    let instance = match config.server.organization.as_deref() {
        Some(organization) => SonarqubeInstance::with_organization(http, organization),
        None => SonarqubeInstance::new(http),
    };

    let keys = &config.portfolio.project_keys;
    match cli.command {
        Command::Projects => {
            let projects = instance.projects().await?;
            tracing::info!("✅ {} projects visible", projects.len());
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }
        Command::Measures => {
            let metrics: Option<Vec<&str>> = config
                .portfolio
                .metrics
                .as_ref()
                .map(|metrics| metrics.iter().map(String::as_str).collect());
            let measures = instance.measures(keys, metrics.as_deref()).await?;
            tracing::info!(
                "✅ Measures for {}/{} projects",
                measures.len(),
                keys.len()
            );
            println!("{}", serde_json::to_string_pretty(&measures)?);
        }
        Command::Aggregate => {
            let summary = instance.aggregate_measures(keys).await?;
            if summary.is_empty() {
                tracing::warn!(
                    "📭 No measures found for portfolio '{}'",
                    config.portfolio.name
                );
            } else {
                tracing::info!(
                    "📊 Portfolio '{}': releasability {} across {} projects",
                    config.portfolio.name,
                    summary.releasability_rating,
                    summary.projects_count_with_measures
                );
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
