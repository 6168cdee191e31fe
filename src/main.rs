use clap::Parser;
use form_signals::cli::{Cli, Commands};
use form_signals::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) if std::path::Path::new(&cli.config).exists() => {
            // a config that exists but is invalid must not be silently replaced
            return Err(e.context(format!("Invalid configuration in {}", cli.config)));
        }
        Err(_) => {
            eprintln!("No config at {}, using defaults", cli.config);
            toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
        }
    };

    // Initialize telemetry
    form_signals::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Analyze(args) => {
            tracing::debug!(home = %args.home, away = %args.away, "Starting analysis");
            args.execute(&config).await?;
        }
        Commands::Nba(args) => args.execute(&config).await?,
        Commands::Teams(args) => args.execute(&config).await?,
        Commands::Referees(args) => args.execute(&config).await?,
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
