use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rdsri::config::{self, Config, OutputFormat};
use rdsri::diagnostics::TracingReporter;
use rdsri::error::ConfigError;
use rdsri::exit_codes;
use rdsri::sources::{
    FileInventory, FilePricingSource, HttpPricingSource, InventorySource, PricingSource,
    RdsInventory,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rdsri")]
#[command(
    about = "Compare On-Demand and Reserved Instance pricing for running RDS instances",
    long_about = "rdsri lists the available RDS instances of a region and prices them On-Demand\nand under every Reserved Instance offering (1 and 3 years, standard and\nconvertible, no/partial/all upfront), with totals weighted by instance count."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (error, warn, info, debug)
    #[arg(long, global = true, env = "RDSRI_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the running RDS instances of a region
    ///
    /// Examples:
    ///   rdsri compare --region us-east-1
    ///   rdsri compare --region eu-west-1 --format markdown --group-by-offer
    ///   rdsri compare --region us-east-1 --pricing-file rds.json --inventory-file inventory.json
    Compare {
        /// AWS region (defaults to [aws].region in the config)
        #[arg(short, long, env = "AWS_REGION")]
        region: Option<String>,

        /// AWS profile name
        #[arg(long)]
        profile: Option<String>,

        /// Read the pricing dataset from a local file instead of downloading it
        #[arg(long, value_name = "PATH")]
        pricing_file: Option<PathBuf>,

        /// Read running instances from a JSON file instead of the RDS API
        #[arg(long, value_name = "PATH")]
        inventory_file: Option<PathBuf>,

        /// Also print one table per instance type, term and payment option
        #[arg(long)]
        group_by_offer: bool,
    },
    /// Initialize configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".rdsri.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => EnvFilter::new(level),
        (None, true) => EnvFilter::new("debug"),
        (None, false) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(exit_codes::exit_code_for_anyhow(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compare {
            region,
            profile,
            pricing_file,
            inventory_file,
            group_by_offer,
        } => {
            let region = region
                .or_else(|| config.aws.region.clone())
                .ok_or_else(|| {
                    rdsri::error::RdsriError::from(ConfigError::MissingField(
                        "region (use --region or set [aws].region)".to_string(),
                    ))
                })?;

            let inventory: Box<dyn InventorySource> = match inventory_file {
                Some(path) => Box::new(FileInventory::new(path)),
                None => Box::new(RdsInventory::new(profile.or_else(|| config.aws.profile.clone()))),
            };
            let pricing: Box<dyn PricingSource> =
                match pricing_file.or_else(|| config.pricing.dataset_path.clone()) {
                    Some(path) => Box::new(FilePricingSource::new(path)),
                    None => Box::new(HttpPricingSource::new(
                        config.pricing.dataset_url.clone(),
                        config.pricing.timeout(),
                    )),
                };

            let comparison =
                rdsri::run_comparison(&region, inventory.as_ref(), pricing.as_ref(), &TracingReporter)
                    .await?;

            let format = cli.format.unwrap_or(config.output.format);
            let output = rdsri::report::render(
                &comparison,
                format,
                group_by_offer || config.output.group_by_offer,
            )
            .context("Failed to render report")?;
            println!("{}", output);
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}
