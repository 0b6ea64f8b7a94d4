use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use nl_fulfillment::FulfillmentConfig;
use std::io::{self, Write};
use std::path::PathBuf;

mod scenario;

pub use scenario::{run_scenario, Scenario, ScenarioOutcome};

#[derive(Parser)]
#[command(name = "nl-correlate")]
#[command(about = "Correlation chart fulfillment over recorded conversations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run correlation fulfillment for the last turn of a scenario file
    Run(RunArgs),

    /// Validate a fulfillment config file and print the effective values
    CheckConfig(CheckConfigArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Scenario JSON (turns, places, observations)
    scenario: PathBuf,

    /// Fulfillment config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the child place sample limit
    #[arg(long)]
    sample_limit: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct CheckConfigArgs {
    /// Fulfillment config (TOML)
    path: PathBuf,
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn resolve_config(args: &RunArgs) -> Result<FulfillmentConfig> {
    let base = match &args.config {
        Some(path) => FulfillmentConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FulfillmentConfig::default(),
    };
    let mut config = base.with_env_overrides()?;
    if let Some(limit) = args.sample_limit {
        config.sample_limit = limit;
        config.validate()?;
    }
    Ok(config)
}

fn config_json(config: &FulfillmentConfig) -> serde_json::Value {
    serde_json::json!({
        "sample_limit": config.sample_limit,
        "max_history_turns": config.max_history_turns,
        "dedupe_charts": config.dedupe_charts,
    })
}

async fn run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let scenario = Scenario::load(&args.scenario)?;
    log::info!(
        "Running correlation fulfillment over {} turn(s)",
        scenario.turns.len()
    );

    let outcome = run_scenario(scenario, &config).await?;
    let text = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    print_stdout(&text)
}

fn check_config(args: CheckConfigArgs) -> Result<()> {
    let config = FulfillmentConfig::load(&args.path)
        .with_context(|| format!("failed to load config {}", args.path.display()))?;
    let body = serde_json::json!({
        "status": "ok",
        "config": config_json(&config),
    });
    print_stdout(&serde_json::to_string(&body)?)
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::CheckConfig(args) => check_config(args),
    }
}
