use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use mealshuffler::catalog::load_store;
use mealshuffler::{AppError, Config};
use mealshuffler_mealplan::{
    Command, InMemoryStore, RecipeCatalog, generate_days, generate_weeks, suggest_n_random_recipes,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// mealshuffler - weekly dinner planning
#[derive(Parser)]
#[command(name = "mealshuffler")]
#[command(about = "Plans dinners from a weighted recipe catalog", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Seed for reproducible output (overrides config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seven days of an ISO week
    Days {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        week: u32,
    },
    /// Print the remaining weeks of the ISO year
    Weeks {
        /// Start date as YYYY-MM-DD, today when omitted
        #[arg(long)]
        from: Option<String>,
    },
    /// Suggest recipes in order without close repeats
    Suggest {
        #[arg(long, default_value_t = 7)]
        count: usize,
    },
    /// Plan one ISO week, the current one when omitted
    Plan {
        #[arg(long, requires = "week")]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        week: Option<u32>,
    },
    /// Suggest dinners for the current week without looking back
    Generate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(AppError::InvalidConfig)?;

    mealshuffler::observability::init_observability(
        "mealshuffler",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let seed = cli.seed.or(config.planner.seed);

    match cli.command {
        Commands::Days { year, week } => {
            print_json(&generate_days(year, week).map_err(AppError::Calendar)?)
        }
        Commands::Weeks { from } => weeks_command(from),
        Commands::Suggest { count } => suggest_command(config, seed, count).await,
        Commands::Plan { year, week } => plan_command(config, seed, year.zip(week)).await,
        Commands::Generate => generate_command(config, seed).await,
    }
}

fn weeks_command(from: Option<String>) -> Result<()> {
    let start = match from {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date))?
            .and_hms_opt(0, 0, 0)
            .map(|start| start.and_utc())
            .ok_or_else(|| anyhow::anyhow!("invalid start time"))?,
        None => Utc::now(),
    };

    print_json(&generate_weeks(start).map_err(AppError::Calendar)?)
}

#[tracing::instrument(skip(config))]
async fn suggest_command(config: Config, seed: Option<u64>, count: usize) -> Result<()> {
    let store = load_store(&config.catalog.path).await?;
    let recipes = store.recipes(&config.planner.user_id).await?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let suggestions =
        suggest_n_random_recipes(&recipes, count, &mut rng).map_err(AppError::Calendar)?;

    print_json(&suggestions)
}

#[tracing::instrument(skip(config))]
async fn plan_command(
    config: Config,
    seed: Option<u64>,
    target: Option<(i32, u32)>,
) -> Result<()> {
    let command = planner(&config, seed).await?;

    let (year, week) = target.unwrap_or_else(|| {
        let iso = Utc::now().iso_week();
        (iso.year(), iso.week())
    });

    let planned = command
        .plan_week(&config.planner.user_id, year, week)
        .await?;

    print_json(&planned)
}

#[tracing::instrument(skip(config))]
async fn generate_command(config: Config, seed: Option<u64>) -> Result<()> {
    let command = planner(&config, seed).await?;
    let generated = command
        .generate_week(&config.planner.user_id, Utc::now())
        .await?;

    print_json(&generated)
}

async fn planner(
    config: &Config,
    seed: Option<u64>,
) -> Result<Command<InMemoryStore, InMemoryStore>> {
    let store = load_store(&config.catalog.path).await?;
    let command = Command::new(store.clone(), store);

    Ok(match seed {
        Some(seed) => command.with_seed(seed),
        None => command,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
