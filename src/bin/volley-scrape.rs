use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volley_scraper::adapter::SyncPayload;
use volley_scraper::config::{DEFAULT_DATA_DIR, DEFAULT_SOURCE_URL};
use volley_scraper::league_scraper::{self, CalendarPageShape, Html};
use volley_scraper::store::{self, DataStore};
use volley_scraper::{LeagueClient, ScrapeConfig, ScrapeOutput};

#[derive(Parser)]
#[command(name = "volley-scrape")]
#[command(about = "Volleyball league standings and results scraper", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the calendar page and write the JSON data files
    Scrape {
        #[arg(long, env = "VOLLEY_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
        url: String,

        #[arg(long, env = "VOLLEY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
        output: PathBuf,

        /// Parse a saved copy of the page instead of fetching it
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
    /// Reshape the JSON data files into the backend sync payload
    Adapt {
        #[arg(long, env = "VOLLEY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
        data: PathBuf,

        /// Write the payload to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("volley_scrape={log_level},volley_scraper={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Scrape {
            url,
            output,
            from_file,
        } => {
            let config = ScrapeConfig::default()
                .with_source_url(url)
                .with_data_dir(output);
            handle_scrape(config, from_file).await?;
        }
        Commands::Adapt { data, out } => {
            handle_adapt(data, out)?;
        }
    }

    Ok(())
}

async fn handle_scrape(
    config: ScrapeConfig,
    from_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data_store = DataStore::new(&config.data_dir);

    let output = match from_file {
        Some(path) => {
            tracing::info!("Parsing saved page: {}", path.display());
            let body = std::fs::read_to_string(&path)?;
            let document = Html::parse_document(&body);
            let shape = CalendarPageShape::new(&config);
            league_scraper::scrape_document(&document, &shape, &config, Utc::now())?
        }
        None => {
            let client = LeagueClient::new(config)?;
            tracing::info!("Scraping {}", client.config().source_url);
            client.scrape().await?
        }
    };

    let backups = data_store.write_output(&output, Local::now().naive_local())?;

    report(&output, backups.len(), &data_store);
    Ok(())
}

fn handle_adapt(data: PathBuf, out: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let payload = SyncPayload::from_dir(&data)?;

    match out {
        Some(path) => {
            store::save_json(&path, &payload)?;
            tracing::info!("Sync payload written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    Ok(())
}

fn report(output: &ScrapeOutput, backups: usize, data_store: &DataStore) {
    tracing::info!("Scrape finished, data written to {}", data_store.dir().display());
    tracing::info!("  teams:     {}", output.teams.len());
    tracing::info!("  matches:   {}", output.matches.len());
    tracing::info!("  matchdays: {}", output.matchdays.len());
    tracing::info!("  standings: {}", output.standings.len());
    tracing::info!("  backups:   {}", backups);

    if let Some(matchday) = output.matchdays.first() {
        tracing::info!(
            "First matchday: {} ({}), {} matches",
            matchday.name,
            matchday.date,
            matchday.match_ids.len()
        );
    }
}
