use chrono::Utc;
use tracing::{info, instrument};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::league_scraper::{self, CalendarPageShape, Html, PageShape};
use crate::model::ScrapeOutput;

/// The main entry point for scraping the league calendar page.
///
/// `LeagueClient` wraps a [`reqwest::Client`] and the [`ScrapeConfig`]
/// describing the page.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> volley_scraper::Result<()> {
/// use volley_scraper::{LeagueClient, ScrapeConfig};
///
/// let client = LeagueClient::new(ScrapeConfig::default())?;
/// let output = client.scrape().await?;
/// println!("Found {} matches", output.matches.len());
/// # Ok(())
/// # }
/// ```
pub struct LeagueClient {
    http: reqwest::Client,
    config: ScrapeConfig,
}

impl LeagueClient {
    /// Create a client sending the configured User-Agent.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ScrapeConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    /// The configuration this client scrapes with.
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch the calendar page. Transport errors and non-success statuses fail.
    #[instrument(skip(self), fields(url = %self.config.source_url))]
    pub async fn fetch_page(&self) -> Result<Html> {
        league_scraper::get_document(&self.http, &self.config.source_url).await
    }

    /// Fetch the page and extract every record using the calendar page layout.
    pub async fn scrape(&self) -> Result<ScrapeOutput> {
        let shape = CalendarPageShape::new(&self.config);
        self.scrape_with(&shape).await
    }

    /// Fetch the page and extract every record using a custom page layout.
    #[instrument(skip(self, shape))]
    pub async fn scrape_with(&self, shape: &dyn PageShape) -> Result<ScrapeOutput> {
        let document = self.fetch_page().await?;
        let output = league_scraper::scrape_document(&document, shape, &self.config, Utc::now())?;
        info!(
            teams = output.teams.len(),
            matches = output.matches.len(),
            matchdays = output.matchdays.len(),
            standings = output.standings.len(),
            "scrape finished"
        );
        Ok(output)
    }
}
