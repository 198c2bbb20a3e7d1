pub mod match_row;
pub mod matchday;
pub mod page_shape;
pub mod standing_row;

use chrono::{DateTime, Utc};
pub use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::model::{ScrapeOutput, Team};

pub use match_row::parse_match_row;
pub use matchday::{matchday_date, segment_matchdays, Segmented};
pub use page_shape::{CalendarPageShape, PageRow, PageShape};
pub use standing_row::{parse_standing_row, parse_standings};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| ScrapeError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| ScrapeError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Text of an element with every text node trimmed and the non-empty fragments
/// concatenated.
pub(crate) fn cell_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Extract every record from an already loaded calendar page.
///
/// Missing tables produce empty lists; malformed rows are skipped and logged.
pub fn scrape_document(
    document: &Html,
    shape: &dyn PageShape,
    config: &ScrapeConfig,
    now: DateTime<Utc>,
) -> Result<ScrapeOutput> {
    let standing_rows = shape.standing_rows(document)?;
    let standings = parse_standings(&standing_rows, now);
    info!(count = standings.len(), "parsed standings");

    let rows = shape.match_rows(document)?;
    let Segmented { matchdays, matches } = segment_matchdays(&rows, config, now);
    info!(
        matchdays = matchdays.len(),
        matches = matches.len(),
        "parsed matchdays and matches"
    );

    let teams = standings.iter().map(Team::from).collect();

    Ok(ScrapeOutput {
        teams,
        matches,
        matchdays,
        standings,
    })
}
