use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::identity::generate_record_id;
use crate::league_scraper::{parse_match_row, PageRow};
use crate::model::{Match, Matchday};

/// Matchdays and matches found in one pass over the matches table.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    pub matchdays: Vec<Matchday>,
    pub matches: Vec<Match>,
}

/// Group match rows under the matchday header that precedes them.
///
/// Matches appearing before the first header are still returned, they just
/// belong to no matchday. Both lists keep page order.
pub fn segment_matchdays(
    rows: &[PageRow],
    config: &ScrapeConfig,
    now: DateTime<Utc>,
) -> Segmented {
    let mut segmented = Segmented::default();
    let mut current: Option<Matchday> = None;

    for row in rows {
        match row {
            PageRow::MatchdayHeader(name) => {
                segmented.matchdays.extend(current.take());
                debug!(name = %name, "found matchday");
                current = Some(Matchday {
                    id: generate_record_id(),
                    name: name.clone(),
                    date: matchday_date(name, config),
                    match_ids: vec![],
                    created_at: now,
                    updated_at: now,
                });
            }
            PageRow::Match(cells) => {
                let Some(parsed) = parse_match_row(cells, config, now) else {
                    debug!(cells = cells.len(), "skipping non-match row");
                    continue;
                };
                match current.as_mut() {
                    Some(matchday) => matchday.match_ids.push(parsed.match_id.clone()),
                    None => debug!(match_id = %parsed.match_id, "match before any matchday"),
                }
                segmented.matches.push(parsed);
            }
            PageRow::Other => {}
        }
    }

    segmented.matchdays.extend(current);
    segmented
}

/// Date of a matchday, looked up by the day number in its name.
///
/// Unknown numbers fall back to that day of `matchday_fallback_month`; names
/// without a number fall back to its first day.
pub fn matchday_date(name: &str, config: &ScrapeConfig) -> String {
    let fallback_month = &config.matchday_fallback_month;
    match name.split_whitespace().nth(1) {
        Some(day) => config
            .matchday_dates
            .get(day)
            .cloned()
            .unwrap_or_else(|| format!("{fallback_month}-{day:0>2}")),
        None => format!("{fallback_month}-01"),
    }
}
