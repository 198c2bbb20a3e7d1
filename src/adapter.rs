//! Reshapes persisted records into the rows of the backend tables.
//!
//! Matches are upserted on `match_id`, matchdays on `name`. Standings are replaced
//! wholesale on every sync.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, ScrapeError};
use crate::model::{Match, MatchStatus, Matchday, SetScore, Standing, Winner};
use crate::store;

/// Upsert conflict column of the matches table.
pub const MATCH_UPSERT_KEY: &str = "match_id";

/// Upsert conflict column of the matchdays table.
pub const MATCHDAY_UPSERT_KEY: &str = "name";

/// The fields of a stored matchday the sync reads. Anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredMatchday {
    pub name: String,
    pub date: String,
    pub match_ids: Vec<String>,
}

impl From<&Matchday> for StoredMatchday {
    fn from(matchday: &Matchday) -> Self {
        Self {
            name: matchday.name.clone(),
            date: matchday.date.clone(),
            match_ids: matchday.match_ids.clone(),
        }
    }
}

/// Row of the backend `matchdays` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchdayRow {
    pub name: String,
    /// "01" for "Journée 01".
    pub day_number: String,
    pub date_text: String,
    pub match_date: String,
    pub match_ids: Vec<String>,
}

/// Row of the backend `matches` table.
///
/// Also the shape read back from `matches.json`: `time`, `venue` and `status`
/// may be absent, and `date` is kept as text so older files holding the raw
/// page date still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub match_id: String,
    pub date: Option<String>,
    #[serde(default = "default_time")]
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub venue: String,
    pub score_detail: String,
    pub home_sets: Option<u16>,
    pub away_sets: Option<u16>,
    pub winner: Option<Winner>,
    pub sets: Vec<SetScore>,
    #[serde(default)]
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

fn default_time() -> String {
    "00:00".to_string()
}

/// Row of the backend `standings` table, also read as is from `standings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub id: Uuid,
    pub team_name: String,
    pub rank: u32,
    pub points: i32,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub ratio: f64,
}

impl TryFrom<&Matchday> for MatchdayRow {
    type Error = ScrapeError;

    fn try_from(matchday: &Matchday) -> Result<Self> {
        Self::try_from(&StoredMatchday::from(matchday))
    }
}

impl TryFrom<&StoredMatchday> for MatchdayRow {
    type Error = ScrapeError;

    fn try_from(matchday: &StoredMatchday) -> Result<Self> {
        let day_number = matchday
            .name
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ScrapeError::MissingField {
                record: format!("matchday {:?}", matchday.name),
                field: "day_number",
            })?;

        Ok(Self {
            name: matchday.name.clone(),
            day_number: day_number.to_string(),
            date_text: matchday.date.clone(),
            match_date: matchday.date.clone(),
            match_ids: matchday.match_ids.clone(),
        })
    }
}

impl From<&Match> for MatchRow {
    fn from(m: &Match) -> Self {
        Self {
            match_id: m.match_id.clone(),
            date: m.date.map(|d| d.to_string()),
            time: m.time.clone(),
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            venue: m.venue.clone(),
            score_detail: m.score_detail.clone(),
            home_sets: m.home_sets,
            away_sets: m.away_sets,
            winner: m.winner,
            sets: m.sets.clone(),
            status: m.status,
            created_at: m.created_at,
        }
    }
}

impl From<&Standing> for StandingRow {
    fn from(s: &Standing) -> Self {
        Self {
            id: s.id,
            team_name: s.team_name.clone(),
            rank: s.rank,
            points: s.points,
            played: s.played,
            wins: s.wins,
            losses: s.losses,
            sets_won: s.sets_won,
            sets_lost: s.sets_lost,
            points_for: s.points_for,
            points_against: s.points_against,
            ratio: s.ratio,
        }
    }
}

/// Everything one backend sync writes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncPayload {
    pub matchdays: Vec<MatchdayRow>,
    pub matches: Vec<MatchRow>,
    pub standings: Vec<StandingRow>,
}

impl SyncPayload {
    pub fn from_records(
        matchdays: &[Matchday],
        matches: &[Match],
        standings: &[Standing],
    ) -> Result<Self> {
        Ok(Self {
            matchdays: matchdays
                .iter()
                .map(MatchdayRow::try_from)
                .collect::<Result<_>>()?,
            matches: matches.iter().map(MatchRow::from).collect(),
            standings: standings.iter().map(StandingRow::from).collect(),
        })
    }

    /// Load the persisted JSON files of `data_dir` and reshape them.
    ///
    /// Only the fields the backend rows need are read. A missing file contributes
    /// no rows; a file that cannot be read, or a record lacking a needed field,
    /// is an error.
    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        let matchdays: Vec<StoredMatchday> = load_or_empty(data_dir, store::MATCHDAYS_FILE)?;
        let matches: Vec<MatchRow> = load_or_empty(data_dir, store::MATCHES_FILE)?;
        let standings: Vec<StandingRow> = load_or_empty(data_dir, store::STANDINGS_FILE)?;

        let payload = Self {
            matchdays: matchdays
                .iter()
                .map(MatchdayRow::try_from)
                .collect::<Result<_>>()?,
            matches,
            standings,
        };
        info!(
            matchdays = payload.matchdays.len(),
            matches = payload.matches.len(),
            standings = payload.standings.len(),
            "adapted records for sync"
        );
        Ok(payload)
    }
}

fn load_or_empty<T: serde::de::DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = dir.join(file_name);
    match store::load_json(&path)? {
        Some(records) => Ok(records),
        None => {
            warn!(path = %path.display(), "data file not found, nothing to sync");
            Ok(vec![])
        }
    }
}
