use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single league match as listed in the calendar table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub match_id: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub home_sets: Option<u16>,
    pub away_sets: Option<u16>,
    pub score_detail: String,
    pub sets: Vec<SetScore>,
    pub winner: Option<Winner>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Points scored by each side in one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub home: u16,
    pub away: u16,
}

/// Which side won the match, decided from the set counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Winner {
    Home,
    Away,
    /// Equal set counts. Only happens on malformed source data.
    Draw,
}

impl Winner {
    pub fn from_sets(home_sets: u16, away_sets: u16) -> Self {
        match home_sets.cmp(&away_sets) {
            std::cmp::Ordering::Greater => Winner::Home,
            std::cmp::Ordering::Less => Winner::Away,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

/// Whether a match has a result yet.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    Completed,
    #[default]
    Upcoming,
}

impl MatchStatus {
    pub fn from_winner(winner: Option<Winner>) -> Self {
        match winner {
            Some(_) => MatchStatus::Completed,
            None => MatchStatus::Upcoming,
        }
    }
}
