use std::collections::HashSet;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::identity::generate_team_id;
use crate::model::Standing;

/// Minimum number of cells of a standings row.
pub const STANDING_ROW_CELLS: usize = 19;

/// Build a [`Standing`] from the cell texts of one ranking row.
///
/// Returns `Ok(None)` for rows that are too short or lack a rank or team name.
/// Empty numeric cells count as zero; any other non-numeric text is an error.
pub fn parse_standing_row(cells: &[String], now: DateTime<Utc>) -> Result<Option<Standing>> {
    if cells.len() < STANDING_ROW_CELLS {
        return Ok(None);
    }

    let team_name = cells[1].as_str();
    let rank = cells[0].trim_end_matches('.');
    if team_name.is_empty() || rank.is_empty() {
        return Ok(None);
    }

    Ok(Some(Standing {
        id: generate_team_id(team_name),
        team_name: team_name.to_string(),
        rank: rank.parse()?,
        points: int_or_zero(&cells[2])?,
        played: int_or_zero(&cells[3])?,
        wins: int_or_zero(&cells[4])?,
        losses: int_or_zero(&cells[5])?,
        sets_won: int_or_zero(&cells[13])?,
        sets_lost: int_or_zero(&cells[14])?,
        points_for: int_or_zero(&cells[16])?,
        points_against: int_or_zero(&cells[17])?,
        ratio: if cells[18].is_empty() {
            0.0
        } else {
            cells[18].parse()?
        },
        created_at: now,
        updated_at: now,
    }))
}

/// Parse every standings row, skipping the ones that fail and keeping the first
/// row of each team.
pub fn parse_standings(rows: &[Vec<String>], now: DateTime<Utc>) -> Vec<Standing> {
    let mut seen = HashSet::new();
    let mut standings = vec![];
    for cells in rows {
        match parse_standing_row(cells, now) {
            Ok(Some(standing)) => {
                if seen.insert(standing.team_name.clone()) {
                    debug!(team = %standing.team_name, rank = standing.rank, "parsed standing");
                    standings.push(standing);
                } else {
                    warn!(team = %standing.team_name, "skipping duplicate standing");
                }
            }
            Ok(None) => debug!(cells = cells.len(), "skipping non-standing row"),
            Err(e) => warn!(error = %e, "skipping unparsable standing row"),
        }
    }
    standings
}

fn int_or_zero<T>(text: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    if text.is_empty() {
        Ok(T::default())
    } else {
        Ok(text.parse()?)
    }
}
