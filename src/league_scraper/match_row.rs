use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;

use crate::config::ScrapeConfig;
use crate::identity::generate_record_id;
use crate::model::{Match, MatchStatus, SetScore, Winner};

/// Minimum number of cells of a match row.
pub const MATCH_ROW_CELLS: usize = 10;

const DATE_CELL: usize = 1;
const TIME_CELL: usize = 2;
const HOME_TEAM_CELL: usize = 3;
const AWAY_TEAM_CELL: usize = 5;
const HOME_SETS_CELL: usize = 6;
const AWAY_SETS_CELL: usize = 7;
const SCORE_DETAIL_CELL: usize = 8;

/// Build a [`Match`] from the cell texts of one calendar row.
///
/// Returns `None` when the row is not a match row: too few cells, or a first cell
/// that is not a league match code.
pub fn parse_match_row(
    cells: &[String],
    config: &ScrapeConfig,
    now: DateTime<Utc>,
) -> Option<Match> {
    if cells.len() < MATCH_ROW_CELLS {
        return None;
    }

    let match_id = &cells[0];
    if match_id.is_empty() || !match_id.contains(&config.league_prefix) {
        return None;
    }

    let set_counts = parse_set_counts(&cells[HOME_SETS_CELL], &cells[AWAY_SETS_CELL]);
    let winner = set_counts.map(|(home, away)| Winner::from_sets(home, away));
    let (home_sets, away_sets) = set_counts.unzip();
    let score_detail = cells[SCORE_DETAIL_CELL].clone();

    Some(Match {
        id: generate_record_id(),
        match_id: match_id.clone(),
        date: parse_match_date(&cells[DATE_CELL]),
        time: cells[TIME_CELL].clone(),
        home_team: cells[HOME_TEAM_CELL].clone(),
        away_team: cells[AWAY_TEAM_CELL].clone(),
        venue: find_venue(cells, config),
        home_sets,
        away_sets,
        sets: parse_sets(&score_detail),
        score_detail,
        winner,
        status: MatchStatus::from_winner(winner),
        created_at: now,
        updated_at: now,
    })
}

/// `DD/MM/YY` (or `DD/MM/YYYY`) to a calendar date in the 2000s.
pub fn parse_match_date(text: &str) -> Option<NaiveDate> {
    let (day, month, year) = text.split('/').map(str::trim).collect_tuple()?;
    let day: u32 = parse_digits(day)?;
    let month: u32 = parse_digits(month)?;
    let year: i32 = match year.len() {
        2 => 2000 + parse_digits::<i32>(year)?,
        4 => parse_digits(year)?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Both set counts, or nothing if either cell is not a plain number.
pub fn parse_set_counts(home: &str, away: &str) -> Option<(u16, u16)> {
    Some((parse_digits(home)?, parse_digits(away)?))
}

/// Per-set points from text like `25:11, 25:8`. Malformed segments are dropped.
pub fn parse_sets(score_detail: &str) -> Vec<SetScore> {
    score_detail
        .split(", ")
        .filter(|segment| segment.contains(':'))
        .filter_map(|segment| {
            let (home, away) = segment.split(':').collect_tuple()?;
            Some(SetScore {
                home: home.trim().parse().ok()?,
                away: away.trim().parse().ok()?,
            })
        })
        .collect()
}

/// Rightmost cell naming a sports facility, or an empty string.
pub fn find_venue(cells: &[String], config: &ScrapeConfig) -> String {
    let marker = config.venue_marker.to_uppercase();
    cells
        .iter()
        .rev()
        .find(|cell| {
            !cell.is_empty()
                && !cell.starts_with(&config.league_prefix)
                && cell.to_uppercase().contains(&marker)
        })
        .cloned()
        .unwrap_or_default()
}

fn parse_digits<T: std::str::FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn played_row() -> Vec<String> {
        row(&[
            "BFQ001",
            "04/10/25",
            "20:00",
            "CAMBRAI 1",
            "-",
            "HELLEMMES-LILLE 1",
            "2",
            "0",
            "25:11, 25:8",
            "COMPLEXE SPORTIF DE CAMBRAI",
            "",
        ])
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-05T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parse_played_match() {
        let m = parse_match_row(&played_row(), &ScrapeConfig::default(), now()).unwrap();

        assert_eq!(m.match_id, "BFQ001");
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2025, 10, 4));
        assert_eq!(m.time, "20:00");
        assert_eq!(m.home_team, "CAMBRAI 1");
        assert_eq!(m.away_team, "HELLEMMES-LILLE 1");
        assert_eq!(m.venue, "COMPLEXE SPORTIF DE CAMBRAI");
        assert_eq!(m.home_sets, Some(2));
        assert_eq!(m.away_sets, Some(0));
        assert_eq!(m.winner, Some(Winner::Home));
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(
            m.sets,
            vec![
                SetScore { home: 25, away: 11 },
                SetScore { home: 25, away: 8 }
            ]
        );
        assert_eq!(m.created_at, now());
        assert_eq!(m.updated_at, now());
    }

    #[test]
    fn test_parse_upcoming_match() {
        let mut cells = played_row();
        cells[6] = String::new();
        cells[7] = String::new();
        cells[8] = String::new();

        let m = parse_match_row(&cells, &ScrapeConfig::default(), now()).unwrap();
        assert_eq!(m.home_sets, None);
        assert_eq!(m.away_sets, None);
        assert_eq!(m.winner, None);
        assert_eq!(m.status, MatchStatus::Upcoming);
        assert!(m.sets.is_empty());
    }

    #[test]
    fn test_winner_boundaries() {
        let config = ScrapeConfig::default();
        for (home, away, expected) in [
            ("3", "1", Winner::Home),
            ("1", "3", Winner::Away),
            ("0", "2", Winner::Away),
            ("2", "2", Winner::Draw),
            ("0", "0", Winner::Draw),
        ] {
            let mut cells = played_row();
            cells[6] = home.to_string();
            cells[7] = away.to_string();
            let m = parse_match_row(&cells, &config, now()).unwrap();
            assert_eq!(m.winner, Some(expected), "{home}-{away}");
            assert_eq!(m.status, MatchStatus::Completed);
        }
    }

    #[test]
    fn test_half_filled_set_counts_leave_match_upcoming() {
        let mut cells = played_row();
        cells[7] = "forfait".to_string();

        let m = parse_match_row(&cells, &ScrapeConfig::default(), now()).unwrap();
        assert_eq!(m.home_sets, None);
        assert_eq!(m.away_sets, None);
        assert_eq!(m.winner, None);
        assert_eq!(m.status, MatchStatus::Upcoming);
    }

    #[test]
    fn test_rejects_short_rows() {
        let config = ScrapeConfig::default();
        for len in 0..MATCH_ROW_CELLS {
            let cells = played_row()[..len].to_vec();
            assert!(parse_match_row(&cells, &config, now()).is_none());
        }
    }

    #[test]
    fn test_rejects_rows_without_league_code() {
        let config = ScrapeConfig::default();
        let mut cells = played_row();
        cells[0] = String::new();
        assert!(parse_match_row(&cells, &config, now()).is_none());
        cells[0] = "Code".to_string();
        assert!(parse_match_row(&cells, &config, now()).is_none());
    }

    #[test]
    fn test_parse_match_date() {
        assert_eq!(
            parse_match_date("04/10/25"),
            NaiveDate::from_ymd_opt(2025, 10, 4)
        );
        assert_eq!(
            parse_match_date("4/9/25"),
            NaiveDate::from_ymd_opt(2025, 9, 4)
        );
        assert_eq!(
            parse_match_date("06/12/2025"),
            NaiveDate::from_ymd_opt(2025, 12, 6)
        );
        let date = parse_match_date("4/9/25").unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2025-09-04");
    }

    #[test]
    fn test_parse_match_date_rejects_other_text() {
        assert_eq!(parse_match_date(""), None);
        assert_eq!(parse_match_date("samedi"), None);
        assert_eq!(parse_match_date("04/10"), None);
        assert_eq!(parse_match_date("04/10/25/1"), None);
        assert_eq!(parse_match_date("aa/10/25"), None);
        assert_eq!(parse_match_date("31/02/25"), None);
    }

    #[test]
    fn test_parse_sets() {
        assert_eq!(
            parse_sets("25:11, 25:8"),
            vec![
                SetScore { home: 25, away: 11 },
                SetScore { home: 25, away: 8 }
            ]
        );
        assert_eq!(
            parse_sets("25:11, bad, 25:8"),
            vec![
                SetScore { home: 25, away: 11 },
                SetScore { home: 25, away: 8 }
            ]
        );
        assert_eq!(
            parse_sets("25:11, 2x:8, 1:2:3, 15:13"),
            vec![
                SetScore { home: 25, away: 11 },
                SetScore { home: 15, away: 13 }
            ]
        );
        assert!(parse_sets("").is_empty());
    }

    #[test]
    fn test_find_venue_scans_from_the_right() {
        let config = ScrapeConfig::default();
        let cells = row(&[
            "BFQ003",
            "Complexe A",
            "",
            "Salle B",
            "complexe sportif Léo Lagrange",
            "",
        ]);
        assert_eq!(find_venue(&cells, &config), "complexe sportif Léo Lagrange");

        let cells = row(&["BFQ003 COMPLEXE", "Gymnase", ""]);
        assert_eq!(find_venue(&cells, &config), "");
    }

    #[test]
    fn test_find_venue_marker_ignores_case() {
        let config = ScrapeConfig {
            venue_marker: "Gymnase".to_string(),
            ..ScrapeConfig::default()
        };
        let cells = row(&["BFQ004", "GYMNASE JEAN ZAY", "Complexe B", ""]);
        assert_eq!(find_venue(&cells, &config), "GYMNASE JEAN ZAY");
    }
}
