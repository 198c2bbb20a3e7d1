use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use volley_scraper::league_scraper::{scrape_document, CalendarPageShape, Html};
use volley_scraper::store::{self, DataStore, MATCHDAYS_FILE, MATCHES_FILE, STANDINGS_FILE, TEAMS_FILE};
use volley_scraper::{Match, Matchday, ScrapeConfig, ScrapeOutput, Standing, Team};

fn scrape_fixture() -> ScrapeOutput {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/calendar.html");
    let document = Html::parse_document(&fs::read_to_string(path).unwrap());
    let config = ScrapeConfig::default();
    scrape_document(&document, &CalendarPageShape::new(&config), &config, Utc::now()).unwrap()
}

fn backup_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 19)
        .unwrap()
        .and_hms_opt(9, 5, 3)
        .unwrap()
}

#[test]
fn test_write_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let data_store = DataStore::new(dir.path().join("data"));
    let output = scrape_fixture();

    let backups = data_store.write_output(&output, backup_time()).unwrap();
    assert!(backups.is_empty());

    let teams: Vec<Team> = store::load_json(&data_store.path(TEAMS_FILE)).unwrap().unwrap();
    let matches: Vec<Match> = store::load_json(&data_store.path(MATCHES_FILE)).unwrap().unwrap();
    let matchdays: Vec<Matchday> =
        store::load_json(&data_store.path(MATCHDAYS_FILE)).unwrap().unwrap();
    let standings: Vec<Standing> =
        store::load_json(&data_store.path(STANDINGS_FILE)).unwrap().unwrap();

    assert_eq!(teams, output.teams);
    assert_eq!(matches, output.matches);
    assert_eq!(matchdays, output.matchdays);
    assert_eq!(standings, output.standings);
}

#[test]
fn test_files_are_pretty_utf8_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let data_store = DataStore::new(dir.path());
    data_store
        .write_output(&scrape_fixture(), backup_time())
        .unwrap();

    let text = fs::read_to_string(data_store.path(MATCHDAYS_FILE)).unwrap();
    assert!(text.starts_with("[\n  {\n    \"id\": "));
    assert!(text.contains("\"name\": \"Journée 01\""));
}

#[test]
fn test_existing_files_are_backed_up() {
    let dir = tempfile::tempdir().unwrap();
    let data_store = DataStore::new(dir.path());
    let output = scrape_fixture();

    data_store.write_output(&output, backup_time()).unwrap();
    let previous = fs::read_to_string(data_store.path(MATCHES_FILE)).unwrap();

    let backups = data_store.write_output(&output, backup_time()).unwrap();
    assert_eq!(backups.len(), 4);

    let backup = dir.path().join("backups/matches.json_20251019_090503.json");
    assert!(backups.contains(&backup));
    assert_eq!(fs::read_to_string(backup).unwrap(), previous);
    assert!(dir
        .path()
        .join("backups/teams.json_20251019_090503.json")
        .exists());
}

#[test]
fn test_backup_of_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let backup = store::create_backup(&dir.path().join("teams.json"), backup_time()).unwrap();
    assert!(backup.is_none());
    assert!(!dir.path().join("backups").exists());
}

#[test]
fn test_load_json() {
    let dir = tempfile::tempdir().unwrap();

    let missing: Option<Vec<Team>> = store::load_json(&dir.path().join("teams.json")).unwrap();
    assert!(missing.is_none());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "[{\"id\": ").unwrap();
    assert!(store::load_json::<Vec<Team>>(&broken).is_err());

    let written = dir.path().join("ids.json");
    let at: DateTime<Utc> = Utc::now();
    store::save_json(&written, &[at]).unwrap();
    let loaded: Vec<DateTime<Utc>> = store::load_json(&written).unwrap().unwrap();
    assert_eq!(loaded, vec![at]);
}
