use std::collections::BTreeMap;
use std::path::PathBuf;

/// Calendar page of the BFQ pool for the 2025/2026 season.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.ffvbbeach.org/ffvbapp/resu/vbspo_calendrier.php?saison=2025/2026&codent=PTFL59&poule=BFQ";

/// Directory the JSON files are written to, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "../data";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Everything that couples the scraper to the source site's markup and to the
/// output layout.
///
/// The defaults describe the current FFVB calendar page. Each field can be
/// overridden so that a change in the page only needs a new configuration.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub source_url: String,
    pub data_dir: PathBuf,
    pub user_agent: String,
    /// Position of the matches table among all `<table>` elements of the page.
    pub matches_table_index: usize,
    /// Substring every league match code contains (e.g. `BFQ001`).
    pub league_prefix: String,
    /// `bgcolor` of data rows, in both the matches and the standings tables.
    pub data_row_bgcolor: String,
    /// `background` attribute of matchday header cells.
    pub header_background: String,
    /// Word a header cell must contain to open a matchday.
    pub header_keyword: String,
    /// Marker identifying the venue cell of a match row, matched ignoring case.
    pub venue_marker: String,
    /// Text of the standings header cell that identifies the standings table.
    pub standings_marker: String,
    /// Known matchday dates keyed by the two-digit day number.
    pub matchday_dates: BTreeMap<String, String>,
    /// `YYYY-MM` prefix used for matchdays missing from `matchday_dates`.
    pub matchday_fallback_month: String,
}

impl ScrapeConfig {
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        let matchday_dates = [
            ("01", "2025-10-04"),
            ("02", "2025-10-18"),
            ("03", "2025-11-15"),
            ("04", "2025-11-29"),
            ("05", "2025-12-06"),
        ]
        .into_iter()
        .map(|(day, date)| (day.to_string(), date.to_string()))
        .collect();

        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            user_agent: USER_AGENT.to_string(),
            matches_table_index: 3,
            league_prefix: "BFQ".to_string(),
            data_row_bgcolor: "#EEEEF8".to_string(),
            header_background: "../images/bkrg.gif".to_string(),
            header_keyword: "Journée".to_string(),
            venue_marker: "COMPLEXE".to_string(),
            standings_marker: "Points".to_string(),
            matchday_dates,
            matchday_fallback_month: "2025-01".to_string(),
        }
    }
}
