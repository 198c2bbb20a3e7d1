use serde::Serialize;

use super::{Match, Matchday, Standing, Team};

/// Every record produced by one scrape run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeOutput {
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub matchdays: Vec<Matchday>,
    pub standings: Vec<Standing>,
}
