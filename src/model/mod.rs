mod league_match;
mod matchday;
mod scrape_output;
mod standing;
mod team;

pub use league_match::*;
pub use matchday::*;
pub use scrape_output::*;
pub use standing::*;
pub use team::*;
