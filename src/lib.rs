pub use client::LeagueClient;
pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use identity::{generate_record_id, generate_team_id};
pub use model::*;

pub mod adapter;
mod client;
pub mod config;
mod error;
pub mod identity;
pub mod league_scraper;
mod model;
pub mod store;
