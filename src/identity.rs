//! Identifiers for scraped records.
//!
//! Team ids are content-derived and identical across runs. Match and matchday ids
//! are random on every run; the league code (`match_id`) and the matchday name are
//! the keys that stay stable between scrapes.

use md5::{Digest, Md5};
use uuid::Uuid;

/// Deterministic id for a team: the MD5 digest of its exact display name, laid out
/// as a UUID.
pub fn generate_team_id(team_name: &str) -> Uuid {
    let digest = Md5::digest(team_name.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Uuid::from_bytes(bytes)
}

/// Fresh random id for a match or matchday.
pub fn generate_record_id() -> Uuid {
    Uuid::new_v4()
}
