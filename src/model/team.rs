use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Standing;

/// A team, derived from its standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Standing> for Team {
    fn from(standing: &Standing) -> Self {
        Self {
            id: standing.id,
            name: standing.team_name.clone(),
            created_at: standing.created_at,
            updated_at: standing.updated_at,
        }
    }
}
