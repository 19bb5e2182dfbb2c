//! Team reference data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in groups, slots and standings).
pub type TeamId = Uuid;

/// A national team. Immutable reference data.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Three-letter code, e.g. "ARG".
    pub short_code: String,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, short_code)
    }

    /// Create a team with a known id (e.g. loaded from the result store).
    pub fn with_id(id: TeamId, name: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            short_code: short_code.into(),
        }
    }
}
