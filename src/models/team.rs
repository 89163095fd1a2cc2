//! Team and season-registration data structures.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in pairings and fixtures).
pub type TeamId = Uuid;

/// A team registered with the league. Immutable for the duration of a
/// scheduling run; the engine only ever holds ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display color as a hex string (e.g. "#1d4ed8"), if the captain picked one.
    pub color: Option<String>,
}

impl Team {
    /// Create a new team with the given name. A fresh id is assigned.
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
        }
    }
}

/// Registration state of a team within one season.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Confirmed,
    Withdrawn,
}

/// A team's entry in a season: the team plus when and how it registered.
/// The eligible pool for scheduling is registered/confirmed entries ordered
/// by registration time (stable, so pairing output is deterministic).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRegistration {
    pub team: Team,
    pub registered_at: NaiveDateTime,
    pub status: RegistrationStatus,
}

impl TeamRegistration {
    pub fn new(team: Team, registered_at: NaiveDateTime) -> Self {
        Self {
            team,
            registered_at,
            status: RegistrationStatus::Registered,
        }
    }

    /// Withdrawn teams never enter the scheduling pool.
    pub fn is_eligible(&self) -> bool {
        matches!(
            self.status,
            RegistrationStatus::Registered | RegistrationStatus::Confirmed
        )
    }
}
