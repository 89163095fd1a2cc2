//! Slots, pairings, schedules and the persisted fixture record.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::season::SeasonId;
use crate::models::team::TeamId;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// A concrete bookable (date, time, court) unit. One fixture per slot.
/// The derived order (date, then time, then court) is the assignment order
/// of the scheduler, which makes scheduling output deterministic.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court: u32,
}

/// An abstract "these two teams must meet" requirement, tagged with the
/// round (matchday) it belongs to, prior to any date/court assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub home: TeamId,
    pub away: TeamId,
    /// 1-based round from the round-robin generator.
    pub round: u32,
}

impl Pairing {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// Order-independent key: the same two teams yield the same key
    /// regardless of who hosts.
    pub fn unordered_key(&self) -> (TeamId, TeamId) {
        if self.home <= self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }
}

/// One pairing placed on one slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub pairing: Pairing,
    pub slot: Slot,
    /// Matchday number; equals the pairing's round.
    pub matchday: u32,
}

/// The complete mapping of pairings to slots for one scheduling run.
/// Exists only in memory (or as a preview payload) until materialized.
pub type Schedule = Vec<Assignment>;

/// Lifecycle of a persisted fixture. The engine only ever creates
/// `Scheduled` fixtures; later states belong to match recording.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// A persisted match record: who plays whom, when and where.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub season_id: SeasonId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub court_number: u32,
    /// 1-based logical round; independent of the calendar date.
    pub matchday_number: u32,
    pub status: FixtureStatus,
    /// None until the match has been played.
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub venue: Option<String>,
}

impl Fixture {
    /// Build the persisted record for one assignment. Ids are fresh per
    /// materialization; schedule equality is defined over assignments, not
    /// fixture ids.
    pub fn from_assignment(assignment: &Assignment, season_id: SeasonId) -> Self {
        Self {
            id: Uuid::new_v4(),
            season_id,
            home_team_id: assignment.pairing.home,
            away_team_id: assignment.pairing.away,
            match_date: assignment.slot.date,
            match_time: assignment.slot.time,
            court_number: assignment.slot.court,
            matchday_number: assignment.matchday,
            status: FixtureStatus::Scheduled,
            home_score: None,
            away_score: None,
            venue: None,
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team_id == team || self.away_team_id == team
    }
}
