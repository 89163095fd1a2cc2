//! Typed errors for the scheduling engine and stores.
//!
//! All variants are terminal for the current run; nothing is retried
//! internally. Handlers map these to HTTP statuses without string-matching.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::fixture::{Pairing, Schedule, Slot};
use crate::models::season::{SeasonId, SeasonStatus};
use crate::models::team::TeamId;

/// Why the greedy scan could not place a pairing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// Every remaining slot was already consumed; the window is too small.
    SlotsExhausted,
    /// Free slots existed, but all of them clashed with the rest period or
    /// an existing same-date booking of one of the pairing's teams.
    RestDays,
}

/// The greedy assignment ran out of options before placing every pairing.
///
/// Carries the offending pairing and the partially built schedule so
/// preview callers can render a best-effort calendar annotated as
/// incomplete. Commit mode never persists a partial schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchedulingFailure {
    pub pairing: Pairing,
    pub cause: FailureCause,
    /// Pairings placed before the failure.
    pub placed: usize,
    /// Total pairings requested.
    pub total: usize,
    /// Distinct playable dates the window offered.
    pub available_dates: usize,
    pub partial: Schedule,
}

impl SchedulingFailure {
    /// Human-readable hint surfaced to the caller next to the error.
    pub fn suggestion(&self) -> &'static str {
        "Try increasing the season duration, adding more available match days, \
         or reducing rest days between matches."
    }
}

impl std::fmt::Display for SchedulingFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cause {
            FailureCause::SlotsExhausted => write!(
                f,
                "not enough available match dates: placed {} of {} fixtures \
                 before running out of the {} match dates in the season window",
                self.placed, self.total, self.available_dates
            ),
            FailureCause::RestDays => write!(
                f,
                "teams cannot play their matches with the configured rest \
                 period: the round {} fixture could not be placed on any of \
                 the {} match dates in the season window",
                self.pairing.round, self.available_dates
            ),
        }
    }
}

impl std::error::Error for SchedulingFailure {}

/// Errors that can occur while generating, clearing or registering for
/// fixtures.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScheduleError {
    #[error("season {0} not found")]
    SeasonNotFound(SeasonId),
    #[error("team {0} not found in this season")]
    TeamNotFound(TeamId),
    #[error("need at least 2 registered teams to generate fixtures (found {found})")]
    InsufficientTeams { found: usize },
    #[error("no usable match dates between {start} and {end}")]
    NoAvailableSlots { start: NaiveDate, end: NaiveDate },
    #[error("{0}")]
    Scheduling(SchedulingFailure),
    #[error("fixtures can only be changed for seasons in draft or registration status (season is {status})")]
    SeasonNotSchedulable { status: SeasonStatus },
    #[error("fixture generation is already in progress for this season")]
    ConcurrentGenerationConflict,
    #[error("invalid scheduling configuration: {0}")]
    InvalidConfig(String),
    #[error("team is already registered for this season")]
    TeamAlreadyRegistered,
    #[error("season is full ({max_teams} teams max)")]
    SeasonFull { max_teams: u32 },
    #[error("internal storage error")]
    StorePoisoned,
}

impl From<SchedulingFailure> for ScheduleError {
    fn from(failure: SchedulingFailure) -> Self {
        ScheduleError::Scheduling(failure)
    }
}

/// An invariant breach found by the schedule validator. An empty violation
/// list means the schedule is valid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The same two teams meet more often than the format allows.
    DuplicatePairing { home: TeamId, away: TeamId },
    /// A team has two fixtures on one date.
    TeamDoubleBooked { team: TeamId, date: NaiveDate },
    /// Consecutive fixtures of a team are closer than the rest period.
    RestTooShort {
        team: TeamId,
        first: NaiveDate,
        second: NaiveDate,
        gap_days: i64,
    },
    /// Two fixtures share one (date, time, court) slot.
    SlotReused { slot: Slot },
    /// A team plays a different number of fixtures than the format requires.
    WrongAppearanceCount {
        team: TeamId,
        expected: usize,
        found: usize,
    },
    /// Matchday numbers regress within the schedule.
    MatchdayOutOfOrder { matchday: u32 },
}
