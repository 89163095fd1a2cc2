//! Season, its lifecycle states, and the scheduling window configuration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::error::ScheduleError;

/// Unique identifier for a season.
pub type SeasonId = Uuid;

/// Lifecycle state of a season.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    /// Being set up; fixtures may be generated and regenerated freely.
    #[default]
    Draft,
    /// Open for team registration; fixtures may still be (re)generated.
    Registration,
    /// Matches are being played; fixtures are locked.
    Active,
    /// Season finished; fixtures are locked.
    Completed,
    Cancelled,
}

impl SeasonStatus {
    /// Whether fixtures may be generated, regenerated, or cleared.
    pub fn allows_fixture_changes(self) -> bool {
        matches!(self, SeasonStatus::Draft | SeasonStatus::Registration)
    }
}

impl std::fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SeasonStatus::Draft => "draft",
            SeasonStatus::Registration => "registration",
            SeasonStatus::Active => "active",
            SeasonStatus::Completed => "completed",
            SeasonStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Fixture-generation marker on the season. Commit-mode generation is a
/// single-writer critical section: the transition into `Generating` is a
/// conditional write, so a second concurrent request fails fast instead of
/// double-booking the season.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixturesStatus {
    #[default]
    Pending,
    Generating,
    Completed,
    Error,
}

/// Day of week a season plays on. Stored lowercase ("monday", ...) in
/// season configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl MatchDay {
    pub fn weekday(self) -> Weekday {
        match self {
            MatchDay::Monday => Weekday::Mon,
            MatchDay::Tuesday => Weekday::Tue,
            MatchDay::Wednesday => Weekday::Wed,
            MatchDay::Thursday => Weekday::Thu,
            MatchDay::Friday => Weekday::Fri,
            MatchDay::Saturday => Weekday::Sat,
            MatchDay::Sunday => Weekday::Sun,
        }
    }
}

fn default_match_days() -> Vec<MatchDay> {
    vec![MatchDay::Saturday]
}

fn default_match_times() -> Vec<NaiveTime> {
    NaiveTime::from_hms_opt(19, 0, 0).into_iter().collect()
}

fn default_court_count() -> u32 {
    1
}

/// The season window: which dates, times and courts are bookable, and the
/// rules the scheduler must respect. Supplied once per scheduling run;
/// immutable while the run computes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Permitted weekdays (e.g. all Thursdays of the window).
    #[serde(default = "default_match_days")]
    pub match_days: Vec<MatchDay>,
    /// Time slots per playable date.
    #[serde(default = "default_match_times")]
    pub match_times: Vec<NaiveTime>,
    /// Courts are numbered 1..=court_count.
    #[serde(default = "default_court_count")]
    pub court_count: u32,
    /// Minimum days between two consecutive matches of the same team.
    #[serde(default)]
    pub min_rest_days: i64,
    /// Dates removed from the window (holidays, venue closures).
    #[serde(default)]
    pub blackout_dates: Vec<NaiveDate>,
    /// Mirror every pairing with home/away swapped.
    #[serde(default)]
    pub double_round_robin: bool,
}

impl SchedulingConfig {
    /// Boundary check before a scheduling run. External rows are untrusted;
    /// everything past this point assumes a well-formed window.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.end_date < self.start_date {
            return Err(ScheduleError::InvalidConfig(
                "end date is before start date".into(),
            ));
        }
        if self.match_days.is_empty() {
            return Err(ScheduleError::InvalidConfig(
                "at least one match day is required".into(),
            ));
        }
        if self.match_times.is_empty() {
            return Err(ScheduleError::InvalidConfig(
                "at least one match time is required".into(),
            ));
        }
        if self.court_count == 0 {
            return Err(ScheduleError::InvalidConfig(
                "at least one court is required".into(),
            ));
        }
        if self.min_rest_days < 0 {
            return Err(ScheduleError::InvalidConfig(
                "min rest days cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

/// A season of a league: lifecycle, registration limits, and the
/// scheduling window used for fixture generation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub league_name: String,
    pub season_year: i32,
    pub status: SeasonStatus,
    pub fixtures_status: FixturesStatus,
    /// Set when commit-mode generation last succeeded.
    pub fixtures_generated_at: Option<NaiveDateTime>,
    pub total_matches_planned: Option<u32>,
    pub min_teams: u32,
    pub max_teams: Option<u32>,
    pub scheduling: SchedulingConfig,
}

impl Season {
    /// Create a new season in Draft state with no fixtures.
    pub fn new(
        name: impl Into<String>,
        league_name: impl Into<String>,
        season_year: i32,
        scheduling: SchedulingConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            league_name: league_name.into(),
            season_year,
            status: SeasonStatus::Draft,
            fixtures_status: FixturesStatus::Pending,
            fixtures_generated_at: None,
            total_matches_planned: None,
            min_teams: 2,
            max_teams: None,
            scheduling,
        }
    }
}
