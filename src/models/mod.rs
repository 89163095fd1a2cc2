//! Data structures for league scheduling: teams, seasons, slots, fixtures.

mod error;
mod fixture;
mod season;
mod team;

pub use error::{FailureCause, ScheduleError, SchedulingFailure, Violation};
pub use fixture::{Assignment, Fixture, FixtureId, FixtureStatus, Pairing, Schedule, Slot};
pub use season::{FixturesStatus, MatchDay, SchedulingConfig, Season, SeasonId, SeasonStatus};
pub use team::{RegistrationStatus, Team, TeamId, TeamRegistration};
