//! Amateur league fixture scheduler: library with models, pure scheduling
//! logic, and the generation engine behind the web binary.

pub mod engine;
pub mod logic;
pub mod models;
pub mod store;

pub use engine::{
    clear_fixtures, generate_fixtures, materialize, preview_fixtures, GenerationOutcome,
};
pub use logic::{
    assign_pairings, count_playable_dates, generate_pairings, playable_dates, slots,
    total_fixtures, validate_schedule,
};
pub use models::{
    Assignment, FailureCause, Fixture, FixtureId, FixtureStatus, FixturesStatus, MatchDay,
    Pairing, RegistrationStatus, Schedule, ScheduleError, SchedulingConfig, SchedulingFailure,
    Season, SeasonId, SeasonStatus, Slot, Team, TeamId, TeamRegistration, Violation,
};
pub use store::{FixtureStore, MemoryStore, SeasonStore, TeamStore};
