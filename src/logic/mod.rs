//! Pure scheduling logic: calendar slots, pairings, assignment, validation.
//! Plain data in, plain data out; persistence lives behind the store traits.

mod assign;
mod calendar;
mod pairings;
mod validate;

pub use assign::assign_pairings;
pub use calendar::{count_playable_dates, playable_dates, slots};
pub use pairings::{generate_pairings, total_fixtures};
pub use validate::validate_schedule;
