//! Calendar window: enumerate the usable (date, time, court) slots of a season.

use chrono::{Datelike, NaiveDate};

use crate::models::{SchedulingConfig, Slot};

/// All playable dates of the window, in order: every date from start to end
/// that falls on a permitted weekday and is not blacked out.
pub fn playable_dates(config: &SchedulingConfig) -> impl Iterator<Item = NaiveDate> + '_ {
    config
        .start_date
        .iter_days()
        .take_while(|date| *date <= config.end_date)
        .filter(|date| {
            config
                .match_days
                .iter()
                .any(|day| day.weekday() == date.weekday())
        })
        .filter(|date| !config.blackout_dates.contains(date))
}

/// The ordered slot sequence of the window: playable dates crossed with the
/// configured time slots and courts, in (date, time, court) order.
///
/// Lazy so long seasons cost nothing beyond what the scheduler pulls.
pub fn slots(config: &SchedulingConfig) -> impl Iterator<Item = Slot> + '_ {
    playable_dates(config).flat_map(move |date| {
        config.match_times.iter().flat_map(move |&time| {
            (1..=config.court_count).map(move |court| Slot { date, time, court })
        })
    })
}

/// How many distinct playable dates the window holds. Used in scheduling
/// failure diagnostics.
pub fn count_playable_dates(config: &SchedulingConfig) -> usize {
    playable_dates(config).count()
}
