//! Constraint-aware assignment: place each pairing on the first slot that
//! satisfies every rule, scanning slots in calendar order.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{
    Assignment, FailureCause, Pairing, Schedule, SchedulingFailure, Slot, TeamId,
};

/// Assign every pairing to a slot, or fail with a diagnostic.
///
/// Greedy forward scan, no backtracking: pairings are processed in round
/// order (then generation order), and each takes the earliest slot that
/// passes all checks:
///
/// - neither team already plays on the slot's date,
/// - the slot's date is at least `min_rest_days` after each team's
///   last-assigned date,
/// - the slot is not already consumed,
/// - the slot's (date, court) is not already used by a fixture of the same
///   round, so one round spreads over courts and a narrow date window
///   instead of stacking on one court.
///
/// The matchday number of each assignment is its pairing's round, so the
/// logical round structure survives even when calendar dates of adjacent
/// rounds interleave under slot scarcity.
///
/// Identical inputs produce identical output.
///
/// `available_dates` is the count of distinct playable dates in the window;
/// it only feeds the failure diagnostic.
pub fn assign_pairings<I>(
    pairings: &[Pairing],
    slots: I,
    min_rest_days: i64,
    available_dates: usize,
) -> Result<Schedule, SchedulingFailure>
where
    I: IntoIterator<Item = Slot>,
{
    let mut source = slots.into_iter();
    // Slots already pulled from the (lazy) source; scans restart from the
    // front because a later pairing may fit an earlier leftover slot.
    let mut buffered: Vec<Slot> = Vec::new();
    let mut consumed: Vec<bool> = Vec::new();

    let mut last_played: HashMap<TeamId, NaiveDate> = HashMap::new();
    let mut booked_dates: HashSet<(TeamId, NaiveDate)> = HashSet::new();
    let mut round_courts: HashSet<(u32, NaiveDate, u32)> = HashSet::new();

    let mut schedule: Schedule = Vec::with_capacity(pairings.len());

    for (placed, pairing) in pairings.iter().enumerate() {
        let mut chosen: Option<usize> = None;
        // Whether any slot had capacity left for this round; distinguishes
        // a window that is simply too small from team constraints blocking
        // otherwise-usable slots.
        let mut saw_usable_capacity = false;

        let mut i = 0;
        loop {
            if i == buffered.len() {
                match source.next() {
                    Some(slot) => {
                        buffered.push(slot);
                        consumed.push(false);
                    }
                    None => break,
                }
            }
            if consumed[i] {
                i += 1;
                continue;
            }
            let slot = buffered[i];
            if round_courts.contains(&(pairing.round, slot.date, slot.court)) {
                i += 1;
                continue;
            }
            saw_usable_capacity = true;
            if booked_dates.contains(&(pairing.home, slot.date))
                || booked_dates.contains(&(pairing.away, slot.date))
            {
                i += 1;
                continue;
            }
            let rested = |team: TeamId| match last_played.get(&team) {
                Some(&last) => (slot.date - last).num_days() >= min_rest_days,
                None => true,
            };
            if !rested(pairing.home) || !rested(pairing.away) {
                i += 1;
                continue;
            }
            chosen = Some(i);
            break;
        }

        let Some(index) = chosen else {
            let cause = if saw_usable_capacity {
                FailureCause::RestDays
            } else {
                FailureCause::SlotsExhausted
            };
            return Err(SchedulingFailure {
                pairing: *pairing,
                cause,
                placed,
                total: pairings.len(),
                available_dates,
                partial: schedule,
            });
        };

        let slot = buffered[index];
        consumed[index] = true;
        round_courts.insert((pairing.round, slot.date, slot.court));
        booked_dates.insert((pairing.home, slot.date));
        booked_dates.insert((pairing.away, slot.date));
        last_played.insert(pairing.home, slot.date);
        last_played.insert(pairing.away, slot.date);
        schedule.push(Assignment {
            pairing: *pairing,
            slot,
            matchday: pairing.round,
        });
    }

    Ok(schedule)
}
