//! Post-hoc schedule validation: checks the global invariants regardless of
//! how the schedule was produced.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{Assignment, Slot, TeamId, Violation};

/// Check every invariant of a finished schedule. Empty result = valid.
///
/// - each pairing occurs once (single round-robin) or once per direction
///   (double round-robin),
/// - no team plays twice on one date,
/// - per-team gaps between consecutive fixtures are >= `min_rest_days`,
/// - no slot hosts two fixtures,
/// - every team has the appearance count the format requires,
/// - matchday numbers never regress in schedule order.
pub fn validate_schedule(
    schedule: &[Assignment],
    double_round_robin: bool,
    min_rest_days: i64,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Pairing multiplicity. In a double round-robin the directed pairing is
    // the unit of uniqueness; in a single round-robin the unordered one is.
    let mut pairing_counts: HashMap<(TeamId, TeamId), usize> = HashMap::new();
    for a in schedule {
        let key = if double_round_robin {
            (a.pairing.home, a.pairing.away)
        } else {
            a.pairing.unordered_key()
        };
        *pairing_counts.entry(key).or_default() += 1;
    }
    let mut dup_keys: Vec<_> = pairing_counts
        .iter()
        .filter(|(_, &count)| count > 1)
        .map(|(&key, _)| key)
        .collect();
    dup_keys.sort();
    for (home, away) in dup_keys {
        violations.push(Violation::DuplicatePairing { home, away });
    }

    // One fixture per team per date.
    let mut date_counts: HashMap<(TeamId, NaiveDate), usize> = HashMap::new();
    for a in schedule {
        *date_counts.entry((a.pairing.home, a.slot.date)).or_default() += 1;
        *date_counts.entry((a.pairing.away, a.slot.date)).or_default() += 1;
    }
    let mut double_booked: Vec<_> = date_counts
        .iter()
        .filter(|(_, &count)| count > 1)
        .map(|(&key, _)| key)
        .collect();
    double_booked.sort();
    for (team, date) in double_booked {
        violations.push(Violation::TeamDoubleBooked { team, date });
    }

    // Rest gaps between chronologically consecutive fixtures of each team.
    let mut team_dates: BTreeMap<TeamId, Vec<NaiveDate>> = BTreeMap::new();
    for a in schedule {
        team_dates.entry(a.pairing.home).or_default().push(a.slot.date);
        team_dates.entry(a.pairing.away).or_default().push(a.slot.date);
    }
    for (&team, dates) in &mut team_dates {
        dates.sort();
        for pair in dates.windows(2) {
            let gap_days = (pair[1] - pair[0]).num_days();
            if gap_days < min_rest_days {
                violations.push(Violation::RestTooShort {
                    team,
                    first: pair[0],
                    second: pair[1],
                    gap_days,
                });
            }
        }
    }

    // Slot exclusivity.
    let mut seen_slots: HashSet<Slot> = HashSet::new();
    let mut reused: HashSet<Slot> = HashSet::new();
    for a in schedule {
        if !seen_slots.insert(a.slot) {
            reused.insert(a.slot);
        }
    }
    let mut reused: Vec<_> = reused.into_iter().collect();
    reused.sort();
    for slot in reused {
        violations.push(Violation::SlotReused { slot });
    }

    // Appearance counts: N-1 fixtures per team, doubled for home-and-away.
    let team_count = team_dates.len();
    if team_count > 1 {
        let expected = (team_count - 1) * if double_round_robin { 2 } else { 1 };
        for (&team, dates) in &team_dates {
            if dates.len() != expected {
                violations.push(Violation::WrongAppearanceCount {
                    team,
                    expected,
                    found: dates.len(),
                });
            }
        }
    }

    // Matchdays must not regress in schedule order.
    let mut previous = 0u32;
    for a in schedule {
        if a.matchday < previous {
            violations.push(Violation::MatchdayOutOfOrder {
                matchday: a.matchday,
            });
            break;
        }
        previous = a.matchday;
    }

    violations
}
