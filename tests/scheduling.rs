//! Integration tests for the pure scheduling pipeline: calendar slots,
//! constraint-aware assignment, and the schedule validator.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use league_fixtures_web::{
    assign_pairings, count_playable_dates, generate_pairings, playable_dates, slots,
    validate_schedule, Assignment, FailureCause, MatchDay, Pairing, SchedulingConfig, Slot,
    TeamId, Violation,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

/// Saturdays only, one time slot, one court.
fn saturday_config(start: NaiveDate, end: NaiveDate, min_rest_days: i64) -> SchedulingConfig {
    SchedulingConfig {
        start_date: start,
        end_date: end,
        match_days: vec![MatchDay::Saturday],
        match_times: vec![time(19, 0)],
        court_count: 1,
        min_rest_days,
        blackout_dates: Vec::new(),
        double_round_robin: false,
    }
}

#[test]
fn calendar_keeps_only_permitted_weekdays() {
    // 2026-01-03 is a Saturday; the window holds six of them.
    let config = saturday_config(date(2026, 1, 3), date(2026, 2, 7), 0);
    let dates: Vec<NaiveDate> = playable_dates(&config).collect();
    assert_eq!(dates.len(), 6);
    assert_eq!(count_playable_dates(&config), 6);
    assert!(dates.iter().all(|d| d.weekday() == Weekday::Sat));
    assert_eq!(dates[0], date(2026, 1, 3));
    assert_eq!(dates[5], date(2026, 2, 7));
}

#[test]
fn calendar_excludes_blackout_dates() {
    let mut config = saturday_config(date(2026, 1, 3), date(2026, 2, 7), 0);
    config.blackout_dates = vec![date(2026, 1, 10)];
    let dates: Vec<NaiveDate> = playable_dates(&config).collect();
    assert_eq!(dates.len(), 5);
    assert!(!dates.contains(&date(2026, 1, 10)));
}

#[test]
fn slots_come_out_in_date_time_court_order() {
    let mut config = saturday_config(date(2026, 1, 3), date(2026, 1, 17), 0);
    config.match_times = vec![time(19, 0), time(20, 30)];
    config.court_count = 2;

    let all: Vec<Slot> = slots(&config).collect();
    // 3 Saturdays x 2 times x 2 courts.
    assert_eq!(all.len(), 12);
    assert!(all.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        all[0],
        Slot {
            date: date(2026, 1, 3),
            time: time(19, 0),
            court: 1
        }
    );
}

/// 4 teams, six Saturdays, one court, six rest days: a full single
/// round-robin of 6 fixtures over 3 matchdays of 2.
#[test]
fn four_teams_across_six_saturdays() {
    let teams = team_ids(4);
    let config = saturday_config(date(2026, 1, 3), date(2026, 2, 7), 6);
    let pairings = generate_pairings(&teams, false);

    let schedule = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap();

    assert_eq!(schedule.len(), 6);

    let mut per_matchday: HashMap<u32, usize> = HashMap::new();
    let mut per_team: HashMap<TeamId, usize> = HashMap::new();
    let mut team_dates: HashSet<(TeamId, NaiveDate)> = HashSet::new();
    for a in &schedule {
        *per_matchday.entry(a.matchday).or_default() += 1;
        for team in [a.pairing.home, a.pairing.away] {
            *per_team.entry(team).or_default() += 1;
            // No team twice on one date.
            assert!(team_dates.insert((team, a.slot.date)));
        }
    }
    assert_eq!(per_matchday.len(), 3);
    assert!(per_matchday.values().all(|&count| count == 2));
    assert!(per_team.values().all(|&count| count == 3));

    // Rest gaps hold for every team.
    let mut dates_of: HashMap<TeamId, Vec<NaiveDate>> = HashMap::new();
    for a in &schedule {
        dates_of.entry(a.pairing.home).or_default().push(a.slot.date);
        dates_of.entry(a.pairing.away).or_default().push(a.slot.date);
    }
    for dates in dates_of.values_mut() {
        dates.sort();
        assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() >= 6));
    }

    assert!(validate_schedule(&schedule, false, config.min_rest_days).is_empty());
}

#[test]
fn identical_inputs_produce_identical_schedules() {
    let teams = team_ids(5);
    let config = saturday_config(date(2026, 1, 3), date(2026, 4, 25), 3);
    let pairings = generate_pairings(&teams, false);

    let first = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap();
    let second = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap();
    assert_eq!(first, second);
}

/// 6 pairings cannot fit into a window of two single-slot dates.
#[test]
fn window_too_small_fails_with_slot_exhaustion() {
    let teams = team_ids(4);
    let config = saturday_config(date(2026, 1, 3), date(2026, 1, 10), 0);
    let pairings = generate_pairings(&teams, false);

    let failure = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap_err();

    assert_eq!(failure.cause, FailureCause::SlotsExhausted);
    assert_eq!(failure.total, 6);
    assert_eq!(failure.placed, 2);
    assert_eq!(failure.available_dates, 2);
    assert_eq!(failure.partial.len(), 2);
    let message = failure.to_string();
    assert!(message.contains("2 match dates"), "message: {message}");
}

/// Free slots remain, but the rest period blocks both of them.
#[test]
fn rest_period_conflict_is_reported_as_such() {
    let teams = team_ids(3);
    let mut config = saturday_config(date(2026, 1, 3), date(2026, 1, 10), 6);
    config.match_times = vec![time(19, 0), time(20, 30)];
    let pairings = generate_pairings(&teams, false);
    assert_eq!(pairings.len(), 3);

    let failure = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap_err();

    assert_eq!(failure.cause, FailureCause::RestDays);
    let message = failure.to_string();
    assert!(message.contains("rest"), "message: {message}");
    assert!(message.contains("2 match dates"), "message: {message}");
}

/// A fuller season: 6 teams on Wednesdays and Saturdays over two courts.
#[test]
fn six_team_season_passes_validation() {
    let teams = team_ids(6);
    let config = SchedulingConfig {
        start_date: date(2026, 1, 3),
        end_date: date(2026, 3, 14),
        match_days: vec![MatchDay::Wednesday, MatchDay::Saturday],
        match_times: vec![time(19, 0)],
        court_count: 2,
        min_rest_days: 2,
        blackout_dates: vec![date(2026, 1, 14)],
        double_round_robin: false,
    };
    let pairings = generate_pairings(&teams, false);
    assert_eq!(pairings.len(), 15);

    let schedule = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap();

    assert_eq!(schedule.len(), 15);
    assert!(schedule
        .iter()
        .all(|a| a.slot.date != date(2026, 1, 14)));
    assert!(validate_schedule(&schedule, false, config.min_rest_days).is_empty());
}

#[test]
fn double_round_robin_schedules_both_legs() {
    let teams = team_ids(3);
    let config = saturday_config(date(2026, 1, 3), date(2026, 5, 30), 0);
    let pairings = generate_pairings(&teams, true);
    assert_eq!(pairings.len(), 6);

    let schedule = assign_pairings(
        &pairings,
        slots(&config),
        config.min_rest_days,
        count_playable_dates(&config),
    )
    .unwrap();

    assert_eq!(schedule.len(), 6);
    assert!(validate_schedule(&schedule, true, config.min_rest_days).is_empty());
}

#[test]
fn validator_reports_seeded_violations() {
    let teams = team_ids(3);
    let slot = Slot {
        date: date(2026, 1, 3),
        time: time(19, 0),
        court: 1,
    };
    // Same slot twice, and the first team double-booked on the date.
    let schedule = vec![
        Assignment {
            pairing: Pairing {
                home: teams[0],
                away: teams[1],
                round: 1,
            },
            slot,
            matchday: 1,
        },
        Assignment {
            pairing: Pairing {
                home: teams[0],
                away: teams[2],
                round: 2,
            },
            slot,
            matchday: 2,
        },
    ];

    let violations = validate_schedule(&schedule, false, 7);
    assert!(violations
        .iter()
        .any(|v| matches!(v, Violation::TeamDoubleBooked { team, .. } if *team == teams[0])));
    assert!(violations
        .iter()
        .any(|v| matches!(v, Violation::SlotReused { slot: s } if *s == slot)));
    assert!(violations
        .iter()
        .any(|v| matches!(v, Violation::WrongAppearanceCount { .. })));
}

#[test]
fn validator_accepts_the_empty_schedule() {
    assert!(validate_schedule(&[], false, 7).is_empty());
}
