//! Integration tests for round-robin pairing generation.

use std::collections::{HashMap, HashSet};

use league_fixtures_web::{generate_pairings, total_fixtures, TeamId};
use uuid::Uuid;

fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn fewer_than_two_teams_yields_nothing() {
    assert!(generate_pairings(&[], false).is_empty());
    assert!(generate_pairings(&team_ids(1), false).is_empty());
}

#[test]
fn two_teams_meet_once() {
    let teams = team_ids(2);
    let pairings = generate_pairings(&teams, false);
    assert_eq!(pairings.len(), 1);
    assert_eq!(pairings[0].round, 1);
    assert!(pairings[0].involves(teams[0]));
    assert!(pairings[0].involves(teams[1]));
}

#[test]
fn even_team_count_is_complete() {
    let teams = team_ids(6);
    let pairings = generate_pairings(&teams, false);

    // 6 teams: 15 unique unordered pairs across 5 rounds of 3.
    assert_eq!(pairings.len(), 15);
    assert_eq!(pairings.len(), total_fixtures(6, false));

    let unordered: HashSet<_> = pairings.iter().map(|p| p.unordered_key()).collect();
    assert_eq!(unordered.len(), 15);

    let mut per_round: HashMap<u32, usize> = HashMap::new();
    let mut per_team: HashMap<TeamId, usize> = HashMap::new();
    for p in &pairings {
        *per_round.entry(p.round).or_default() += 1;
        *per_team.entry(p.home).or_default() += 1;
        *per_team.entry(p.away).or_default() += 1;
    }
    assert_eq!(per_round.len(), 5);
    assert!(per_round.values().all(|&count| count == 3));
    assert_eq!(per_team.len(), 6);
    assert!(per_team.values().all(|&count| count == 5));
}

#[test]
fn odd_team_count_sits_each_team_out_once() {
    let teams = team_ids(5);
    let pairings = generate_pairings(&teams, false);

    // 5 teams: 10 pairings over 5 rounds of 2, one team resting per round.
    assert_eq!(pairings.len(), 10);

    let mut rounds: HashMap<u32, HashSet<TeamId>> = HashMap::new();
    for p in &pairings {
        let entry = rounds.entry(p.round).or_default();
        entry.insert(p.home);
        entry.insert(p.away);
    }
    assert_eq!(rounds.len(), 5);

    let mut sit_outs: HashMap<TeamId, usize> = HashMap::new();
    for playing in rounds.values() {
        assert_eq!(playing.len(), 4);
        for &team in &teams {
            if !playing.contains(&team) {
                *sit_outs.entry(team).or_default() += 1;
            }
        }
    }
    assert_eq!(sit_outs.len(), 5);
    assert!(sit_outs.values().all(|&count| count == 1));
}

#[test]
fn double_round_robin_mirrors_every_pairing() {
    let teams = team_ids(4);
    let pairings = generate_pairings(&teams, true);

    // 4 teams double: 12 directed pairings, each direction exactly once.
    assert_eq!(pairings.len(), 12);
    assert_eq!(pairings.len(), total_fixtures(4, true));

    let directed: HashSet<_> = pairings.iter().map(|p| (p.home, p.away)).collect();
    assert_eq!(directed.len(), 12);
    for p in &pairings {
        assert!(directed.contains(&(p.away, p.home)));
    }

    // Second cycle continues the round numbering after the first.
    let max_round = pairings.iter().map(|p| p.round).max().unwrap();
    assert_eq!(max_round, 6);
    let first_cycle: Vec<_> = pairings.iter().filter(|p| p.round <= 3).collect();
    let second_cycle: Vec<_> = pairings.iter().filter(|p| p.round > 3).collect();
    assert_eq!(first_cycle.len(), 6);
    assert_eq!(second_cycle.len(), 6);
    for (first, second) in first_cycle.iter().zip(&second_cycle) {
        assert_eq!(first.home, second.away);
        assert_eq!(first.away, second.home);
        assert_eq!(first.round + 3, second.round);
    }
}

#[test]
fn home_and_away_roles_alternate_for_the_fixed_seat() {
    let teams = team_ids(4);
    let pairings = generate_pairings(&teams, false);
    let first_team = teams[0];

    // The fixed seat must not host every round.
    let homes = pairings
        .iter()
        .filter(|p| p.home == first_team)
        .count();
    let aways = pairings
        .iter()
        .filter(|p| p.away == first_team)
        .count();
    assert_eq!(homes + aways, 3);
    assert!(homes >= 1 && aways >= 1);
}

#[test]
fn output_is_deterministic_for_identical_input() {
    let teams = team_ids(7);
    assert_eq!(
        generate_pairings(&teams, false),
        generate_pairings(&teams, false)
    );
    assert_eq!(
        generate_pairings(&teams, true),
        generate_pairings(&teams, true)
    );
}
