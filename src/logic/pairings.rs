//! Round-robin pairing generation via the circle (polygon) method.

use crate::models::{Pairing, TeamId};

/// Generate the round-robin pairings for the given teams, in round order.
///
/// For N teams this yields N-1 rounds (N rounds when N is odd) of ⌊N/2⌋
/// pairings each, N·(N-1)/2 in total. Odd team counts get a synthetic bye
/// seat so exactly one real team sits out per round; bye pairings are
/// discarded before output. Home/away alternates with round parity so no
/// team hosts every week. With `double_round_robin`, a mirrored second
/// cycle (home/away swapped, rounds continuing where the first cycle
/// ended) is appended.
///
/// Output order is fully determined by input order.
pub fn generate_pairings(team_ids: &[TeamId], double_round_robin: bool) -> Vec<Pairing> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    // Seat the teams around the circle; odd counts get a bye seat.
    let mut seats: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let size = seats.len();
    let rounds = size - 1;

    let mut pairings = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1) / 2);
    for round in 0..rounds {
        for i in 0..size / 2 {
            let (Some(a), Some(b)) = (seats[i], seats[size - 1 - i]) else {
                // The team opposite the bye seat sits this round out.
                continue;
            };
            let (home, away) = if round % 2 == 0 { (a, b) } else { (b, a) };
            pairings.push(Pairing {
                home,
                away,
                round: (round + 1) as u32,
            });
        }
        // Keep seat 0 fixed, rotate the rest one step.
        seats[1..].rotate_right(1);
    }

    if double_round_robin {
        let mirrored: Vec<Pairing> = pairings
            .iter()
            .map(|p| Pairing {
                home: p.away,
                away: p.home,
                round: p.round + rounds as u32,
            })
            .collect();
        pairings.extend(mirrored);
    }

    pairings
}

/// Total fixtures a full run will produce for `team_count` teams.
pub fn total_fixtures(team_count: usize, double_round_robin: bool) -> usize {
    let single = team_count * team_count.saturating_sub(1) / 2;
    if double_round_robin {
        single * 2
    } else {
        single
    }
}
