//! The per-inning assignment pass: three ordered greedy passes over the
//! available players, then bench construction. No position is revisited once
//! filled.

use rand::Rng;

use super::select;
use crate::error::Result;
use crate::models::{FieldingGrid, GameConfig, InactivePolicy, Player, Position};

/// Fills one inning's nine positions and bench from scratch. Expects the
/// inning's slots to be empty and the players' pitching records to reflect
/// innings 1..inning of the grid (the sequential rebuild in the orchestrator
/// guarantees both).
pub(crate) fn fill_inning<R: Rng + ?Sized>(
    players: &mut [Player],
    config: &GameConfig,
    grid: &mut FieldingGrid,
    inning: u8,
    rng: &mut R,
) -> Result<()> {
    grid.inning_mut(inning)?.clear();

    let available: Vec<usize> =
        (0..players.len()).filter(|&index| players[index].can_play(inning)).collect();
    let mut assigned = vec![false; players.len()];

    // Pass 1: pitcher, under the usage limits. Only runs when the rules are
    // enforced; otherwise the slot is treated like any other position below.
    if config.enforce_pitcher_rules {
        let candidates: Vec<usize> = available
            .iter()
            .copied()
            .filter(|&index| players[index].can_pitch(inning))
            .collect();
        if !candidates.is_empty() {
            let choice = select::select_pitcher(&candidates, players, rng);
            grid.inning_mut(inning)?.set_fielder(Position::Pitcher, Some(players[choice].id.clone()));
            assigned[choice] = true;
            players[choice].assign_pitch(inning);
        }
    }

    // Pass 2: catcher, spread across the roster.
    let candidates: Vec<usize> = available
        .iter()
        .copied()
        .filter(|&index| !assigned[index] && players[index].eligible.catcher)
        .collect();
    if !candidates.is_empty() {
        let choice = select::select_catcher(&candidates, players, grid, rng);
        grid.inning_mut(inning)?.set_fielder(Position::Catcher, Some(players[choice].id.clone()));
        assigned[choice] = true;
    }

    // Pass 3: every still-open position in fill order. With pitcher rules on,
    // the pitcher slot is never revisited here: pass 1 was its only chance,
    // and filling it from plain eligibility could break the usage limits.
    for position in grid.inning(inning)?.open_positions() {
        if position == Position::Pitcher && config.enforce_pitcher_rules {
            continue;
        }
        let candidates: Vec<usize> = available
            .iter()
            .copied()
            .filter(|&index| !assigned[index] && players[index].eligible.allows(position))
            .collect();
        if candidates.is_empty() {
            continue; // stays open; the validator reports it
        }
        let choice = select::select_for_position(&candidates, players, grid, position, rng);
        grid.inning_mut(inning)?.set_fielder(position, Some(players[choice].id.clone()));
        assigned[choice] = true;
        if position == Position::Pitcher {
            // Rules are off, but derived pitching state still mirrors the grid.
            players[choice].record_pitch(inning);
        }
    }

    // Bench: everyone at the game and not fielded, in roster order. Inactive
    // players are bench-listed only under the Bench policy.
    let bench: Vec<String> = players
        .iter()
        .enumerate()
        .filter(|(index, player)| {
            !assigned[*index]
                && player.is_available(inning)
                && (player.active || config.inactive_policy == InactivePolicy::Bench)
        })
        .map(|(_, player)| player.id.clone())
        .collect();
    grid.inning_mut(inning)?.bench = bench;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Eligibility;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn full_roster(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(&format!("Player{}", i), "Test", None, Eligibility::all())).collect()
    }

    #[test]
    fn test_fills_all_positions_with_full_roster() {
        let mut players = full_roster(11);
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let slots = grid.inning(1).unwrap();
        assert!(slots.open_positions().is_empty());
        assert_eq!(slots.bench.len(), 2);
    }

    #[test]
    fn test_exactly_nine_players_leave_empty_bench() {
        let mut players = full_roster(9);
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let slots = grid.inning(1).unwrap();
        assert!(slots.open_positions().is_empty());
        assert!(slots.bench.is_empty());
    }

    #[test]
    fn test_no_player_holds_two_positions() {
        let mut players = full_roster(9);
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let slots = grid.inning(1).unwrap();
        let mut seen = std::collections::HashSet::new();
        for (_, id) in slots.fielders() {
            assert!(seen.insert(id.clone()), "{} fielded twice", id);
        }
    }

    #[test]
    fn test_position_with_no_eligible_candidate_stays_open() {
        // Nobody can catch.
        let mut players: Vec<Player> = (0..9)
            .map(|i| {
                let mut eligible = Eligibility::all();
                eligible.catcher = false;
                Player::new(&format!("Player{}", i), "Test", None, eligible)
            })
            .collect();
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let slots = grid.inning(1).unwrap();
        assert_eq!(slots.catcher, None);
        assert_eq!(slots.open_positions(), vec![Position::Catcher]);
    }

    #[test]
    fn test_pitcher_slot_respects_usage_limits() {
        let mut players = full_roster(9);
        // Exhaust everyone's total allowance except one player.
        for player in players.iter_mut().skip(1) {
            player.pitching.total = 3;
        }
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();
        let pitcher = grid.inning(1).unwrap().pitcher.clone().unwrap();
        assert_eq!(pitcher, players[0].id);
    }

    #[test]
    fn test_pitcher_slot_left_open_when_everyone_is_spent() {
        let mut players = full_roster(9);
        for player in players.iter_mut() {
            player.pitching.total = 3;
        }
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();
        assert_eq!(grid.inning(1).unwrap().pitcher, None);
    }

    #[test]
    fn test_pitcher_filled_from_eligibility_when_rules_off() {
        let mut players = full_roster(9);
        for player in players.iter_mut() {
            player.pitching.total = 3; // irrelevant with rules off
        }
        let mut config = GameConfig::default();
        config.enforce_pitcher_rules = false;
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let pitcher = grid.inning(1).unwrap().pitcher.clone().unwrap();
        let holder = players.iter().find(|p| p.id == pitcher).unwrap();
        assert_eq!(holder.pitching.total, 4, "tracker still mirrors the grid");
    }

    #[test]
    fn test_unavailable_players_are_absent_entirely() {
        let mut players = full_roster(10);
        let absent_id = players[4].id.clone();
        players[4] = players[4].clone().with_availability(3, 4);
        let config = GameConfig::default();
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();

        let slots = grid.inning(1).unwrap();
        assert!(!slots.is_fielded(&absent_id));
        assert!(!slots.bench.contains(&absent_id));
    }

    #[test]
    fn test_inactive_players_follow_bench_policy() {
        let mut players = full_roster(10);
        let inactive_id = players[9].id.clone();
        players[9].active = false;

        let mut config = GameConfig::default();
        config.inactive_policy = InactivePolicy::Hide;
        let mut grid = FieldingGrid::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();
        let slots = grid.inning(1).unwrap();
        assert!(!slots.is_fielded(&inactive_id));
        assert!(!slots.bench.contains(&inactive_id));

        config.inactive_policy = InactivePolicy::Bench;
        fill_inning(&mut players, &config, &mut grid, 1, &mut rng).unwrap();
        let slots = grid.inning(1).unwrap();
        assert!(!slots.is_fielded(&inactive_id));
        assert!(slots.bench.contains(&inactive_id));
    }
}
