//! Tie-break heuristics for choosing one player from a set of eligible
//! candidates.
//!
//! Each heuristic is an explicit ordering key plus a single random draw
//! among exact ties. The deterministic part (the key) and the
//! non-deterministic part (the draw) are kept separate so tests can pin the
//! RNG seed and exercise the ordering alone.

use rand::Rng;

use crate::models::{FieldingGrid, Player, Position};

/// Returns the candidate with the minimum key; exact ties are settled by one
/// draw from `rng`. Candidates are roster indices.
///
/// Panics if `candidates` is empty — callers check for an empty candidate
/// set first (an empty set means the position stays open, which is not a
/// selection problem).
pub(crate) fn pick_min_by_key<K, F, R>(candidates: &[usize], key: F, rng: &mut R) -> usize
where
    K: Ord,
    F: Fn(usize) -> K,
    R: Rng + ?Sized,
{
    assert!(!candidates.is_empty(), "candidate set must be non-empty");

    let mut ties: Vec<usize> = Vec::with_capacity(1);
    let mut best: Option<K> = None;
    for &candidate in candidates {
        let candidate_key = key(candidate);
        match &best {
            Some(current) if candidate_key > *current => {}
            Some(current) if candidate_key == *current => ties.push(candidate),
            _ => {
                best = Some(candidate_key);
                ties.clear();
                ties.push(candidate);
            }
        }
    }
    ties[rng.gen_range(0..ties.len())]
}

/// Pitcher choice: fewest total innings pitched, then shortest current
/// streak.
pub(crate) fn select_pitcher<R: Rng + ?Sized>(
    candidates: &[usize],
    players: &[Player],
    rng: &mut R,
) -> usize {
    pick_min_by_key(
        candidates,
        |index| (players[index].pitching.total, players[index].pitching.consecutive),
        rng,
    )
}

/// Catcher choice: fewest innings already spent behind the plate anywhere in
/// the currently assigned grid.
pub(crate) fn select_catcher<R: Rng + ?Sized>(
    candidates: &[usize],
    players: &[Player],
    grid: &FieldingGrid,
    rng: &mut R,
) -> usize {
    select_for_position(candidates, players, grid, Position::Catcher, rng)
}

/// General choice: fewest innings already spent at that specific position.
pub(crate) fn select_for_position<R: Rng + ?Sized>(
    candidates: &[usize],
    players: &[Player],
    grid: &FieldingGrid,
    position: Position,
    rng: &mut R,
) -> usize {
    pick_min_by_key(candidates, |index| grid.position_count(&players[index].id, position), rng)
}
