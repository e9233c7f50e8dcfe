//! Lineup orchestration: batting order, multi-inning assignment, manual
//! moves, rebalancing, inning locks, and undo/redo.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashSet};

use crate::error::{LineupError, Result};
use crate::models::{FieldingGrid, GameConfig, InactivePolicy, Player, PlayerId, Position, Slot};

mod assign;
mod history;
mod select;
pub mod validate;


pub use history::Snapshot;
pub use validate::{Severity, ValidationIssue};

use history::History;

/// Rebuilds every player's pitching record from the grid's pitcher cells,
/// scanning innings in order. This is the single source of truth for the
/// derived counters: any non-monotonic change to the grid (undo, redo,
/// restore, manual edit) must come through here rather than patching
/// counters in place.
pub fn recompute_pitching(players: &mut [Player], grid: &FieldingGrid) {
    for player in players.iter_mut() {
        player.reset_pitching();
    }
    for inning in 1..=grid.innings() {
        let pitcher = grid
            .inning(inning)
            .ok()
            .and_then(|slots| slots.pitcher.clone());
        if let Some(id) = pitcher {
            if let Some(player) = players.iter_mut().find(|p| p.id == id) {
                player.record_pitch(inning);
            }
        }
    }
}

/// Owns one game's assignment state. All mutation goes through its methods;
/// callers serialize access (no internal locking, per the single-threaded
/// execution model).
#[derive(Debug)]
pub struct Lineup {
    players: Vec<Player>,
    config: GameConfig,
    batting_order: Vec<PlayerId>,
    grid: FieldingGrid,
    locked_innings: BTreeSet<u8>,
    history: History,
    rng: ChaCha8Rng,
}

impl Lineup {
    /// Builds a lineup with an entropy-seeded tie-breaker.
    pub fn new(players: Vec<Player>, config: GameConfig) -> Result<Self> {
        Self::init(players, config, ChaCha8Rng::from_entropy())
    }

    /// Builds a lineup with a fixed seed: same roster + same seed = same
    /// assignments.
    pub fn with_seed(players: Vec<Player>, config: GameConfig, seed: u64) -> Result<Self> {
        Self::init(players, config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn init(players: Vec<Player>, config: GameConfig, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        check_unique_ids(&players)?;

        let grid = FieldingGrid::new(config.innings);
        let mut lineup = Self {
            players,
            config,
            batting_order: Vec::new(),
            grid,
            locked_innings: BTreeSet::new(),
            history: History::default(),
            rng,
        };
        lineup.batting_order = lineup.generate_batting_order();
        lineup.rebuild(|_| true)?;
        log::info!(
            "Generated lineup: {} players over {} innings",
            lineup.players.len(),
            lineup.config.innings
        );
        Ok(lineup)
    }

    /// Rebuilds an externally persisted lineup. Pitching counters in the
    /// incoming roster are ignored and recomputed from the snapshot's grid.
    pub fn from_snapshot(players: Vec<Player>, config: GameConfig, snapshot: Snapshot) -> Result<Self> {
        config.validate()?;
        check_unique_ids(&players)?;
        if snapshot.grid.innings() != config.innings {
            return Err(LineupError::InvalidConfig(format!(
                "snapshot covers {} innings, configuration expects {}",
                snapshot.grid.innings(),
                config.innings
            )));
        }
        let known: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
        for id in snapshot
            .batting_order
            .iter()
            .chain(snapshot.grid.iter().flat_map(|(_, slots)| {
                slots.bench.iter().chain(slots.fielders().map(|(_, id)| id))
            }))
        {
            if !known.contains(id.as_str()) {
                return Err(LineupError::UnknownPlayer(id.clone()));
            }
        }

        let mut lineup = Self {
            players,
            config,
            batting_order: snapshot.batting_order,
            grid: snapshot.grid,
            locked_innings: snapshot.locked_innings,
            history: History::default(),
            rng: ChaCha8Rng::from_entropy(),
        };
        lineup.recompute();
        Ok(lineup)
    }

    // ========================
    // Accessors
    // ========================

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &FieldingGrid {
        &self.grid
    }

    pub fn batting_order(&self) -> &[PlayerId] {
        &self.batting_order
    }

    pub fn locked_innings(&self) -> &BTreeSet<u8> {
        &self.locked_innings
    }

    pub fn is_locked(&self, inning: u8) -> bool {
        self.locked_innings.contains(&inning)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Deep copy of the externally meaningful mutable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            batting_order: self.batting_order.clone(),
            locked_innings: self.locked_innings.clone(),
        }
    }

    pub fn validation_errors(&self) -> Vec<ValidationIssue> {
        validate::validation_errors(&self.players, &self.config, &self.grid)
    }

    pub fn validation_warnings(&self) -> Vec<ValidationIssue> {
        validate::validation_warnings(&self.players, &self.config, &self.grid)
    }

    // ========================
    // Mutations
    // ========================

    /// Relocates one player between two cells, swapping with any occupant of
    /// a field target. Refusals (empty source, availability, pitcher rules)
    /// leave the grid exactly as it was and record nothing in history.
    pub fn move_assignment(
        &mut self,
        from_inning: u8,
        from_slot: Slot,
        to_inning: u8,
        to_slot: Slot,
    ) -> Result<()> {
        self.grid.inning(from_inning)?;
        self.grid.inning(to_inning)?;
        if from_inning == to_inning && from_slot == to_slot {
            return Ok(());
        }

        let moved_id = self.occupant_of(from_inning, from_slot)?;
        let displaced_id: Option<PlayerId> = match to_slot {
            Slot::Field(position) => self.grid.inning(to_inning)?.fielder(position).cloned(),
            Slot::Bench(_) => None,
        };
        if displaced_id.as_deref() == Some(moved_id.as_str()) {
            return Ok(());
        }

        // Feasibility checks up front, so refusal never touches the grid.
        let moved = self.required_player(&moved_id)?;
        if !moved.is_available(to_inning) {
            return Err(LineupError::Unavailable { name: moved.display_name(), inning: to_inning });
        }
        if to_slot == Slot::Field(Position::Pitcher) && !moved.eligible.pitcher {
            return Err(LineupError::PitcherRejected {
                name: moved.display_name(),
                inning: to_inning,
            });
        }
        if let Some(displaced_id) = &displaced_id {
            let displaced = self.required_player(displaced_id)?;
            if !displaced.is_available(from_inning) {
                return Err(LineupError::Unavailable {
                    name: displaced.display_name(),
                    inning: from_inning,
                });
            }
            if from_slot == Slot::Field(Position::Pitcher) && !displaced.eligible.pitcher {
                return Err(LineupError::PitcherRejected {
                    name: displaced.display_name(),
                    inning: from_inning,
                });
            }
        }

        let touches_pitcher = from_slot == Slot::Field(Position::Pitcher)
            || to_slot == Slot::Field(Position::Pitcher);
        let pre = self.snapshot();
        let pre_violations = if self.config.enforce_pitcher_rules && touches_pitcher {
            validate::pitcher_rule_errors(&self.players, &self.grid).len()
        } else {
            0
        };

        self.remove_occupant(from_inning, from_slot, &moved_id);
        if let Some(displaced_id) = &displaced_id {
            if let Slot::Field(position) = to_slot {
                self.grid.inning_mut(to_inning)?.set_fielder(position, None);
            }
            self.detach(from_inning, displaced_id);
            self.place(from_inning, from_slot, displaced_id.clone());
        }
        self.detach(to_inning, &moved_id);
        self.place(to_inning, to_slot, moved_id.clone());
        self.normalize_bench(from_inning);
        self.normalize_bench(to_inning);
        self.recompute();

        // Usage limits are judged on the resulting grid; a move may not
        // introduce a new pitcher-rule violation.
        if self.config.enforce_pitcher_rules && touches_pitcher {
            let post_violations = validate::pitcher_rule_errors(&self.players, &self.grid).len();
            if post_violations > pre_violations {
                let name = self
                    .player(&moved_id)
                    .map(|p| p.display_name())
                    .unwrap_or_else(|| moved_id.clone());
                self.restore(pre);
                return Err(LineupError::PitcherRejected { name, inning: to_inning });
            }
        }

        self.history.record(pre);
        log::debug!(
            "Moved {} from inning {} {} to inning {} {}",
            moved_id,
            from_inning,
            from_slot,
            to_inning,
            to_slot
        );
        Ok(())
    }

    /// Regenerates innings `start_inning..=N`, preserving everything before
    /// `start_inning`. Locked innings inside the range keep their
    /// assignments.
    pub fn rebalance_from(&mut self, start_inning: u8) -> Result<()> {
        self.grid.inning(start_inning)?;
        let pre = self.snapshot();
        self.rebuild(|inning| inning >= start_inning)?;
        self.history.record(pre);
        log::info!("Rebalanced innings {}..={}", start_inning, self.config.innings);
        Ok(())
    }

    /// Regenerates a single inning. A locked inning is refused outright.
    pub fn rebalance_inning(&mut self, inning: u8) -> Result<()> {
        self.grid.inning(inning)?;
        if self.is_locked(inning) {
            return Err(LineupError::LockedInning(inning));
        }
        let pre = self.snapshot();
        self.rebuild(|i| i == inning)?;
        self.history.record(pre);
        log::info!("Rebalanced inning {}", inning);
        Ok(())
    }

    /// Flips an inning's lock. Locked innings survive every rebalance.
    pub fn toggle_lock(&mut self, inning: u8) -> Result<bool> {
        self.grid.inning(inning)?;
        let pre = self.snapshot();
        let now_locked = if self.locked_innings.remove(&inning) {
            false
        } else {
            self.locked_innings.insert(inning);
            true
        };
        self.history.record(pre);
        log::debug!("Inning {} {}", inning, if now_locked { "locked" } else { "unlocked" });
        Ok(now_locked)
    }

    /// Replaces the batting order with a permutation of itself.
    pub fn set_batting_order(&mut self, order: Vec<PlayerId>) -> Result<()> {
        for id in &order {
            if self.player(id).is_none() {
                return Err(LineupError::UnknownPlayer(id.clone()));
            }
        }
        let mut current: Vec<&str> = self.batting_order.iter().map(String::as_str).collect();
        let mut proposed: Vec<&str> = order.iter().map(String::as_str).collect();
        current.sort_unstable();
        proposed.sort_unstable();
        if current != proposed {
            return Err(LineupError::InvalidBattingOrder(
                "order must be a permutation of the current batting order".to_string(),
            ));
        }

        let pre = self.snapshot();
        self.batting_order = order;
        self.history.record(pre);
        Ok(())
    }

    /// Steps back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.restore(previous);
            log::debug!("Undo");
            return true;
        }
        false
    }

    /// Steps forward one snapshot. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.snapshot();
        if let Some(next) = self.history.redo(current) {
            self.restore(next);
            log::debug!("Redo");
            return true;
        }
        false
    }

    // ========================
    // Internals
    // ========================

    fn generate_batting_order(&mut self) -> Vec<PlayerId> {
        let mut order: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|player| {
                player.active && (1..=self.config.innings).any(|inning| player.is_available(inning))
            })
            .map(|player| player.id.clone())
            .collect();
        order.shuffle(&mut self.rng);
        order
    }

    /// Sequential rebuild: walks innings in order, refilling those selected
    /// by `regenerate` (minus locked ones) and replaying the pitcher cells
    /// of the rest, so consecutive-pitching bookkeeping stays correct across
    /// the whole game.
    fn rebuild(&mut self, regenerate: impl Fn(u8) -> bool) -> Result<()> {
        for player in &mut self.players {
            player.reset_pitching();
        }
        for inning in 1..=self.config.innings {
            if regenerate(inning) {
                if self.is_locked(inning) {
                    log::debug!("Inning {} is locked; keeping its assignments", inning);
                } else {
                    assign::fill_inning(
                        &mut self.players,
                        &self.config,
                        &mut self.grid,
                        inning,
                        &mut self.rng,
                    )?;
                    continue;
                }
            }
            let pitcher = self.grid.inning(inning)?.pitcher.clone();
            if let Some(id) = pitcher {
                if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
                    player.record_pitch(inning);
                }
            }
        }
        Ok(())
    }

    fn recompute(&mut self) {
        recompute_pitching(&mut self.players, &self.grid);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.grid = snapshot.grid;
        self.batting_order = snapshot.batting_order;
        self.locked_innings = snapshot.locked_innings;
        self.recompute();
    }

    fn required_player(&self, id: &str) -> Result<&Player> {
        self.player(id).ok_or_else(|| LineupError::UnknownPlayer(id.to_string()))
    }

    fn occupant_of(&self, inning: u8, slot: Slot) -> Result<PlayerId> {
        let slots = self.grid.inning(inning)?;
        match slot {
            Slot::Field(position) => slots
                .fielder(position)
                .cloned()
                .ok_or_else(|| LineupError::empty_slot(inning, Some(position))),
            Slot::Bench(index) => slots
                .bench
                .get(index)
                .cloned()
                .ok_or_else(|| LineupError::empty_slot(inning, None)),
        }
    }

    fn remove_occupant(&mut self, inning: u8, slot: Slot, id: &str) {
        if let Ok(slots) = self.grid.inning_mut(inning) {
            match slot {
                Slot::Field(position) => {
                    slots.set_fielder(position, None);
                }
                Slot::Bench(_) => {
                    slots.remove_from_bench(id);
                }
            }
        }
    }

    fn place(&mut self, inning: u8, slot: Slot, id: PlayerId) {
        if let Ok(slots) = self.grid.inning_mut(inning) {
            match slot {
                Slot::Field(position) => {
                    slots.set_fielder(position, Some(id));
                }
                Slot::Bench(index) => {
                    let index = index.min(slots.bench.len());
                    slots.bench.insert(index, id);
                }
            }
        }
    }

    /// Removes the player from every cell of the inning (field and bench).
    fn detach(&mut self, inning: u8, id: &str) {
        if let Ok(slots) = self.grid.inning_mut(inning) {
            for position in Position::FIELD {
                if slots.fielder(position).map(|f| f == id).unwrap_or(false) {
                    slots.set_fielder(position, None);
                }
            }
            slots.remove_from_bench(id);
        }
    }

    /// Re-establishes the bench invariant for one inning: every player at
    /// the game and not fielded sits on the bench exactly once, in the
    /// existing bench order with newcomers appended.
    fn normalize_bench(&mut self, inning: u8) {
        let Ok(slots) = self.grid.inning(inning) else { return };
        let fielded: HashSet<PlayerId> = slots.fielders().map(|(_, id)| id.clone()).collect();

        let belongs = |player: &Player| {
            player.is_available(inning)
                && (player.active || self.config.inactive_policy == InactivePolicy::Bench)
                && !fielded.contains(&player.id)
        };

        let mut bench: Vec<PlayerId> = Vec::new();
        for id in &slots.bench {
            if bench.contains(id) {
                continue;
            }
            match self.player(id) {
                Some(player) if belongs(player) => bench.push(id.clone()),
                _ => {}
            }
        }
        for player in &self.players {
            if belongs(player) && !bench.contains(&player.id) {
                bench.push(player.id.clone());
            }
        }

        if let Ok(slots) = self.grid.inning_mut(inning) {
            slots.bench = bench;
        }
    }
}

fn check_unique_ids(players: &[Player]) -> Result<()> {
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.id.as_str()) {
            return Err(LineupError::InvalidRoster(format!("duplicate player id {}", player.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Eligibility;

    fn full_roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(&format!("Player{}", i), "Test", Some(i as u8 + 1), Eligibility::all()))
            .collect()
    }

    fn lineup(n: usize, seed: u64) -> Lineup {
        Lineup::with_seed(full_roster(n), GameConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_every_available_player_appears_exactly_once_per_inning() {
        let lineup = lineup(12, 1);
        for (inning, slots) in lineup.grid().iter() {
            let mut seen = HashSet::new();
            for (_, id) in slots.fielders() {
                assert!(seen.insert(id.clone()), "inning {}: {} fielded twice", inning, id);
            }
            for id in &slots.bench {
                assert!(seen.insert(id.clone()), "inning {}: {} benched and fielded", inning, id);
            }
            assert_eq!(seen.len(), 12);
        }
    }

    #[test]
    fn test_pitcher_limits_hold_after_generation() {
        // 10 players, 5 pitcher-eligible, 6 innings.
        let mut players = full_roster(10);
        for player in players.iter_mut().skip(5) {
            player.eligible.pitcher = false;
        }
        for seed in 0..25 {
            let lineup = Lineup::with_seed(players.clone(), GameConfig::default(), seed).unwrap();
            assert!(lineup.validation_errors().is_empty(), "seed {} produced violations", seed);
        }
    }

    #[test]
    fn test_availability_window_scenario() {
        let mut players = full_roster(11);
        let visitor = players[6].id.clone();
        players[6] = players[6].clone().with_availability(3, 4);
        let lineup = Lineup::with_seed(players, GameConfig::default(), 3).unwrap();

        for (inning, slots) in lineup.grid().iter() {
            let present = slots.is_fielded(&visitor) || slots.bench.contains(&visitor);
            if inning == 3 || inning == 4 {
                assert!(present, "visitor missing from inning {}", inning);
            } else {
                assert!(!present, "visitor present in inning {}", inning);
            }
        }
    }

    #[test]
    fn test_batting_order_covers_active_roster() {
        let mut players = full_roster(11);
        players[2].active = false;
        let benched_id = players[2].id.clone();
        let lineup = Lineup::with_seed(players, GameConfig::default(), 4).unwrap();

        assert_eq!(lineup.batting_order().len(), 10);
        assert!(!lineup.batting_order().contains(&benched_id));
    }

    #[test]
    fn test_same_seed_same_lineup() {
        let players = full_roster(11);
        let a = Lineup::with_seed(players.clone(), GameConfig::default(), 42).unwrap();
        let b = Lineup::with_seed(players, GameConfig::default(), 42).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.batting_order(), b.batting_order());
    }

    #[test]
    fn test_move_swap_within_inning() {
        let mut lineup = lineup(11, 5);
        let shortstop = lineup.grid().inning(1).unwrap().shortstop.clone().unwrap();
        let left_field = lineup.grid().inning(1).unwrap().left_field.clone().unwrap();

        lineup
            .move_assignment(
                1,
                Slot::Field(Position::Shortstop),
                1,
                Slot::Field(Position::LeftField),
            )
            .unwrap();

        let slots = lineup.grid().inning(1).unwrap();
        assert_eq!(slots.left_field.as_ref(), Some(&shortstop));
        assert_eq!(slots.shortstop.as_ref(), Some(&left_field));
    }

    #[test]
    fn test_move_bench_to_field_swaps_occupant_to_bench() {
        let mut lineup = lineup(11, 6);
        let benched = lineup.grid().inning(1).unwrap().bench[0].clone();
        let fielded = lineup.grid().inning(1).unwrap().center_field.clone().unwrap();

        lineup
            .move_assignment(1, Slot::Bench(0), 1, Slot::Field(Position::CenterField))
            .unwrap();

        let slots = lineup.grid().inning(1).unwrap();
        assert_eq!(slots.center_field.as_ref(), Some(&benched));
        assert!(slots.bench.contains(&fielded));
        assert!(!slots.bench.contains(&benched));
    }

    #[test]
    fn test_move_ineligible_pitcher_fails_and_grid_unchanged() {
        let mut players = full_roster(11);
        players[10].eligible.pitcher = false;
        let outsider = players[10].id.clone();
        let mut lineup = Lineup::with_seed(players, GameConfig::default(), 7).unwrap();

        let before = lineup.snapshot();
        for inning in 1..=6 {
            let slots = lineup.grid().inning(inning).unwrap();
            let from = if let Some(position) = slots.fielded_position(&outsider) {
                Slot::Field(position)
            } else {
                let index = slots.bench.iter().position(|id| *id == outsider).unwrap();
                Slot::Bench(index)
            };
            let result =
                lineup.move_assignment(inning, from, inning, Slot::Field(Position::Pitcher));
            assert!(matches!(result, Err(LineupError::PitcherRejected { .. })));
            assert_eq!(lineup.snapshot(), before, "grid changed on refused move");
        }
        assert!(!lineup.can_undo(), "refused moves must not pollute history");
    }

    #[test]
    fn test_move_into_unavailable_inning_fails() {
        let mut players = full_roster(11);
        players[0] = players[0].clone().with_availability(1, 3);
        let part_timer = players[0].id.clone();
        let mut lineup = Lineup::with_seed(players, GameConfig::default(), 8).unwrap();

        let slots = lineup.grid().inning(2).unwrap();
        let from = if let Some(position) = slots.fielded_position(&part_timer) {
            Slot::Field(position)
        } else {
            Slot::Bench(slots.bench.iter().position(|id| *id == part_timer).unwrap())
        };
        let result = lineup.move_assignment(2, from, 5, Slot::Field(Position::RightField));
        assert!(matches!(result, Err(LineupError::Unavailable { .. })));
    }

    #[test]
    fn test_move_from_empty_slot_fails() {
        let mut players = full_roster(9);
        for player in players.iter_mut() {
            player.eligible.catcher = false;
        }
        let mut lineup = Lineup::with_seed(players, GameConfig::default(), 9).unwrap();
        let result = lineup.move_assignment(
            1,
            Slot::Field(Position::Catcher),
            1,
            Slot::Field(Position::RightField),
        );
        assert!(matches!(result, Err(LineupError::EmptySlot { .. })));
    }

    #[test]
    fn test_move_out_of_pitcher_slot_updates_tracker() {
        let mut lineup = lineup(11, 10);
        let pitcher = lineup.grid().inning(1).unwrap().pitcher.clone().unwrap();
        let before = lineup.player(&pitcher).unwrap().pitching.total;

        lineup
            .move_assignment(1, Slot::Field(Position::Pitcher), 1, Slot::Bench(0))
            .unwrap();

        assert_eq!(lineup.player(&pitcher).unwrap().pitching.total, before - 1);
        assert_eq!(lineup.grid().inning(1).unwrap().pitcher, None);
    }

    #[test]
    fn test_undo_then_redo_restores_exact_state() {
        let mut lineup = lineup(11, 11);
        let initial = lineup.snapshot();

        lineup
            .move_assignment(1, Slot::Field(Position::Catcher), 1, Slot::Bench(0))
            .unwrap();
        lineup.toggle_lock(3).unwrap();
        lineup
            .move_assignment(2, Slot::Field(Position::Shortstop), 2, Slot::Field(Position::LeftField))
            .unwrap();
        let final_state = lineup.snapshot();

        assert!(lineup.undo());
        assert!(lineup.undo());
        assert!(lineup.undo());
        assert_eq!(lineup.snapshot(), initial);
        assert!(!lineup.undo(), "history exhausted");

        assert!(lineup.redo());
        assert!(lineup.redo());
        assert!(lineup.redo());
        assert_eq!(lineup.snapshot(), final_state);
        assert!(!lineup.redo());
    }

    #[test]
    fn test_undo_recomputes_pitching_from_grid() {
        let mut lineup = lineup(11, 12);
        let pitcher = lineup.grid().inning(1).unwrap().pitcher.clone().unwrap();
        let before = lineup.player(&pitcher).unwrap().pitching;

        lineup
            .move_assignment(1, Slot::Field(Position::Pitcher), 1, Slot::Bench(0))
            .unwrap();
        assert!(lineup.undo());

        assert_eq!(lineup.player(&pitcher).unwrap().pitching, before);
        assert_eq!(lineup.grid().inning(1).unwrap().pitcher.as_ref(), Some(&pitcher));
    }

    #[test]
    fn test_new_mutation_after_undo_clears_redo() {
        let mut lineup = lineup(11, 13);
        lineup.toggle_lock(1).unwrap();
        assert!(lineup.undo());
        assert!(lineup.can_redo());
        lineup.toggle_lock(2).unwrap();
        assert!(!lineup.can_redo());
    }

    #[test]
    fn test_rebalance_preserves_prefix() {
        let mut lineup = lineup(11, 14);
        let before: Vec<_> = (1..=2).map(|i| lineup.grid().inning(i).unwrap().clone()).collect();

        lineup.rebalance_from(3).unwrap();

        for (index, inning) in (1..=2).enumerate() {
            assert_eq!(lineup.grid().inning(inning).unwrap(), &before[index]);
        }
    }

    #[test]
    fn test_rebalance_skips_locked_innings() {
        let mut lineup = lineup(11, 15);
        lineup.toggle_lock(4).unwrap();
        let locked_before = lineup.grid().inning(4).unwrap().clone();

        lineup.rebalance_from(2).unwrap();

        assert_eq!(lineup.grid().inning(4).unwrap(), &locked_before);
    }

    #[test]
    fn test_rebalance_inning_rejects_locked() {
        let mut lineup = lineup(11, 16);
        lineup.toggle_lock(5).unwrap();
        assert!(matches!(lineup.rebalance_inning(5), Err(LineupError::LockedInning(5))));
    }

    #[test]
    fn test_rebalance_keeps_pitcher_limits_globally() {
        let mut players = full_roster(10);
        for player in players.iter_mut().skip(5) {
            player.eligible.pitcher = false;
        }
        for seed in 0..10 {
            let mut lineup = Lineup::with_seed(players.clone(), GameConfig::default(), seed).unwrap();
            lineup.rebalance_from(4).unwrap();
            assert!(lineup.validation_errors().is_empty(), "seed {} broke limits", seed);
        }
    }

    #[test]
    fn test_set_batting_order_accepts_permutation_only() {
        let mut lineup = lineup(10, 17);
        let mut order: Vec<PlayerId> = lineup.batting_order().to_vec();
        order.reverse();
        lineup.set_batting_order(order.clone()).unwrap();
        assert_eq!(lineup.batting_order(), order.as_slice());

        let mut short = order.clone();
        short.pop();
        assert!(matches!(
            lineup.set_batting_order(short),
            Err(LineupError::InvalidBattingOrder(_))
        ));
        assert!(matches!(
            lineup.set_batting_order(vec!["nobody".to_string(); 10]),
            Err(LineupError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_from_snapshot_recomputes_pitching() {
        let lineup = lineup(11, 18);
        let snapshot = lineup.snapshot();
        let mut players = lineup.players().to_vec();
        // Corrupt the incoming counters; the rebuild must not trust them.
        for player in &mut players {
            player.pitching.total = 7;
            player.pitching.consecutive = 7;
        }

        let restored =
            Lineup::from_snapshot(players, lineup.config().clone(), snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
        for (original, rebuilt) in lineup.players().iter().zip(restored.players()) {
            assert_eq!(original.pitching, rebuilt.pitching);
        }
    }

    #[test]
    fn test_from_snapshot_rejects_unknown_ids() {
        let lineup = lineup(11, 19);
        let snapshot = lineup.snapshot();
        let players = full_roster(11); // fresh ids, none match the snapshot
        assert!(matches!(
            Lineup::from_snapshot(players, lineup.config().clone(), snapshot),
            Err(LineupError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_duplicate_roster_ids_rejected() {
        let mut players = full_roster(5);
        players[4].id = players[0].id.clone();
        assert!(matches!(
            Lineup::with_seed(players, GameConfig::default(), 0),
            Err(LineupError::InvalidRoster(_))
        ));
    }
}
