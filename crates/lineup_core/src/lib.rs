//! # lineup_core - Roster-to-Position Assignment Engine
//!
//! This library assigns a roster of players to fielding positions across a
//! fixed number of innings and produces an ordered batting sequence, under
//! eligibility, availability, and pitcher-usage constraints.
//!
//! ## Features
//! - Greedy per-inning assignment with fairness tie-breaking
//! - Pitcher usage tracking (max 2 consecutive / 3 total innings)
//! - Manual moves, suffix rebalancing, inning locks, undo/redo
//! - Validation report (hard errors + soft warnings) over any grid
//! - JSON API for easy integration with presentation layers
//!
//! Assignment is intentionally not a constraint solver: one greedy pass per
//! inning with random tie-breaks among equals. A seeded run
//! ([`Lineup::with_seed`]) is fully reproducible.

pub mod api;
pub mod error;
pub mod lineup;
pub mod models;

// Re-export the JSON API surface
pub use api::{generate_lineup_json, validate_lineup_json, LineupRequest, LineupResponse};

pub use error::{LineupError, Result};

// Re-export the engine types
pub use lineup::{recompute_pitching, Lineup, Severity, Snapshot, ValidationIssue};
pub use models::{
    Availability, Eligibility, FieldingGrid, GameConfig, InactivePolicy, InningSlots,
    PitchingRecord, Player, PlayerId, Position, Slot, DEFAULT_INNINGS, MAX_CONSECUTIVE_PITCHED,
    MAX_TOTAL_PITCHED,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
