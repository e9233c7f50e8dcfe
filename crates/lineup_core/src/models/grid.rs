//! The fielding grid: one set of position slots plus a bench per inning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::player::{PlayerId, Position};
use crate::error::{LineupError, Result};

/// One inning's assignments. Field cells hold at most one player id; the
/// bench is an ordered list. An empty cell is a valid terminal state (no
/// eligible candidate), not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InningSlots {
    #[serde(rename = "P", default)]
    pub pitcher: Option<PlayerId>,
    #[serde(rename = "C", default)]
    pub catcher: Option<PlayerId>,
    #[serde(rename = "1B", default)]
    pub first_base: Option<PlayerId>,
    #[serde(rename = "2B", default)]
    pub second_base: Option<PlayerId>,
    #[serde(rename = "3B", default)]
    pub third_base: Option<PlayerId>,
    #[serde(rename = "SS", default)]
    pub shortstop: Option<PlayerId>,
    #[serde(rename = "LF", default)]
    pub left_field: Option<PlayerId>,
    #[serde(rename = "CF", default)]
    pub center_field: Option<PlayerId>,
    #[serde(rename = "RF", default)]
    pub right_field: Option<PlayerId>,
    #[serde(rename = "Bench", default)]
    pub bench: Vec<PlayerId>,
}

impl InningSlots {
    pub fn fielder(&self, position: Position) -> Option<&PlayerId> {
        self.cell(position).as_ref()
    }

    /// Replaces a field cell, returning the previous occupant.
    pub fn set_fielder(&mut self, position: Position, id: Option<PlayerId>) -> Option<PlayerId> {
        std::mem::replace(self.cell_mut(position), id)
    }

    fn cell(&self, position: Position) -> &Option<PlayerId> {
        match position {
            Position::Pitcher => &self.pitcher,
            Position::Catcher => &self.catcher,
            Position::FirstBase => &self.first_base,
            Position::SecondBase => &self.second_base,
            Position::ThirdBase => &self.third_base,
            Position::Shortstop => &self.shortstop,
            Position::LeftField => &self.left_field,
            Position::CenterField => &self.center_field,
            Position::RightField => &self.right_field,
        }
    }

    fn cell_mut(&mut self, position: Position) -> &mut Option<PlayerId> {
        match position {
            Position::Pitcher => &mut self.pitcher,
            Position::Catcher => &mut self.catcher,
            Position::FirstBase => &mut self.first_base,
            Position::SecondBase => &mut self.second_base,
            Position::ThirdBase => &mut self.third_base,
            Position::Shortstop => &mut self.shortstop,
            Position::LeftField => &mut self.left_field,
            Position::CenterField => &mut self.center_field,
            Position::RightField => &mut self.right_field,
        }
    }

    /// Filled field cells in fill order.
    pub fn fielders(&self) -> impl Iterator<Item = (Position, &PlayerId)> {
        Position::FIELD
            .into_iter()
            .filter_map(move |position| self.fielder(position).map(|id| (position, id)))
    }

    pub fn open_positions(&self) -> Vec<Position> {
        Position::FIELD
            .into_iter()
            .filter(|&position| self.fielder(position).is_none())
            .collect()
    }

    /// True when the player is fielded in this inning.
    pub fn is_fielded(&self, id: &str) -> bool {
        self.fielders().any(|(_, fielder)| fielder == id)
    }

    pub fn fielded_position(&self, id: &str) -> Option<Position> {
        self.fielders().find(|(_, fielder)| *fielder == id).map(|(position, _)| position)
    }

    pub fn remove_from_bench(&mut self, id: &str) -> bool {
        match self.bench.iter().position(|b| b == id) {
            Some(index) => {
                self.bench.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        *self = InningSlots::default();
    }
}

/// Addresses one cell of one inning for move operations. A bench index
/// points into the inning's ordered bench list; bench insertions clamp the
/// index to the list length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(Position),
    Bench(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Slot::Field(position) => write!(f, "{}", position.code()),
            Slot::Bench(index) => write!(f, "Bench[{}]", index),
        }
    }
}

impl FromStr for Slot {
    type Err = LineupError;

    /// Parses a position code, `Bench`, or `Bench[i]`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(rest) = trimmed.strip_prefix("Bench") {
            let index = match rest.trim() {
                "" => 0,
                indexed => indexed
                    .strip_prefix('[')
                    .and_then(|inner| inner.strip_suffix(']'))
                    .and_then(|inner| inner.parse::<usize>().ok())
                    .ok_or_else(|| LineupError::UnknownPosition(s.to_string()))?,
            };
            return Ok(Slot::Bench(index));
        }
        trimmed.parse::<Position>().map(Slot::Field)
    }
}

/// Inning-indexed assignment grid. Innings are 1-based everywhere in the
/// public surface; an out-of-range inning is a structural caller error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldingGrid {
    innings: Vec<InningSlots>,
}

impl FieldingGrid {
    pub fn new(innings: u8) -> Self {
        Self { innings: vec![InningSlots::default(); innings as usize] }
    }

    pub fn innings(&self) -> u8 {
        self.innings.len() as u8
    }

    pub fn inning(&self, inning: u8) -> Result<&InningSlots> {
        self.check(inning)?;
        Ok(&self.innings[inning as usize - 1])
    }

    pub fn inning_mut(&mut self, inning: u8) -> Result<&mut InningSlots> {
        self.check(inning)?;
        Ok(&mut self.innings[inning as usize - 1])
    }

    fn check(&self, inning: u8) -> Result<()> {
        if inning == 0 || inning as usize > self.innings.len() {
            return Err(LineupError::InvalidInning { inning, innings: self.innings() });
        }
        Ok(())
    }

    /// Iterates `(inning, slots)` pairs in inning order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &InningSlots)> {
        self.innings.iter().enumerate().map(|(index, slots)| (index as u8 + 1, slots))
    }

    /// How many innings the player currently holds the given position.
    /// Counts the whole assigned grid, completed or not; the selection
    /// heuristics lean on this to spread positions across the roster.
    pub fn position_count(&self, id: &str, position: Position) -> usize {
        self.innings
            .iter()
            .filter(|slots| slots.fielder(position).map(|f| f == id).unwrap_or(false))
            .count()
    }

    /// Total field innings (any position) for the player.
    pub fn field_innings(&self, id: &str) -> usize {
        self.innings.iter().filter(|slots| slots.is_fielded(id)).count()
    }
}
