//! Roster model: positions, eligibility, availability, and the per-player
//! pitching usage tracker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::config::DEFAULT_INNINGS;
use crate::error::LineupError;

/// Pitcher usage limits. Fixed league policy, not configuration: the
/// `enforce_pitcher_rules` toggle decides whether the limits are consulted,
/// never what they are.
pub const MAX_CONSECUTIVE_PITCHED: u8 = 2;
pub const MAX_TOTAL_PITCHED: u8 = 3;

pub type PlayerId = String;

/// The nine field positions, in fill/display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    /// All field positions, in the order the assignment pass fills them.
    pub const FIELD: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Canonical scorecard code (e.g. "1B", "SS").
    pub fn code(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }

    pub fn is_infield(&self) -> bool {
        matches!(
            self,
            Position::FirstBase | Position::SecondBase | Position::ThirdBase | Position::Shortstop
        )
    }

    pub fn is_outfield(&self) -> bool {
        matches!(
            self,
            Position::LeftField | Position::CenterField | Position::RightField
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Position {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" => Ok(Position::Pitcher),
            "C" => Ok(Position::Catcher),
            "1B" => Ok(Position::FirstBase),
            "2B" => Ok(Position::SecondBase),
            "3B" => Ok(Position::ThirdBase),
            "SS" => Ok(Position::Shortstop),
            "LF" => Ok(Position::LeftField),
            "CF" => Ok(Position::CenterField),
            "RF" => Ok(Position::RightField),
            _ => Err(LineupError::UnknownPosition(s.to_string())),
        }
    }
}

/// Static per-position eligibility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    #[serde(rename = "P", default)]
    pub pitcher: bool,
    #[serde(rename = "C", default)]
    pub catcher: bool,
    #[serde(rename = "1B", default)]
    pub first_base: bool,
    #[serde(rename = "2B", default)]
    pub second_base: bool,
    #[serde(rename = "3B", default)]
    pub third_base: bool,
    #[serde(rename = "SS", default)]
    pub shortstop: bool,
    #[serde(rename = "LF", default)]
    pub left_field: bool,
    #[serde(rename = "CF", default)]
    pub center_field: bool,
    #[serde(rename = "RF", default)]
    pub right_field: bool,
}

impl Eligibility {
    /// Eligible everywhere.
    pub fn all() -> Self {
        Self::positions(&Position::FIELD)
    }

    pub fn positions(positions: &[Position]) -> Self {
        let mut eligible = Eligibility::default();
        for &position in positions {
            eligible.set(position, true);
        }
        eligible
    }

    pub fn allows(&self, position: Position) -> bool {
        match position {
            Position::Pitcher => self.pitcher,
            Position::Catcher => self.catcher,
            Position::FirstBase => self.first_base,
            Position::SecondBase => self.second_base,
            Position::ThirdBase => self.third_base,
            Position::Shortstop => self.shortstop,
            Position::LeftField => self.left_field,
            Position::CenterField => self.center_field,
            Position::RightField => self.right_field,
        }
    }

    pub fn set(&mut self, position: Position, value: bool) {
        match position {
            Position::Pitcher => self.pitcher = value,
            Position::Catcher => self.catcher = value,
            Position::FirstBase => self.first_base = value,
            Position::SecondBase => self.second_base = value,
            Position::ThirdBase => self.third_base = value,
            Position::Shortstop => self.shortstop = value,
            Position::LeftField => self.left_field = value,
            Position::CenterField => self.center_field = value,
            Position::RightField => self.right_field = value,
        }
    }

    pub fn any(&self) -> bool {
        Position::FIELD.iter().any(|&p| self.allows(p))
    }
}

/// Inclusive inning window in which a player is at the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub start_inning: u8,
    pub end_inning: u8,
}

impl Default for Availability {
    fn default() -> Self {
        Self { start_inning: 1, end_inning: DEFAULT_INNINGS }
    }
}

impl Availability {
    pub fn new(start_inning: u8, end_inning: u8) -> Self {
        Self { start_inning, end_inning }
    }

    pub fn contains(&self, inning: u8) -> bool {
        inning >= self.start_inning && inning <= self.end_inning
    }
}

/// Cumulative pitching usage. Derived from the fielding grid; any
/// non-monotonic grid change must go through a full recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingRecord {
    pub total: u8,
    pub consecutive: u8,
    pub last_inning: Option<u8>,
}

fn default_active() -> bool {
    true
}

fn generated_id() -> PlayerId {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable unique id; generated when the incoming record omits one.
    #[serde(default = "generated_id")]
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number: Option<u8>,
    pub eligible: Eligibility,
    #[serde(default)]
    pub availability: Availability,
    /// Roster-editor flag. An inactive player is never fielded; whether they
    /// still show up on the bench is a `GameConfig::inactive_policy` choice.
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub pitching: PitchingRecord,
}

impl Player {
    pub fn new(first_name: &str, last_name: &str, number: Option<u8>, eligible: Eligibility) -> Self {
        Self {
            id: generated_id(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            number,
            eligible,
            availability: Availability::default(),
            active: true,
            pitching: PitchingRecord::default(),
        }
    }

    pub fn with_availability(mut self, start_inning: u8, end_inning: u8) -> Self {
        self.availability = Availability::new(start_inning, end_inning);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn display_name(&self) -> String {
        match self.number {
            Some(number) => format!("#{} {}", number, self.full_name()),
            None => self.full_name(),
        }
    }

    /// Availability window test only; independent of `active`. The inactive
    /// flag enters through `can_play` and the bench policy, never here.
    pub fn is_available(&self, inning: u8) -> bool {
        self.availability.contains(inning)
    }

    /// The single assignability predicate every assignment path consults.
    pub fn can_play(&self, inning: u8) -> bool {
        self.active && self.is_available(inning)
    }

    pub fn can_pitch(&self, inning: u8) -> bool {
        self.eligible.pitcher
            && self.can_play(inning)
            && self.pitching.consecutive < MAX_CONSECUTIVE_PITCHED
            && self.pitching.total < MAX_TOTAL_PITCHED
    }

    /// Records one pitched inning. Refuses (returns false) when the player
    /// cannot legally pitch that inning.
    pub fn assign_pitch(&mut self, inning: u8) -> bool {
        if !self.can_pitch(inning) {
            return false;
        }
        self.record_pitch(inning);
        true
    }

    /// Tracker bookkeeping without the eligibility gate. Used when replaying
    /// a grid, where the grid is the source of truth whatever it contains.
    pub(crate) fn record_pitch(&mut self, inning: u8) {
        if self.pitching.last_inning == Some(inning.wrapping_sub(1)) {
            self.pitching.consecutive += 1;
        } else {
            self.pitching.consecutive = 1;
        }
        self.pitching.total += 1;
        self.pitching.last_inning = Some(inning);
    }

    /// Reverses the most recent `assign_pitch`. Only acts when `inning` is
    /// the last inning pitched. The consecutive count cannot be restored from
    /// a single removal; callers needing it accurate must run a full
    /// recompute over the grid.
    pub fn remove_pitch(&mut self, inning: u8) {
        if self.pitching.last_inning == Some(inning) {
            self.pitching.total = self.pitching.total.saturating_sub(1);
            self.pitching.last_inning = None;
            self.pitching.consecutive = 0;
        }
    }

    pub(crate) fn reset_pitching(&mut self) {
        self.pitching = PitchingRecord::default();
    }
}
