pub mod config;
pub mod grid;
pub mod player;

pub use config::{GameConfig, InactivePolicy, DEFAULT_INNINGS};
pub use grid::{FieldingGrid, InningSlots, Slot};
pub use player::{
    Availability, Eligibility, PitchingRecord, Player, PlayerId, Position,
    MAX_CONSECUTIVE_PITCHED, MAX_TOTAL_PITCHED,
};
