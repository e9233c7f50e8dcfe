//! Rule-compliance scans over a completed (or mid-edit) assignment grid.
//!
//! Both scans are pure: they read the grid and never trust cached pitching
//! counters, so they are safe to call at any time, including on an
//! inconsistent grid mid-edit. Violations come back as a report, never as an
//! error path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{
    FieldingGrid, GameConfig, Player, PlayerId, Position, MAX_CONSECUTIVE_PITCHED,
    MAX_TOTAL_PITCHED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inning: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub player: Option<PlayerId>,
}

impl ValidationIssue {
    fn error(message: String) -> Self {
        Self { severity: Severity::Error, message, inning: None, position: None, player: None }
    }

    fn warning(message: String) -> Self {
        Self { severity: Severity::Warning, message, inning: None, position: None, player: None }
    }

    fn at(mut self, inning: u8, position: Option<Position>) -> Self {
        self.inning = Some(inning);
        self.position = position;
        self
    }

    fn about(mut self, player: &str) -> Self {
        self.player = Some(player.to_string());
        self
    }
}

fn display_name(players: &[Player], id: &str) -> String {
    players
        .iter()
        .find(|player| player.id == id)
        .map(|player| player.display_name())
        .unwrap_or_else(|| id.to_string())
}

/// Hard errors: duplicate assignment within an inning and pitcher-rule
/// violations (when enforcement is on). Pitcher usage is replayed from the
/// grid's pitcher cells, so manual edits that corrupted cached counters are
/// still caught.
pub fn validation_errors(
    players: &[Player],
    config: &GameConfig,
    grid: &FieldingGrid,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (inning, slots) in grid.iter() {
        let mut seen: HashMap<&str, Position> = HashMap::new();
        for (position, id) in slots.fielders() {
            if seen.insert(id.as_str(), position).is_some() {
                issues.push(
                    ValidationIssue::error(format!(
                        "{} assigned twice in inning {}",
                        display_name(players, id),
                        inning
                    ))
                    .at(inning, Some(position))
                    .about(id),
                );
            }
        }
        for id in &slots.bench {
            if seen.contains_key(id.as_str()) {
                issues.push(
                    ValidationIssue::error(format!(
                        "{} is benched and fielded in inning {}",
                        display_name(players, id),
                        inning
                    ))
                    .at(inning, None)
                    .about(id),
                );
            }
        }
    }

    if config.enforce_pitcher_rules {
        issues.extend(pitcher_rule_errors(players, grid));
    }

    issues
}

pub(crate) fn pitcher_rule_errors(players: &[Player], grid: &FieldingGrid) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut totals: HashMap<&str, u8> = HashMap::new();
    let mut streaks: HashMap<&str, (u8, u8)> = HashMap::new(); // id -> (last inning, streak)

    for (inning, slots) in grid.iter() {
        let Some(id) = slots.pitcher.as_deref() else { continue };

        let total = totals.entry(id).or_insert(0);
        *total += 1;
        if *total == MAX_TOTAL_PITCHED + 1 {
            issues.push(
                ValidationIssue::error(format!(
                    "{} pitches more than {} total innings",
                    display_name(players, id),
                    MAX_TOTAL_PITCHED
                ))
                .at(inning, Some(Position::Pitcher))
                .about(id),
            );
        }

        let streak = match streaks.get(id) {
            Some(&(last, streak)) if last + 1 == inning => streak + 1,
            _ => 1,
        };
        streaks.insert(id, (inning, streak));
        if streak == MAX_CONSECUTIVE_PITCHED + 1 {
            issues.push(
                ValidationIssue::error(format!(
                    "{} pitches {} consecutive innings",
                    display_name(players, id),
                    streak
                ))
                .at(inning, Some(Position::Pitcher))
                .about(id),
            );
        }
    }

    issues
}

/// Soft warnings: players without any field time while a minimum is
/// configured, and positions nobody could fill.
pub fn validation_warnings(
    players: &[Player],
    config: &GameConfig,
    grid: &FieldingGrid,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.min_field_innings > 0 {
        for player in players {
            if !player.active {
                continue;
            }
            let at_game =
                (1..=grid.innings()).any(|inning| player.is_available(inning));
            if at_game && grid.field_innings(&player.id) == 0 {
                issues.push(
                    ValidationIssue::warning(format!(
                        "{} has no fielding innings",
                        player.display_name()
                    ))
                    .about(&player.id),
                );
            }
        }
    }

    for (inning, slots) in grid.iter() {
        for position in slots.open_positions() {
            issues.push(
                ValidationIssue::warning(format!("No {} assigned in inning {}", position, inning))
                    .at(inning, Some(position)),
            );
        }
    }

    issues
}
