//! JSON API for lineup generation and validation.
//!
//! String-in/string-out entry points for presentation layers that speak
//! JSON. The engine types serialize directly; these wrappers only add
//! schema-version checking and logging.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LineupError, Result};
use crate::lineup::{Lineup, ValidationIssue};
use crate::models::{FieldingGrid, GameConfig, Player, PlayerId};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct LineupRequest {
    pub schema_version: u8,
    /// Fixed tie-break seed; omit for an entropy-seeded run.
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub config: Option<GameConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupResponse {
    pub schema_version: u8,
    pub batting_order: Vec<PlayerId>,
    pub fielding: FieldingGrid,
    pub locked_innings: Vec<u8>,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub schema_version: u8,
    pub players: Vec<Player>,
    #[serde(default)]
    pub config: Option<GameConfig>,
    pub fielding: FieldingGrid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub schema_version: u8,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

fn check_schema_version(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(LineupError::SchemaVersionMismatch { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Generates a complete lineup from a roster and configuration.
pub fn generate_lineup_json(request_json: &str) -> Result<String> {
    let request: LineupRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;
    info!("Generating lineup for {} players", request.players.len());

    let config = request.config.unwrap_or_default();
    let lineup = match request.seed {
        Some(seed) => Lineup::with_seed(request.players, config, seed),
        None => Lineup::new(request.players, config),
    };
    let lineup = match lineup {
        Ok(lineup) => lineup,
        Err(error) => {
            warn!("Lineup generation refused: {}", error);
            return Err(error);
        }
    };

    let response = LineupResponse {
        schema_version: SCHEMA_VERSION,
        batting_order: lineup.batting_order().to_vec(),
        fielding: lineup.grid().clone(),
        locked_innings: lineup.locked_innings().iter().copied().collect(),
        errors: lineup.validation_errors(),
        warnings: lineup.validation_warnings(),
    };
    Ok(serde_json::to_string(&response)?)
}

/// Validates an externally edited grid against the rules.
pub fn validate_lineup_json(request_json: &str) -> Result<String> {
    let request: ValidateRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let config = request.config.unwrap_or_default();
    let errors =
        crate::lineup::validate::validation_errors(&request.players, &config, &request.fielding);
    let warnings =
        crate::lineup::validate::validation_warnings(&request.players, &config, &request.fielding);
    info!("Validated grid: {} errors, {} warnings", errors.len(), warnings.len());

    let response = ValidateResponse { schema_version: SCHEMA_VERSION, errors, warnings };
    Ok(serde_json::to_string(&response)?)
}
