pub mod lineup_json;

pub use lineup_json::{
    generate_lineup_json, validate_lineup_json, LineupRequest, LineupResponse, ValidateRequest,
    ValidateResponse,
};
