// src/models/server.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::address::validate_address;
use crate::models::errors::ValidationError;

/// The advertised state of one SA:MP server.
///
/// Wire keys are kept short to cut down on traffic from server browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "hn")]
    pub hostname: String,
    #[serde(rename = "pc")]
    pub player_count: u32,
    #[serde(rename = "pm")]
    pub max_players: i32,
    #[serde(rename = "gm")]
    pub game_mode: String,
    #[serde(rename = "la", default)]
    pub language: String,
    #[serde(rename = "pa", default)]
    pub password_protected: bool,
    #[serde(rename = "ru", default)]
    pub rules: HashMap<String, String>,
    #[serde(rename = "pl", default)]
    pub player_list: Vec<String>,
}

impl ServerRecord {
    /// Checks every required field and returns all violations at once.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = validate_address(&self.address);

        if self.hostname.is_empty() {
            errors.push(ValidationError::EmptyHostname);
        }

        if self.max_players == 0 {
            errors.push(ValidationError::EmptyMaxPlayers);
        } else if self.max_players < 0 {
            errors.push(ValidationError::NegativeMaxPlayers(self.max_players));
        }

        if self.game_mode.is_empty() {
            errors.push(ValidationError::EmptyGameMode);
        }

        errors
    }
}
