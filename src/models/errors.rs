// src/models/errors.rs
use thiserror::Error;

/// A single violated rule found while validating an address or a record.
///
/// Validators collect these into a list instead of stopping at the first
/// problem, so callers can report everything that is wrong in one response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("address could not be parsed: {0}")]
    MalformedAddress(url::ParseError),

    #[error("address contains a user:password component")]
    Credentials,

    #[error("address contains invalid scheme '{0}', must be either empty or 'samp://'")]
    InvalidScheme(String),

    #[error("invalid port '{0}' specified")]
    InvalidPort(String),

    #[error("port {0} falls within reserved or ephemeral range")]
    ReservedPort(u16),

    #[error("hostname is empty")]
    EmptyHostname,

    #[error("maxplayers is empty")]
    EmptyMaxPlayers,

    #[error("maxplayers must be positive, got {0}")]
    NegativeMaxPlayers(i32),

    #[error("gamemode is empty")]
    EmptyGameMode,

    #[error("address '{body}' does not match requested address '{path}'")]
    AddressMismatch { path: String, body: String },
}
