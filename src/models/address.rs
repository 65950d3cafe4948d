// src/models/address.rs
use std::borrow::Cow;

use url::{ParseError, Url};

use crate::models::errors::ValidationError;

/// Scheme assumed when an address is given as a bare `host[:port]`.
pub const SCHEME: &str = "samp";

/// Lowest port a listed server may use. Everything below is reserved.
pub const MIN_PORT: u16 = 1024;

/// Highest port a listed server may use. Everything above is ephemeral.
pub const MAX_PORT: u16 = 49152;

/// Validates a server address of the form `[samp://]host[:port]`.
///
/// Returns every problem found; an empty list means the address is valid.
/// An unparseable address or port ends the checks early since nothing after
/// it can be inspected meaningfully.
pub fn validate_address(raw: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if raw.is_empty() {
        errors.push(ValidationError::EmptyAddress);
    }

    // The synthesized scheme is only used for parsing, never stored.
    let uri: Cow<'_, str> = if raw.contains("://") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("{}://{}", SCHEME, raw))
    };

    let url = match Url::parse(&uri) {
        Ok(url) => url,
        Err(ParseError::InvalidPort) => {
            let port = explicit_port(&uri).unwrap_or_default();
            errors.push(ValidationError::InvalidPort(port.to_string()));
            return errors;
        }
        Err(e) => {
            errors.push(ValidationError::MalformedAddress(e));
            return errors;
        }
    };

    // An empty user-info (`@host`) leaves username and password blank.
    if !url.username().is_empty() || url.password().is_some() || authority(&uri).contains('@') {
        errors.push(ValidationError::Credentials);
    }

    if !url.scheme().is_empty() && url.scheme() != SCHEME {
        errors.push(ValidationError::InvalidScheme(url.scheme().to_string()));
    }

    // Special schemes (http, ws, ...) drop their default port while parsing,
    // so fall back to the text the caller actually wrote.
    let port = match url.port() {
        Some(port) => Some(port),
        None => match explicit_port(&uri) {
            Some(text) => match text.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    errors.push(ValidationError::InvalidPort(text.to_string()));
                    return errors;
                }
            },
            None => None,
        },
    };

    if let Some(port) = port {
        if !(MIN_PORT..=MAX_PORT).contains(&port) {
            errors.push(ValidationError::ReservedPort(port));
        }
    }

    errors
}

/// Returns the `[userinfo@]host[:port]` part of a URI.
fn authority(uri: &str) -> &str {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Returns the port text written after the host, if there is one.
fn explicit_port(uri: &str) -> Option<&str> {
    let authority = authority(uri);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host_port)| host_port);

    // Everything after the host belongs to the port, extra colons included.
    let port = match host_port.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']')?.1.strip_prefix(':')?,
        None => host_port.split_once(':')?.1,
    };

    Some(port).filter(|port| !port.is_empty())
}
