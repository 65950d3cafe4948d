// src/utils.rs
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use governor::{RateLimiter, clock::DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use serde::Serialize;
use std::net::IpAddr;
use thiserror::Error;
use crate::models::errors::ValidationError;
use crate::storage::StoreError;

pub type IpRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to extract client IP")]
    MissingPeerIP,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("no address specified in request")]
    MissingAddress,

    #[error("invalid address")]
    InvalidAddress(Vec<ValidationError>),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid server")]
    InvalidRecord(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode server: {0}")]
    Encode(#[from] serde_json::Error),
}

/// JSON body for every error response, one message per violated rule.
#[derive(Debug, Serialize)]
pub struct ErrorList {
    pub errors: Vec<String>,
}

impl RequestError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidAddress(errors) | Self::InvalidRecord(errors) => {
                errors.iter().map(ToString::to_string).collect()
            }
            _ => vec![self.to_string()],
        }
    }
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPeerIP | Self::InvalidAddress(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::MissingAddress | Self::Store(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorList { errors: self.messages() })
    }
}

pub fn extract_peer_ip(req: &HttpRequest) -> Result<IpAddr, RequestError> {
    req.peer_addr()
        .map(|addr| addr.ip())
        .ok_or(RequestError::MissingPeerIP)
}

pub fn check_rate_limit(rate_limiter: &IpRateLimiter, req: &HttpRequest) -> Result<IpAddr, RequestError> {
    let peer_ip = extract_peer_ip(req)?;
    if rate_limiter.check_key(&peer_ip).is_err() {
        log::error!("Rate limit exceeded for {} from ip: {}", req.path(), peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }
    Ok(peer_ip)
}
