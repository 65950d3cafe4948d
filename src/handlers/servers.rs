// src/handlers/servers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error};
use crate::models::address::validate_address;
use crate::models::errors::ValidationError;
use crate::models::server::ServerRecord;
use crate::storage::ServerStore;
use crate::utils::{check_rate_limit, IpRateLimiter, RequestError};

/// Per-route limiters, registered as a single piece of app data.
pub struct ServerRateLimiters {
    pub get: IpRateLimiter,
    pub post: IpRateLimiter,
}

fn path_address(req: &HttpRequest) -> Result<String, RequestError> {
    match req.match_info().get("address") {
        Some(address) => Ok(address.to_string()),
        None => {
            error!("No address specified in request: {}", req.uri());
            Err(RequestError::MissingAddress)
        }
    }
}

fn json_response(record: &ServerRecord) -> Result<HttpResponse, RequestError> {
    let body = serde_json::to_string(record)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

pub async fn get_server(
    req: HttpRequest,
    storage: web::Data<dyn ServerStore>,
    rate_limiters: web::Data<ServerRateLimiters>,
) -> Result<HttpResponse, RequestError> {
    check_rate_limit(&rate_limiters.get, &req)?;

    let address = path_address(&req)?;
    debug!("Getting server {}", address);

    let errors = validate_address(&address);
    if !errors.is_empty() {
        error!("Rejected lookup of invalid address {}: {} problem(s)", address, errors.len());
        return Err(RequestError::InvalidAddress(errors));
    }

    let server = storage.get(&address).map_err(|e| {
        debug!("Lookup of {} failed: {}", address, e);
        e
    })?;

    json_response(&server)
}

pub async fn post_server(
    req: HttpRequest,
    storage: web::Data<dyn ServerStore>,
    rate_limiters: web::Data<ServerRateLimiters>,
    bytes: web::Bytes,
) -> Result<HttpResponse, RequestError> {
    check_rate_limit(&rate_limiters.post, &req)?;

    let address = path_address(&req)?;
    debug!("Posting server {} with {} bytes", address, bytes.len());

    let server: ServerRecord = match serde_json::from_slice(&bytes) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to decode server {}: {}", address, e);
            return Err(RequestError::InvalidBody(e.to_string()));
        }
    };

    let mut errors = server.validate();
    if server.address != address {
        errors.push(ValidationError::AddressMismatch {
            path: address.clone(),
            body: server.address.clone(),
        });
    }
    if !errors.is_empty() {
        error!("Rejected server {}: {} problem(s)", address, errors.len());
        return Err(RequestError::InvalidRecord(errors));
    }

    if let Err(e) = storage.upsert(server.clone()) {
        error!("Failed to store server {}: {}", address, e);
        return Err(e.into());
    }

    debug!("Stored server {}", address);
    json_response(&server)
}
