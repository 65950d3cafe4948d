//! Directory service for SA:MP game servers.
//!
//! Servers are posted and looked up by address over `/servers/{address}`.
//! Every entry is validated before it is stored.

pub mod config;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod utils;
