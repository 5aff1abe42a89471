//! Zenestreaming - music and podcast catalog API
//!
//! Anyone can browse the catalog. Adding, changing and removing tracks needs a
//! bearer token obtained from `/login`.
//!
//! # Modules
//!
//! - [`catalog`] - Tracks, genres, input validation and the track store
//! - [`user_auth`] - Registration, login, token issue and the write gate
//! - [`gateway`] - HTTP routes, error mapping and OpenAPI docs
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing subscriber with rolling file output

pub mod catalog;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod user_auth;

pub use catalog::{CatalogService, Genre, Track};
pub use config::AppConfig;
pub use db::Database;
pub use gateway::{build_router, run_server};
pub use user_auth::UserAuthService;
