//! Music catalog
//!
//! Tracks (songs and podcast episodes) stored in the PostgreSQL `music` table.

pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use models::{Genre, NewTrack, Track, TrackPatch, TrackRequest};
pub use repository::{PgTrackStore, TrackStore};
pub use service::{CatalogError, CatalogService, NEW_EPISODES_LIMIT};
pub use validation::TrackValidationError;
