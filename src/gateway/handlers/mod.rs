//! Gateway HTTP handlers

pub mod health;
pub mod music;

pub use health::{HealthResponse, health_check};
pub use music::{create_track, delete_track, get_track, list_tracks, new_episodes, root, update_track};
