//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified acknowledgement/error wrapper
//! - [`ResourceId`]: id payload for write acknowledgements
//! - [`error_codes`]: numeric codes carried in error bodies

pub mod response;

pub use response::{ApiResponse, ResourceId, error_codes};
