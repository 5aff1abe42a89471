//! User registration, login and the bearer-token gate

pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use repository::{PgUserStore, User, UserStore};
pub use service::{AuthError, AuthenticatedUser, Claims, UserAuthService};
