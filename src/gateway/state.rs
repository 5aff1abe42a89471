use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::user_auth::UserAuthService;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Music catalog
    pub catalog: Arc<CatalogService>,
    /// Registration, login and token verification
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>, user_auth: Arc<UserAuthService>) -> Self {
        Self { catalog, user_auth }
    }
}
