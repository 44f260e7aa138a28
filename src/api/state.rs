use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, services::provider::MetadataProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn MetadataProvider>,
    pub db: PgPool,
}

impl AppState {
    pub fn new(config: Arc<Config>, provider: Arc<dyn MetadataProvider>, db: PgPool) -> Self {
        Self {
            config,
            provider,
            db,
        }
    }
}
