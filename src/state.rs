//! Shared application state.

use sea_orm::DatabaseConnection;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::uploads::UploadStore;

/// State shared across handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub auth: AuthService,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let uploads = UploadStore::new(config.uploads_dir());
        let auth = AuthService::new(db.clone());
        Self {
            config,
            db,
            auth,
            uploads,
        }
    }
}
