pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod prediction;

use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, HttpResponse};
use tracing::info;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{CredentialStore, Session, SessionController};
pub use db::{DbOperations, MemoryStore, PredictionRecord, ResultRepository, User, UserRepository};
pub use prediction::{Disease, FormDispatcher, ModelRegistry};

use crate::config::StoreBackend;

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every HTTP route of the service.
pub fn routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::handlers as auth_api;
    use crate::prediction::handlers as prediction_api;

    // Malformed bodies get the same error envelope as every other failure.
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .route("/health", web::get().to(health_check))
        .route("/auth/register", web::post().to(auth_api::register))
        .route("/auth/login", web::post().to(auth_api::login))
        .route("/auth/logout", web::post().to(auth_api::logout))
        .route("/auth/session", web::get().to(auth_api::session))
        .route("/menu", web::get().to(prediction_api::menu))
        .route("/home", web::get().to(prediction_api::home))
        .route("/diseases", web::get().to(prediction_api::list_forms))
        .route("/diseases/{disease}", web::get().to(prediction_api::form))
        .route("/diseases/{disease}/predict", web::post().to(prediction_api::predict))
        .route("/results", web::get().to(prediction_api::results));
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub credentials: Arc<CredentialStore>,
    pub results: Arc<dyn ResultRepository>,
    pub sessions: Arc<SessionController>,
    pub dispatcher: Arc<FormDispatcher>,
    db: Option<DbOperations>,
}

impl AppState {
    /// Connects the configured store and loads all models. A model that
    /// fails to load is returned as an error and the server must not start.
    pub async fn new(config: Settings) -> Result<Self> {
        let registry = ModelRegistry::load(&config.models.dir)?;
        info!("Loaded {} models from {}", registry.len(), config.models.dir);

        match config.database.backend {
            StoreBackend::Postgres => {
                let db = DbOperations::new_with_options(
                    &config.database.url,
                    config.database.max_connections,
                    Duration::from_secs(config.database.acquire_timeout_secs),
                )
                .await?;
                db.migrate().await?;

                let store = Arc::new(db.clone());
                let mut state = Self::from_parts(config, store.clone(), store, registry);
                state.db = Some(db);
                Ok(state)
            }
            StoreBackend::Memory => {
                info!("Using in-memory stores; accounts and results are lost on exit");
                let store = Arc::new(MemoryStore::new());
                Ok(Self::from_parts(config, store.clone(), store, registry))
            }
        }
    }

    pub fn from_parts(
        config: Settings,
        users: Arc<dyn UserRepository>,
        results: Arc<dyn ResultRepository>,
        registry: ModelRegistry,
    ) -> Self {
        let sessions = SessionController::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_expiry_hours,
        );
        let dispatcher = FormDispatcher::new(Arc::new(registry), results.clone());

        Self {
            config: Arc::new(config),
            credentials: Arc::new(CredentialStore::new(users)),
            results,
            sessions: Arc::new(sessions),
            dispatcher: Arc::new(dispatcher),
            db: None,
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        if let Some(db) = &self.db {
            db.close().await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn bundled_models() -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("models")
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn test_app_state_with_memory_backend() {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.models.dir = bundled_models();

        let state = AppState::new(config).await.expect("state");
        assert_eq!(state.dispatcher.registry().len(), 5);
        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_models_prevent_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.models.dir = dir.path().to_string_lossy().into_owned();

        let state = AppState::new(config).await;
        assert!(matches!(state, Err(AppError::ModelError(_))));
    }

    #[tokio::test]
    async fn test_app_state_clone() {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.models.dir = bundled_models();

        let state = AppState::new(config).await.expect("state");
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.sessions, &cloned.sessions));
        assert!(Arc::ptr_eq(&state.dispatcher, &cloned.dispatcher));
    }
}
