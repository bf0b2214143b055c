//! Shared application state handed to every handler.

use crate::{
    auth::{AuthGate, Caller, TokenGate, require_admin},
    config::site::AppConfig,
    core::{
        contact::{ContactTransport, LogContactTransport},
        settings::DEFAULT_SITE_SETTINGS,
    },
    entities::site_settings,
    errors::Result,
    storage::LocalBlobStore,
};
use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Collaborators and configuration shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    /// Served whenever the settings row is missing or unreadable
    pub fallback_settings: Arc<site_settings::Model>,
    pub auth: Arc<dyn AuthGate>,
    pub blobs: LocalBlobStore,
    pub contact: Arc<dyn ContactTransport>,
}

impl AppState {
    /// State with the shipped collaborators: token auth, local uploads and a logging
    /// contact transport.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let auth = Arc::new(TokenGate::new(config.admin_tokens.clone()));
        let blobs = LocalBlobStore::new(config.upload_dir.clone(), config.public_upload_base.clone());
        Self {
            db,
            config: Arc::new(config),
            fallback_settings: Arc::new(DEFAULT_SITE_SETTINGS.to_model()),
            auth,
            blobs,
            contact: Arc::new(LogContactTransport),
        }
    }

    #[must_use]
    pub fn with_contact_transport(mut self, transport: Arc<dyn ContactTransport>) -> Self {
        self.contact = transport;
        self
    }

    pub fn caller(&self, headers: &HeaderMap) -> Caller {
        self.auth.current_caller(headers)
    }

    /// `Ok` only for admin callers.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<()> {
        require_admin(&self.caller(headers))
    }
}
