//! Shared application state
//!
//! Este módulo define el estado compartido que se pasa a través del
//! router de Axum.

use std::sync::Arc;

use crate::client::FleetBackend;
use crate::config::environment::EnvironmentConfig;
use crate::utils::api_error::Locale;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub backend: Arc<dyn FleetBackend>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, backend: Arc<dyn FleetBackend>) -> Self {
        Self { config, backend }
    }

    /// Idioma de los mensajes de error del gateway
    pub fn locale(&self) -> Locale {
        self.config.default_locale
    }

    /// Backend que reenvía el token del usuario
    pub fn backend_for(&self, token: Option<String>) -> Arc<dyn FleetBackend> {
        match token {
            Some(token) => self.backend.with_token(Some(token)),
            None => self.backend.clone(),
        }
    }
}
