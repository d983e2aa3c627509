//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. `.env` se carga en
//! `main` con dotenvy; aquí solo se leen y validan las variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::utils::api_error::Locale;

/// Errores al leer la configuración
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected} (got '{value}')")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub fleet_api_url: String,
    pub fleet_api_timeout: Duration,
    pub log_level: tracing::Level,
    pub default_locale: Locale,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            fleet_api_url: "http://localhost:8080/api".to_string(),
            fleet_api_timeout: Duration::from_secs(30),
            log_level: tracing::Level::DEBUG,
            default_locale: Locale::Es,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Leer la configuración desde cualquier fuente clave → valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = get("ENVIRONMENT").unwrap_or(defaults.environment);

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => defaults.port,
        };

        let fleet_api_timeout = match get("FLEET_API_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "FLEET_API_TIMEOUT_SECS",
                    expected: "positive number of seconds",
                    value,
                })?,
            None => defaults.fleet_api_timeout,
        };

        let log_level = match get("LOG_LEVEL") {
            Some(value) => value.parse::<tracing::Level>().map_err(|_| ConfigError::Invalid {
                name: "LOG_LEVEL",
                expected: "log level (trace, debug, info, warn, error)",
                value,
            })?,
            None if environment == "production" => tracing::Level::INFO,
            None => tracing::Level::DEBUG,
        };

        let default_locale = match get("DEFAULT_LOCALE") {
            Some(value) => Locale::from_str(&value).ok_or(ConfigError::Invalid {
                name: "DEFAULT_LOCALE",
                expected: "locale (es, en)",
                value,
            })?,
            None => defaults.default_locale,
        };

        Ok(Self {
            environment,
            port,
            host: get("HOST").unwrap_or(defaults.host),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            fleet_api_url: get("FLEET_API_URL").unwrap_or(defaults.fleet_api_url),
            fleet_api_timeout,
            log_level,
            default_locale,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
