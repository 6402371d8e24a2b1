//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente: URL del backend,
//! timeouts y política de reintentos.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    /// Host desde el que se sirven los `/uploads/...`
    pub media_base_url: String,
    pub request_timeout: Duration,
    /// Timeout para `/cars`, que transporta imágenes base64 grandes
    pub large_request_timeout: Duration,
    /// Timeout del `GET /test`, que se hace una sola vez y sin reintentos
    pub connection_test_timeout: Duration,
    pub retry_max_attempts: u32,
    pub retry_base_delay: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }
}

impl EnvironmentConfig {
    /// Configuración por defecto apuntando a otra URL de API
    pub fn with_api_url(api_base_url: &str) -> Self {
        let api_base_url = api_base_url.trim_end_matches('/').to_string();
        Self {
            media_base_url: media_url_from_api(&api_base_url),
            api_base_url,
            request_timeout: Duration::from_secs(30),
            large_request_timeout: Duration::from_secs(90),
            connection_test_timeout: Duration::from_secs(10),
            retry_max_attempts: 3,
            retry_base_delay: Duration::from_millis(2000),
        }
    }

    /// Cargar configuración desde el entorno (y `.env` si existe)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = match env::var("STOREFRONT_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::with_api_url(url.trim()),
            _ => Self::default(),
        };

        let media_base_url = env::var("STOREFRONT_MEDIA_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.media_base_url);

        Ok(Self {
            api_base_url: defaults.api_base_url,
            media_base_url,
            request_timeout: Duration::from_secs(parse_var(
                "STOREFRONT_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            large_request_timeout: Duration::from_secs(parse_var(
                "STOREFRONT_LARGE_TIMEOUT_SECS",
                defaults.large_request_timeout.as_secs(),
            )?),
            connection_test_timeout: Duration::from_secs(parse_var(
                "STOREFRONT_TEST_TIMEOUT_SECS",
                defaults.connection_test_timeout.as_secs(),
            )?),
            retry_max_attempts: parse_var("STOREFRONT_RETRY_ATTEMPTS", defaults.retry_max_attempts)?,
            retry_base_delay: Duration::from_millis(parse_var(
                "STOREFRONT_RETRY_DELAY_MS",
                defaults.retry_base_delay.as_millis() as u64,
            )?),
        })
    }

    /// URL completa de un endpoint de la API
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// `http://host:5000/api` -> `http://host:5000`
fn media_url_from_api(api_base_url: &str) -> String {
    api_base_url
        .strip_suffix("/api")
        .unwrap_or(api_base_url)
        .to_string()
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| config_error(name, &format!("'{}' must be a valid number", raw))),
        _ => Ok(default),
    }
}
