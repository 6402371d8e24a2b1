//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente
//! y su clasificación (qué se reintenta y qué no).

use reqwest::StatusCode;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// No se pudo establecer la conexión con el backend (único caso reintentable)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    /// El token recibido del backend no es un JWT legible
    #[error("Token error: {0}")]
    Token(String),
}

impl AppError {
    /// Clasifica un error de reqwest: conexión, timeout o genérico
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            AppError::Network(err.to_string())
        } else if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else {
            AppError::Http(err)
        }
    }

    /// Construye el error correspondiente a una respuesta no exitosa del backend
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Api { status, message },
        }
    }

    /// Solo los fallos de red (backend inalcanzable) se reintentan.
    /// Los códigos HTTP de error nunca.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(_))
    }

    /// Código estable para mostrar/registrar sin depender del texto
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Api { .. } => "API_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Token(_) => "TOKEN_ERROR",
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, reason: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(AppError::Network("connection refused".to_string()).is_retryable());
        assert!(!AppError::Timeout("90s".to_string()).is_retryable());
        assert!(!AppError::NotFound("car".to_string()).is_retryable());
        assert!(!AppError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        }
        .is_retryable());
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            AppError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::FORBIDDEN, "x".into()),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::NOT_FOUND, "x".into()),
            AppError::NotFound(_)
        ));
        let err = AppError::from_status(StatusCode::BAD_REQUEST, "Campo brand é obrigatório".into());
        assert_eq!(err.code(), "API_ERROR");
        assert!(err.to_string().contains("Campo brand"));
    }

    #[test]
    fn test_helpers() {
        assert!(config_error("STOREFRONT_TIMEOUT_SECS", "not a number")
            .to_string()
            .contains("STOREFRONT_TIMEOUT_SECS"));
    }
}
