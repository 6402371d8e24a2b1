use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserInfo;

/// Claims del JWT emitido por el backend (solo se leen, no se verifican)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default)]
    pub sub: Option<String>, // user_id
    #[serde(default)]
    pub exp: Option<i64>, // expiration timestamp
    #[serde(default)]
    pub iat: Option<i64>, // issued at timestamp
}

/// Request de login (cliente y administrador usan el mismo cuerpo)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request de registro de cliente
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[serde(rename = "confirmPassword")]
    #[validate(must_match = "password")]
    pub confirm_password: String,
}

/// Response de login/registro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub access_token: String,
    pub user: UserInfo,
}

/// Sesión activa del cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
    /// `None` si el token no trae `exp` legible
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| Utc::now() >= expires_at)
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}
