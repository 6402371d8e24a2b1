//! Modelo de User
//!
//! Usuario tal como lo devuelve `/auth/me` y `/profile`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::vehicle::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// Envoltorio `{ "user": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserInfo,
}

/// Request para actualizar el perfil; solo se envían los campos presentes
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

/// Contacto del administrador (`GET /admin/contact`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}
