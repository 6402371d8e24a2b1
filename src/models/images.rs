//! Normalización de imágenes
//!
//! El backend guarda `images` como texto: a veces llega como string JSON,
//! a veces ya como array, a veces basura. Aquí se convierte todo a
//! `Vec<String>` sin fallar nunca.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Imagen usada cuando un vehículo no tiene una referencia utilizable
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/250x150?text=Sem+Imagem";

/// Normaliza cualquier forma del campo `images` a una lista de referencias
pub fn normalize_images(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => collect_entries(&items),
            _ => Vec::new(),
        },
        Value::Array(items) => collect_entries(items),
        _ => Vec::new(),
    }
}

fn collect_entries(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(entry_to_reference)
        .filter(|reference| !reference.is_empty())
        .collect()
}

fn entry_to_reference(entry: &Value) -> Option<String> {
    match entry {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Object(map) => map
            .get("uri")
            .or_else(|| map.get("path"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// Deserializador serde para el campo `images`
pub fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_images(&raw))
}

/// Convierte una referencia guardada en el backend a una URL mostrable
///
/// - `data:...` (base64) y `http...` se devuelven tal cual
/// - `/uploads/...` se sirve desde el host del backend
/// - cualquier otra cosa se reemplaza por el placeholder
pub fn resolve_image_url(reference: &str, media_base_url: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("data:") || reference.starts_with("http") {
        reference.to_string()
    } else if reference.starts_with("/uploads") {
        format!("{}{}", media_base_url.trim_end_matches('/'), reference)
    } else {
        PLACEHOLDER_IMAGE_URL.to_string()
    }
}
