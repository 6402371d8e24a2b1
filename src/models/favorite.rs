use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::images::deserialize_images;
use super::vehicle::{lenient_timestamp, null_as_default, CarId};

// El listado de reservas del admin manda "N/A" como año de coches borrados
fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .and_then(|year| i32::try_from(year).ok())
        .unwrap_or_default())
}

/// Resumen de coche embebido en favoritos y reservas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSummary {
    /// `null` cuando el coche fue borrado después de la reserva
    #[serde(default)]
    pub id: Option<CarId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

/// Favorito del usuario: el coche más la referencia del favorito
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(flatten)]
    pub car: CarSummary,
    pub favorite_id: i64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub added_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteList {
    #[serde(default)]
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddFavoriteRequest {
    pub car_id: CarId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddFavoriteResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub favorite_id: i64,
}
