//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo expone el backend,
//! normalizado en la frontera de ingesta (imágenes, estado, nulos), y los
//! payloads de alta/modificación para administradores.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;
use validator::{Validate, ValidationError};

use super::images::deserialize_images;

/// Identificador opaco asignado por el backend
pub type CarId = i64;

/// Estado del vehículo
///
/// El backend usa textos localizados como clave (`Disponível`, `Reservado`,
/// `Vendido`); aquí se comparan siempre variantes, nunca strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VehicleStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Unknown(String),
}

impl VehicleStatus {
    /// Texto que entiende el backend
    pub fn as_wire(&self) -> &str {
        match self {
            VehicleStatus::Available => "Disponível",
            VehicleStatus::Reserved => "Reservado",
            VehicleStatus::Sold => "Vendido",
            VehicleStatus::Unknown(raw) => raw,
        }
    }

    /// Acepta tanto los textos del backend como códigos neutros
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "disponível" | "disponivel" | "available" => VehicleStatus::Available,
            "reservado" | "reserved" => VehicleStatus::Reserved,
            "vendido" | "sold" => VehicleStatus::Sold,
            _ => VehicleStatus::Unknown(raw.to_string()),
        }
    }

    /// Código independiente del idioma
    pub fn code(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Unknown(_) => "unknown",
        }
    }
}

impl Serialize for VehicleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for VehicleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| VehicleStatus::from_wire(&s)).unwrap_or_default())
    }
}

/// Vehicle principal - tal como llega de `GET /cars`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: CarId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    /// Kilómetros
    #[serde(default, deserialize_with = "null_as_default")]
    pub mileage: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transmission: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub car_type: String,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Vehicle {
    /// Vehículo mínimo, útil para construir datos en memoria
    pub fn new(id: CarId, brand: &str, model: &str, car_type: &str, price: Decimal) -> Self {
        Self {
            id,
            brand: brand.to_string(),
            model: model.to_string(),
            year: 0,
            mileage: 0,
            price,
            color: String::new(),
            fuel_type: String::new(),
            transmission: String::new(),
            car_type: car_type.to_string(),
            images: Vec::new(),
            status: VehicleStatus::Available,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }

    /// Primera imagen utilizable, si existe
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Precio en forma decimal canónica ("500000", "1250000.5")
    pub fn price_text(&self) -> String {
        self.price.normalize().to_string()
    }

    /// Precio para mostrar: "1,500,000 MZN"
    pub fn formatted_price(&self) -> String {
        format_price(&self.price)
    }
}

/// Formatea un precio con separador de miles y la moneda local
pub fn format_price(price: &Decimal) -> String {
    let rounded = price.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(&fraction);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{} MZN", sign, grouped)
}

/// Decodifica la respuesta de un listado de coches
///
/// Acepta `{ "cars": [...] }` o un array desnudo. Cualquier otra forma
/// produce una lista vacía; las entradas que no se pueden decodificar se
/// descartan individualmente.
pub fn decode_vehicle_list(payload: &Value) -> Vec<Vehicle> {
    let list = match payload {
        Value::Object(map) => map.get("cars").unwrap_or(&Value::Null),
        other => other,
    };

    let Value::Array(items) = list else {
        if !payload.is_null() {
            warn!("⚠️ Respuesta de coches sin lista, se usa lista vacía");
        }
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match Vehicle::deserialize(item) {
            Ok(vehicle) => Some(vehicle),
            Err(e) => {
                warn!("⚠️ Vehículo descartado por formato inválido: {}", e);
                None
            }
        })
        .collect()
}

/// Un `null` del backend se trata como el valor por defecto del tipo
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps `isoformat()` de Python; si no se pueden leer se ignoran
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<NaiveDateTime>().ok()))
}

/// Payload para crear o actualizar un coche (solo administradores)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CarPayload {
    #[validate(length(min = 1, max = 50), custom = "not_blank")]
    pub brand: String,
    #[validate(length(min = 1, max = 50), custom = "not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    pub mileage: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "non_negative_price")]
    pub price: Decimal,
    #[validate(length(min = 1, max = 30), custom = "not_blank")]
    pub color: String,
    #[validate(length(min = 1, max = 20), custom = "not_blank")]
    pub fuel_type: String,
    #[validate(length(min = 1, max = 20), custom = "not_blank")]
    pub transmission: String,
    #[validate(length(min = 1, max = 50), custom = "not_blank")]
    pub car_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: VehicleStatus,
    /// El backend guarda las imágenes como texto JSON
    #[serde(serialize_with = "images_as_json_text")]
    pub images: Vec<String>,
}

impl From<&Vehicle> for CarPayload {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            mileage: vehicle.mileage,
            price: vehicle.price,
            color: vehicle.color.clone(),
            fuel_type: vehicle.fuel_type.clone(),
            transmission: vehicle.transmission.clone(),
            car_type: vehicle.car_type.clone(),
            description: vehicle.description.clone(),
            status: vehicle.status.clone(),
            images: vehicle.images.clone(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

fn images_as_json_text<S: Serializer>(images: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    let text = serde_json::to_string(images).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

/// Respuesta de `POST /cars`, `PUT /cars/{id}` y `GET /cars/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CarEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub car: Vehicle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_decoding() {
        assert_eq!(VehicleStatus::from_wire("Disponível"), VehicleStatus::Available);
        assert_eq!(VehicleStatus::from_wire("RESERVED"), VehicleStatus::Reserved);
        assert_eq!(VehicleStatus::from_wire("Vendido"), VehicleStatus::Sold);
        assert_eq!(
            VehicleStatus::from_wire("Em revisão"),
            VehicleStatus::Unknown("Em revisão".to_string())
        );
        assert_eq!(VehicleStatus::Sold.code(), "sold");
    }

    #[test]
    fn test_vehicle_from_backend_shape() {
        let raw = json!({
            "id": 12,
            "brand": "Toyota",
            "model": "Hilux",
            "year": 2021,
            "mileage": 35000,
            "price": 1850000.0,
            "color": "Branco",
            "fuel_type": "Diesel",
            "transmission": "Manual",
            "car_type": null,
            "description": null,
            "status": "Reservado",
            "images": "[\"/uploads/hilux.jpg\"]",
            "created_at": "2025-03-01T10:15:30.123456"
        });
        let vehicle: Vehicle = serde_json::from_value(raw).unwrap();
        assert_eq!(vehicle.car_type, "");
        assert_eq!(vehicle.status, VehicleStatus::Reserved);
        assert_eq!(vehicle.images, vec!["/uploads/hilux.jpg"]);
        assert_eq!(vehicle.price_text(), "1850000");
        assert!(vehicle.created_at.is_some());
        assert!(vehicle.updated_at.is_none());
    }

    #[test]
    fn test_decode_vehicle_list_shapes() {
        let wrapped = json!({"cars": [{"id": 1, "brand": "BMW"}, {"id": "bad"}]});
        let cars = decode_vehicle_list(&wrapped);
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].brand, "BMW");

        let bare = json!([{"id": 2, "brand": "Kia"}]);
        assert_eq!(decode_vehicle_list(&bare).len(), 1);

        assert!(decode_vehicle_list(&json!({"error": "x"})).is_empty());
        assert!(decode_vehicle_list(&json!("cars")).is_empty());
        assert!(decode_vehicle_list(&json!(null)).is_empty());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(&Decimal::from(1_500_000)), "1,500,000 MZN");
        assert_eq!(format_price(&Decimal::from(999)), "999 MZN");
        assert_eq!(format_price(&Decimal::new(12345050, 2)), "123,450.5 MZN");
    }

    #[test]
    fn test_car_payload_validation_and_wire_format() {
        let vehicle = Vehicle::new(1, "Ford", "Ranger", "Pickup", Decimal::from(900_000)).with_year(2020);
        let mut payload = CarPayload::from(&vehicle);
        payload.color = "Preto".to_string();
        payload.fuel_type = "Diesel".to_string();
        payload.transmission = "Manual".to_string();
        payload.images = vec!["/uploads/r.jpg".to_string()];
        assert!(payload.validate().is_ok());

        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire["price"], json!(900000.0));
        assert_eq!(wire["status"], json!("Disponível"));
        assert_eq!(wire["images"], json!("[\"/uploads/r.jpg\"]"));

        payload.brand = "   ".to_string();
        payload.year = 1800;
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("brand"));
        assert!(fields.contains_key("year"));
    }
}
