use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::favorite::CarSummary;
use super::vehicle::{lenient_timestamp, CarId};

/// Estado de una reserva
///
/// Confirmar una reserva en el backend la marca como `Vendido`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Unknown(String),
}

impl ReservationStatus {
    pub fn as_wire(&self) -> &str {
        match self {
            ReservationStatus::Pending => "Pendente",
            ReservationStatus::Confirmed => "Vendido",
            ReservationStatus::Cancelled => "Cancelado",
            ReservationStatus::Unknown(raw) => raw,
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "pendente" | "pending" => ReservationStatus::Pending,
            "vendido" | "aprovado" | "confirmed" => ReservationStatus::Confirmed,
            "cancelado" | "rejeitado" | "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Unknown(raw.to_string()),
        }
    }

    pub fn is_open(&self) -> bool {
        *self == ReservationStatus::Pending
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| ReservationStatus::from_wire(&s)).unwrap_or_default())
    }
}

/// Cliente que hizo la reserva (solo en el listado del administrador)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub car: CarSummary,
    #[serde(default)]
    pub user: Option<ReservationUser>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationList {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReservationRequest {
    pub car_id: CarId,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub reservation_id: i64,
}
