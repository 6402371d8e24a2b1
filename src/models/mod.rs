//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que intercambia el cliente con
//! el backend de la tienda, normalizados en la frontera de ingesta.

pub mod auth;
pub mod comment;
pub mod favorite;
pub mod images;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use auth::{AuthResponse, AuthSession, LoginRequest, RegisterRequest};
pub use comment::{Comment, CommentRequest};
pub use favorite::{CarSummary, Favorite};
pub use reservation::{Reservation, ReservationStatus};
pub use user::{AdminContact, UpdateProfileRequest, UserInfo};
pub use vehicle::{decode_vehicle_list, CarId, CarPayload, Vehicle, VehicleStatus};
