//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores compartido por todo el cliente.

pub mod errors;

pub use errors::{AppError, AppResult};
