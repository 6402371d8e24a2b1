//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del cliente y las
//! constantes (sobrescribibles) del motor de catálogo.

pub mod catalog;
pub mod environment;

pub use catalog::CatalogConfig;
pub use environment::*;
