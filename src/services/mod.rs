//! Services module
//!
//! Este módulo contiene la lógica que coordina el cliente HTTP con el
//! estado de la pantalla: reintentos y carga del catálogo.

pub mod catalog_service;
pub mod retry;

pub use catalog_service::{CarFetcher, CatalogService};
pub use retry::{with_retry, RetryPolicy};
