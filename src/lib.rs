//! Cliente y motor de catálogo para la tienda de coches
//!
//! - `client`: cliente REST del backend (auth, coches, favoritos, reservas...)
//! - `catalog`: filtro, categorización y ventana visible, puros y síncronos
//! - `state`: view-model de la pantalla de catálogo y su reducer
//! - `services`: reintentos y servicio de catálogo

pub mod catalog;
pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use catalog::{build_catalog, BrandCountryMap, CatalogView, Category, FilterCriteria, RevealState};
pub use client::StorefrontClient;
pub use config::{CatalogConfig, EnvironmentConfig};
pub use services::{CarFetcher, CatalogService, RetryPolicy};
pub use state::{reduce, CatalogAction, CatalogViewModel, ScreenStatus};
pub use utils::errors::{AppError, AppResult};
