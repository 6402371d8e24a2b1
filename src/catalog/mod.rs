//! Motor de catálogo
//!
//! Pipeline puro y síncrono: lista cruda → filtrada → cuatro categorías →
//! ventana visible por categoría. Ninguna etapa falla; cualquier entrada
//! produce un resultado.

pub mod brand_country;
pub mod categorizer;
pub mod filter;
pub mod reveal;

use serde::{Deserialize, Serialize};

pub use brand_country::{BrandCountryMap, COUNTRY_BRANDS};
pub use categorizer::{categorize, classify, CategorizedCatalog, Category, CategoryCounts};
pub use filter::{apply_filters, apply_filters_to_payload, FilterCriteria};
pub use reveal::{hidden_count, visible_slice, RevealState};

use crate::config::catalog::CatalogConfig;
use crate::models::vehicle::Vehicle;

/// Vista de una categoría lista para pintar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub category: Category,
    pub visible: Vec<Vehicle>,
    pub total: usize,
    pub hidden: usize,
    pub expanded: bool,
}

impl CategoryView {
    /// Solo se ofrece "ver más/ver menos" si la lista supera la ventana
    pub fn can_toggle(&self, window: usize) -> bool {
        self.total > window
    }
}

/// Vista calculada de solo lectura para la capa de presentación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub normal: CategoryView,
    pub premium: CategoryView,
    pub pickup: CategoryView,
    pub bus: CategoryView,
    pub counts: CategoryCounts,
}

impl CatalogView {
    pub fn category(&self, category: Category) -> &CategoryView {
        match category {
            Category::Normal => &self.normal,
            Category::Premium => &self.premium,
            Category::Pickup => &self.pickup,
            Category::Bus => &self.bus,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.total()
    }
}

/// Ejecuta el pipeline completo sobre una instantánea de vehículos
pub fn build_catalog(
    vehicles: &[Vehicle],
    criteria: &FilterCriteria,
    reveal: &RevealState,
    countries: &BrandCountryMap,
    config: &CatalogConfig,
) -> CatalogView {
    let filtered = apply_filters(vehicles, criteria, countries);
    let categorized = categorize(filtered, config);
    render(&categorized, reveal, config.reveal_window)
}

/// Aplica las ventanas visibles a un catálogo ya categorizado
pub fn render(categorized: &CategorizedCatalog, reveal: &RevealState, window: usize) -> CatalogView {
    let view_of = |category: Category| {
        let bucket = categorized.bucket(category);
        let expanded = reveal.is_expanded(category);
        CategoryView {
            category,
            visible: visible_slice(bucket, expanded, window).to_vec(),
            total: bucket.len(),
            hidden: hidden_count(bucket.len(), expanded, window),
            expanded,
        }
    };

    CatalogView {
        normal: view_of(Category::Normal),
        premium: view_of(Category::Premium),
        pickup: view_of(Category::Pickup),
        bus: view_of(Category::Bus),
        counts: categorized.counts(),
    }
}
