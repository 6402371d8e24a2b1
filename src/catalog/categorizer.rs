//! Etapa de categorización
//!
//! Reparte la lista filtrada en cuatro grupos disjuntos. Por vehículo gana la
//! primera regla que aplica: camioneta, bus, premium (por precio), normal.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::catalog::CatalogConfig;
use crate::models::vehicle::Vehicle;

/// Grupo de presentación del catálogo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Normal,
    Premium,
    Pickup,
    Bus,
}

impl Category {
    /// Orden de presentación
    pub const ALL: [Category; 4] = [Category::Normal, Category::Premium, Category::Pickup, Category::Bus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Premium => "premium",
            Category::Pickup => "pickup",
            Category::Bus => "bus",
        }
    }
}

/// Clasifica un vehículo; `car_type` ausente equivale a cadena vacía
pub fn classify(vehicle: &Vehicle, config: &CatalogConfig) -> Category {
    let car_type = vehicle.car_type.to_lowercase();
    let contains_any = |keywords: &[String]| keywords.iter().any(|k| !k.is_empty() && car_type.contains(k.as_str()));

    if contains_any(&config.pickup_keywords) {
        Category::Pickup
    } else if contains_any(&config.bus_keywords) {
        Category::Bus
    } else if vehicle.price >= config.premium_threshold {
        Category::Premium
    } else {
        Category::Normal
    }
}

/// Resultado de la categorización: una partición estricta de la entrada
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedCatalog {
    pub normal: Vec<Vehicle>,
    pub premium: Vec<Vehicle>,
    pub pickup: Vec<Vehicle>,
    pub bus: Vec<Vehicle>,
}

/// Número de vehículos por grupo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub normal: usize,
    pub premium: usize,
    pub pickup: usize,
    pub bus: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.normal + self.premium + self.pickup + self.bus
    }
}

impl CategorizedCatalog {
    pub fn bucket(&self, category: Category) -> &[Vehicle] {
        match category {
            Category::Normal => &self.normal,
            Category::Premium => &self.premium,
            Category::Pickup => &self.pickup,
            Category::Bus => &self.bus,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Vehicle> {
        match category {
            Category::Normal => &mut self.normal,
            Category::Premium => &mut self.premium,
            Category::Pickup => &mut self.pickup,
            Category::Bus => &mut self.bus,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            normal: self.normal.len(),
            premium: self.premium.len(),
            pickup: self.pickup.len(),
            bus: self.bus.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Reparte los vehículos conservando el orden relativo dentro de cada grupo
pub fn categorize<I>(vehicles: I, config: &CatalogConfig) -> CategorizedCatalog
where
    I: IntoIterator<Item = Vehicle>,
{
    let mut catalog = CategorizedCatalog::default();
    for vehicle in vehicles {
        let category = classify(&vehicle, config);
        catalog.bucket_mut(category).push(vehicle);
    }

    debug!("📊 Coches por categoría: {:?}", catalog.counts());
    catalog
}
