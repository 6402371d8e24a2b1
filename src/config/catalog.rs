//! Configuración del catálogo
//!
//! Umbral premium, palabras clave de tipo y tamaño de la ventana visible.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuración del motor de catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Precio a partir del cual (inclusive) un vehículo es premium
    pub premium_threshold: Decimal,
    /// Subcadenas de `car_type` (en minúsculas) que identifican camionetas
    pub pickup_keywords: Vec<String>,
    /// Subcadenas de `car_type` (en minúsculas) que identifican buses
    pub bus_keywords: Vec<String>,
    /// Elementos visibles por categoría antes de "ver más"
    pub reveal_window: usize,
    /// Si es true, un cambio de filtros colapsa todas las categorías
    pub reset_reveal_on_filter_change: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            premium_threshold: Decimal::from(1_000_000),
            pickup_keywords: vec!["truck".to_string(), "camioneta".to_string()],
            bus_keywords: vec!["bus".to_string(), "ônibus".to_string()],
            reveal_window: 6,
            reset_reveal_on_filter_change: false,
        }
    }
}

impl CatalogConfig {
    pub fn with_premium_threshold(mut self, threshold: Decimal) -> Self {
        self.premium_threshold = threshold;
        self
    }

    pub fn with_pickup_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pickup_keywords = normalize_keywords(keywords);
        self
    }

    pub fn with_bus_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bus_keywords = normalize_keywords(keywords);
        self
    }

    pub fn with_reveal_window(mut self, window: usize) -> Self {
        self.reveal_window = window;
        self
    }

    pub fn with_reset_reveal_on_filter_change(mut self, reset: bool) -> Self {
        self.reset_reveal_on_filter_change = reset;
        self
    }
}

// Las comparaciones se hacen contra `car_type` en minúsculas
fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keywords
        .into_iter()
        .map(|k| k.into().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = CatalogConfig::default();
        assert_eq!(config.premium_threshold, Decimal::from(1_000_000));
        assert_eq!(config.reveal_window, 6);
        assert!(config.pickup_keywords.contains(&"truck".to_string()));
        assert!(config.bus_keywords.contains(&"ônibus".to_string()));
        assert!(!config.reset_reveal_on_filter_change);
    }

    #[test]
    fn test_overrides_are_lowercased() {
        let config = CatalogConfig::default()
            .with_pickup_keywords(["Ute ", "TRUCK", ""])
            .with_reveal_window(4);
        assert_eq!(config.pickup_keywords, vec!["ute".to_string(), "truck".to_string()]);
        assert_eq!(config.reveal_window, 4);
    }
}
