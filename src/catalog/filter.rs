//! Etapa de filtrado
//!
//! Marca (exacta), país (vía tabla país → marcas) y búsqueda libre sobre
//! marca, modelo, año y precio. Los criterios activos se combinan con AND;
//! los vacíos no excluyen nada.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::brand_country::BrandCountryMap;
use crate::models::vehicle::{decode_vehicle_list, Vehicle};

/// Criterios de filtrado de la pantalla de catálogo
///
/// Marca y país son excluyentes: fijar uno limpia el otro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub brand: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.select_brand(brand);
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.select_country(country);
        self
    }

    pub fn with_search(mut self, query: &str) -> Self {
        self.set_search(query);
        self
    }

    pub fn select_brand(&mut self, brand: &str) {
        self.brand = Some(brand.to_string());
        self.country = None;
    }

    /// Seleccionar el país ya activo lo desactiva
    pub fn select_country(&mut self, country: &str) {
        if self.active_country() == Some(country) {
            self.country = None;
        } else {
            self.country = Some(country.to_string());
        }
        self.brand = None;
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = Some(query.to_string());
    }

    pub fn clear_brand(&mut self) {
        self.brand = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn active_brand(&self) -> Option<&str> {
        non_blank(self.brand.as_deref())
    }

    /// País efectivo: ignorado si hay marca activa (la marca tiene prioridad)
    pub fn active_country(&self) -> Option<&str> {
        if self.active_brand().is_some() {
            return None;
        }
        non_blank(self.country.as_deref())
    }

    /// Texto de búsqueda tal cual; en blanco equivale a no buscar
    pub fn active_search(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.active_brand().is_none() && self.active_country().is_none() && self.active_search().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// ¿El vehículo cumple todos los criterios activos?
pub fn matches(vehicle: &Vehicle, criteria: &FilterCriteria, countries: &BrandCountryMap) -> bool {
    if let Some(brand) = criteria.active_brand() {
        if vehicle.brand != brand {
            return false;
        }
    }

    if let Some(country) = criteria.active_country() {
        if !countries.country_has_brand(country, &vehicle.brand) {
            return false;
        }
    }

    if let Some(query) = criteria.active_search() {
        if !matches_search(vehicle, &query.to_lowercase()) {
            return false;
        }
    }

    true
}

// `query` ya viene en minúsculas
fn matches_search(vehicle: &Vehicle, query: &str) -> bool {
    vehicle.brand.to_lowercase().contains(query)
        || vehicle.model.to_lowercase().contains(query)
        || vehicle.year.to_string().contains(query)
        || vehicle.price_text().contains(query)
}

/// Aplica los criterios conservando el orden de entrada
pub fn apply_filters(
    vehicles: &[Vehicle],
    criteria: &FilterCriteria,
    countries: &BrandCountryMap,
) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|vehicle| matches(vehicle, criteria, countries))
        .cloned()
        .collect()
}

/// Igual que `apply_filters` pero sobre la respuesta cruda del backend;
/// una respuesta que no es lista produce un resultado vacío.
pub fn apply_filters_to_payload(
    payload: &Value,
    criteria: &FilterCriteria,
    countries: &BrandCountryMap,
) -> Vec<Vehicle> {
    let vehicles = decode_vehicle_list(payload);
    apply_filters(&vehicles, criteria, countries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::brand_country::COUNTRY_BRANDS;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn fleet() -> Vec<Vehicle> {
        vec![
            Vehicle::new(1, "Toyota", "Corolla", "sedan", Decimal::from(500_000)).with_year(2018),
            Vehicle::new(2, "BMW", "X5", "suv", Decimal::from(2_300_000)).with_year(2022),
            Vehicle::new(3, "Hyundai", "H100", "Truck", Decimal::from(750_000)).with_year(2015),
            Vehicle::new(4, "toyota", "Hiace", "Minibus", Decimal::from(1_100_000)).with_year(2020),
        ]
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<i64> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_empty_criteria_keep_everything() {
        let criteria = FilterCriteria::new().with_search("   ");
        assert!(criteria.is_empty());
        assert_eq!(ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_brand_filter_is_exact_and_case_sensitive() {
        let criteria = FilterCriteria::new().with_brand("Toyota");
        assert_eq!(ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS)), vec![1]);
    }

    #[test]
    fn test_country_filter_is_case_insensitive() {
        let criteria = FilterCriteria::new().with_country("Japan");
        assert_eq!(ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS)), vec![1, 4]);

        let criteria = FilterCriteria::new().with_country("Nowhere");
        assert!(apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS).is_empty());
    }

    #[test]
    fn test_brand_and_country_are_mutually_exclusive() {
        let mut criteria = FilterCriteria::new().with_country("Germany");
        criteria.select_brand("Toyota");
        assert_eq!(criteria.country, None);
        assert_eq!(criteria.active_brand(), Some("Toyota"));

        criteria.select_country("Korea");
        assert_eq!(criteria.brand, None);
        assert_eq!(criteria.active_country(), Some("Korea"));

        // seleccionar el mismo país lo desactiva
        criteria.select_country("Korea");
        assert_eq!(criteria.active_country(), None);
    }

    #[test]
    fn test_brand_takes_precedence_when_both_are_set() {
        let criteria = FilterCriteria {
            brand: Some("BMW".to_string()),
            country: Some("Japan".to_string()),
            search: None,
        };
        assert_eq!(ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS)), vec![2]);
    }

    #[test]
    fn test_search_across_fields() {
        let search = |q: &str| {
            let criteria = FilterCriteria::new().with_search(q);
            ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS))
        };
        assert_eq!(search("TOYO"), vec![1, 4]);
        assert_eq!(search("hia"), vec![4]);
        assert_eq!(search("2022"), vec![2]);
        assert_eq!(search("750"), vec![3]);
        assert_eq!(search("nothing-like-this"), Vec::<i64>::new());
    }

    #[test]
    fn test_search_query_is_not_trimmed() {
        let criteria = FilterCriteria::new().with_search(" hia");
        assert_eq!(criteria.active_search(), Some(" hia"));
        assert!(apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS).is_empty());

        let criteria = FilterCriteria::new().with_search("corolla ");
        assert!(apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS).is_empty());
    }

    #[test]
    fn test_search_and_country_combine_with_and() {
        let criteria = FilterCriteria::new().with_country("Japan").with_search("corolla");
        assert_eq!(ids(&apply_filters(&fleet(), &criteria, &COUNTRY_BRANDS)), vec![1]);
    }

    #[test]
    fn test_malformed_payload_yields_empty() {
        let criteria = FilterCriteria::new();
        assert!(apply_filters_to_payload(&json!({"oops": 1}), &criteria, &COUNTRY_BRANDS).is_empty());
        assert!(apply_filters_to_payload(&json!(17), &criteria, &COUNTRY_BRANDS).is_empty());
        let payload = json!({"cars": [{"id": 1, "brand": "Kia", "model": "Rio"}]});
        assert_eq!(apply_filters_to_payload(&payload, &criteria, &COUNTRY_BRANDS).len(), 1);
    }
}
