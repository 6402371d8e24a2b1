//! Estado de la pantalla de catálogo
//!
//! View-model explícito y serializable, actualizado solo a través de
//! `reduce`. Cada petición de carga lleva una generación: la respuesta de
//! una petición superada por otra más reciente se descarta.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, BrandCountryMap, CatalogView, Category, FilterCriteria, RevealState};
use crate::config::catalog::CatalogConfig;
use crate::models::vehicle::Vehicle;

/// Estado de carga de la pantalla
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ScreenStatus {
    Idle,
    Loading,
    LoadedEmpty,
    LoadedWithResults,
    /// Terminal hasta que se relanza la carga manualmente
    Error(String),
}

/// Tipo de coche seleccionado en el menú de tipos (`GET /cars/type/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarTypeFilter {
    pub id: String,
    pub name: String,
}

/// Acciones que modifican la pantalla
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    FetchStarted { generation: u64 },
    FetchSucceeded { generation: u64, vehicles: Vec<Vehicle> },
    FetchFailed { generation: u64, message: String },
    SelectBrand(String),
    ClearBrand,
    SelectCountry(String),
    SetSearch(String),
    ClearFilters,
    ToggleReveal(Category),
    SelectCarType(CarTypeFilter),
    ClearCarType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogViewModel {
    pub vehicles: Vec<Vehicle>,
    pub criteria: FilterCriteria,
    pub car_type: Option<CarTypeFilter>,
    pub reveal: RevealState,
    pub status: ScreenStatus,
    /// Generación de la última carga iniciada
    pub generation: u64,
    pub config: CatalogConfig,
}

impl Default for CatalogViewModel {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl CatalogViewModel {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            vehicles: Vec::new(),
            criteria: FilterCriteria::default(),
            car_type: None,
            reveal: RevealState::default(),
            status: ScreenStatus::Idle,
            generation: 0,
            config,
        }
    }

    /// Generación que debe usar la próxima carga
    pub fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    pub fn is_loading(&self) -> bool {
        self.status == ScreenStatus::Loading
    }

    /// Vista calculada (filtrar → categorizar → ventana)
    pub fn view(&self, countries: &BrandCountryMap) -> CatalogView {
        catalog::build_catalog(&self.vehicles, &self.criteria, &self.reveal, countries, &self.config)
    }

    fn criteria_changed(&mut self) {
        if self.config.reset_reveal_on_filter_change {
            self.reveal.collapse_all();
        }
    }
}

/// Reducer puro: estado + acción → nuevo estado
pub fn reduce(mut state: CatalogViewModel, action: CatalogAction) -> CatalogViewModel {
    match action {
        CatalogAction::FetchStarted { generation } => {
            if generation > state.generation {
                state.generation = generation;
                state.status = ScreenStatus::Loading;
            }
        }
        CatalogAction::FetchSucceeded { generation, vehicles } => {
            if generation == state.generation {
                state.status = if vehicles.is_empty() {
                    ScreenStatus::LoadedEmpty
                } else {
                    ScreenStatus::LoadedWithResults
                };
                state.vehicles = vehicles;
            }
        }
        CatalogAction::FetchFailed { generation, message } => {
            if generation == state.generation {
                state.status = ScreenStatus::Error(message);
            }
        }
        CatalogAction::SelectBrand(brand) => {
            state.criteria.select_brand(&brand);
            state.car_type = None;
            state.criteria_changed();
        }
        CatalogAction::ClearBrand => {
            state.criteria.clear_brand();
            state.criteria_changed();
        }
        CatalogAction::SelectCountry(country) => {
            state.criteria.select_country(&country);
            state.criteria_changed();
        }
        CatalogAction::SetSearch(query) => {
            state.criteria.set_search(&query);
            state.criteria_changed();
        }
        CatalogAction::ClearFilters => {
            state.criteria.clear();
            state.car_type = None;
            state.criteria_changed();
        }
        CatalogAction::ToggleReveal(category) => {
            state.reveal.toggle(category);
        }
        CatalogAction::SelectCarType(car_type) => {
            // la lista por tipo reemplaza los filtros de marca y país
            state.car_type = Some(car_type);
            state.criteria.brand = None;
            state.criteria.country = None;
            state.criteria_changed();
        }
        CatalogAction::ClearCarType => {
            state.car_type = None;
            state.criteria_changed();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::COUNTRY_BRANDS;
    use rust_decimal::Decimal;

    fn sedans(n: i64) -> Vec<Vehicle> {
        (1..=n)
            .map(|id| Vehicle::new(id, "Toyota", "Corolla", "sedan", Decimal::from(400_000)))
            .collect()
    }

    fn loaded(vehicles: Vec<Vehicle>) -> CatalogViewModel {
        let state = reduce(CatalogViewModel::default(), CatalogAction::FetchStarted { generation: 1 });
        reduce(state, CatalogAction::FetchSucceeded { generation: 1, vehicles })
    }

    #[test]
    fn test_fetch_transitions() {
        let state = reduce(CatalogViewModel::default(), CatalogAction::FetchStarted { generation: 1 });
        assert!(state.is_loading());

        let empty = reduce(state.clone(), CatalogAction::FetchSucceeded { generation: 1, vehicles: vec![] });
        assert_eq!(empty.status, ScreenStatus::LoadedEmpty);

        let full = reduce(state.clone(), CatalogAction::FetchSucceeded { generation: 1, vehicles: sedans(2) });
        assert_eq!(full.status, ScreenStatus::LoadedWithResults);

        let failed = reduce(state, CatalogAction::FetchFailed { generation: 1, message: "offline".into() });
        assert_eq!(failed.status, ScreenStatus::Error("offline".to_string()));

        // reintento manual
        let retry = reduce(failed, CatalogAction::FetchStarted { generation: 2 });
        assert!(retry.is_loading());
    }

    #[test]
    fn test_stale_responses_are_discarded() {
        let state = reduce(CatalogViewModel::default(), CatalogAction::FetchStarted { generation: 1 });
        let state = reduce(state, CatalogAction::FetchStarted { generation: 2 });

        let state = reduce(state, CatalogAction::FetchSucceeded { generation: 1, vehicles: sedans(3) });
        assert!(state.is_loading());
        assert!(state.vehicles.is_empty());

        let state = reduce(state, CatalogAction::FetchFailed { generation: 1, message: "late".into() });
        assert!(state.is_loading());

        let state = reduce(state, CatalogAction::FetchSucceeded { generation: 2, vehicles: sedans(1) });
        assert_eq!(state.status, ScreenStatus::LoadedWithResults);
        assert_eq!(state.vehicles.len(), 1);

        // una generación antigua no vuelve a poner la pantalla en carga
        let state = reduce(state, CatalogAction::FetchStarted { generation: 1 });
        assert_eq!(state.status, ScreenStatus::LoadedWithResults);
    }

    #[test]
    fn test_reveal_flags_survive_filter_changes_by_default() {
        let state = loaded(sedans(10));
        let state = reduce(state, CatalogAction::ToggleReveal(Category::Normal));
        assert_eq!(state.view(&COUNTRY_BRANDS).normal.visible.len(), 10);

        let state = reduce(state, CatalogAction::SetSearch("corolla".into()));
        assert!(state.reveal.is_expanded(Category::Normal));

        let collapsed = reduce(state, CatalogAction::ToggleReveal(Category::Normal));
        let view = collapsed.view(&COUNTRY_BRANDS);
        assert_eq!(view.normal.visible.len(), 6);
        assert_eq!(view.normal.hidden, 4);
    }

    #[test]
    fn test_reveal_reset_when_configured() {
        let config = CatalogConfig::default().with_reset_reveal_on_filter_change(true);
        let state = reduce(CatalogViewModel::new(config), CatalogAction::ToggleReveal(Category::Bus));
        assert!(state.reveal.is_expanded(Category::Bus));
        let state = reduce(state, CatalogAction::SelectCountry("Japan".into()));
        assert!(!state.reveal.is_expanded(Category::Bus));
    }

    #[test]
    fn test_filter_actions() {
        let mut vehicles = sedans(2);
        vehicles.push(Vehicle::new(3, "BMW", "M3", "sedan", Decimal::from(1_900_000)));
        let state = loaded(vehicles);

        let state = reduce(state, CatalogAction::SelectCountry("Germany".into()));
        let view = state.view(&COUNTRY_BRANDS);
        assert_eq!(view.total(), 1);
        assert_eq!(view.premium.visible[0].brand, "BMW");

        let state = reduce(state, CatalogAction::SelectBrand("Toyota".into()));
        assert_eq!(state.criteria.country, None);
        assert_eq!(state.view(&COUNTRY_BRANDS).normal.total, 2);

        let state = reduce(
            state,
            CatalogAction::SelectCarType(CarTypeFilter { id: "sedan".into(), name: "Sedan".into() }),
        );
        assert_eq!(state.criteria.brand, None);
        assert!(state.car_type.is_some());

        let state = reduce(state, CatalogAction::ClearFilters);
        assert!(state.criteria.is_empty());
        assert!(state.car_type.is_none());
        assert_eq!(state.view(&COUNTRY_BRANDS).total(), 3);
    }

    #[test]
    fn test_view_model_is_serializable() {
        let state = loaded(sedans(1));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"]["state"], "loaded_with_results");
        let back: CatalogViewModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
