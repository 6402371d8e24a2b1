//! Servicio de catálogo
//!
//! Une la fuente de coches (normalmente `StorefrontClient`) con el
//! view-model de la pantalla. Cada carga abre una generación nueva y su
//! resultado vuelve a entrar por el reducer.

use async_trait::async_trait;
use tracing::{error, info};

use crate::catalog::{BrandCountryMap, CatalogView, COUNTRY_BRANDS};
use crate::config::catalog::CatalogConfig;
use crate::models::vehicle::Vehicle;
use crate::state::{reduce, CarTypeFilter, CatalogAction, CatalogViewModel, ScreenStatus};
use crate::utils::errors::AppResult;

/// Fuente de la lista de coches
#[async_trait]
pub trait CarFetcher: Send + Sync {
    /// `GET /cars`
    async fn fetch_cars(&self) -> AppResult<Vec<Vehicle>>;

    /// `GET /cars/type/{id}`
    async fn fetch_cars_by_type(&self, type_id: &str) -> AppResult<Vec<Vehicle>>;
}

pub struct CatalogService<F: CarFetcher> {
    fetcher: F,
    state: CatalogViewModel,
    countries: BrandCountryMap,
}

impl<F: CarFetcher> CatalogService<F> {
    pub fn new(fetcher: F, config: CatalogConfig) -> Self {
        Self {
            fetcher,
            state: CatalogViewModel::new(config),
            countries: COUNTRY_BRANDS.clone(),
        }
    }

    /// Sustituye la tabla país → marcas
    pub fn with_countries(mut self, countries: BrandCountryMap) -> Self {
        self.countries = countries;
        self
    }

    pub fn state(&self) -> &CatalogViewModel {
        &self.state
    }

    pub fn countries(&self) -> &BrandCountryMap {
        &self.countries
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn dispatch(&mut self, action: CatalogAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Vista actual: filtrar → categorizar → ventana
    pub fn view(&self) -> CatalogView {
        self.state.view(&self.countries)
    }

    /// Abre una generación de carga y devuelve su número
    pub fn begin_fetch(&mut self) -> u64 {
        let generation = self.state.next_generation();
        self.dispatch(CatalogAction::FetchStarted { generation });
        generation
    }

    /// Entrega el resultado de una carga; si ya hay otra más reciente se ignora
    pub fn complete_fetch(&mut self, generation: u64, result: AppResult<Vec<Vehicle>>) {
        let action = match result {
            Ok(vehicles) => {
                info!("📦 Generación {}: {} coches recibidos", generation, vehicles.len());
                CatalogAction::FetchSucceeded { generation, vehicles }
            }
            Err(e) => {
                error!("❌ Error cargando coches (generación {}): {}", generation, e);
                CatalogAction::FetchFailed {
                    generation,
                    message: e.to_string(),
                }
            }
        };
        self.dispatch(action);
    }

    /// Recarga la lista: del tipo seleccionado si lo hay, si no todos los coches
    pub async fn refresh(&mut self) -> &ScreenStatus {
        let generation = self.begin_fetch();
        let result = match &self.state.car_type {
            Some(car_type) => self.fetcher.fetch_cars_by_type(&car_type.id).await,
            None => self.fetcher.fetch_cars().await,
        };
        self.complete_fetch(generation, result);
        &self.state.status
    }

    pub async fn filter_by_type(&mut self, car_type: CarTypeFilter) -> &ScreenStatus {
        info!("🔍 Filtrando por tipo: {}", car_type.name);
        self.dispatch(CatalogAction::SelectCarType(car_type));
        self.refresh().await
    }

    pub async fn clear_type(&mut self) -> &ScreenStatus {
        self.dispatch(CatalogAction::ClearCarType);
        self.refresh().await
    }
}
