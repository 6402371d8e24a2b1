use std::env;

use anyhow::Result;
use futures::future::join;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use car_storefront::catalog::CategoryView;
use car_storefront::config::environment::EnvironmentConfig;
use car_storefront::state::{CarTypeFilter, CatalogAction, ScreenStatus};
use car_storefront::{CatalogConfig, CatalogService, Category, StorefrontClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Car Storefront - catálogo");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("🌐 API: {}", config.api_base_url);

    let client = StorefrontClient::new(config)?;

    let (online, contact) = join(client.test_connection(), client.admin_contact()).await;
    if !online {
        warn!("⚠️ El backend no respondió al test, se intentará cargar igualmente");
    }
    match contact {
        Ok(contact) => info!("📞 Contacto: {} <{}> {}", contact.name, contact.email, contact.phone),
        Err(e) => warn!("⚠️ Sin contacto del administrador: {}", e),
    }

    let mut service = CatalogService::new(client, CatalogConfig::default());

    if let Some(brand) = non_empty_var("CATALOG_BRAND") {
        service.dispatch(CatalogAction::SelectBrand(brand));
    }
    if let Some(country) = non_empty_var("CATALOG_COUNTRY") {
        let countries = service.countries();
        match countries.flag_for(&country) {
            Some(flag) => info!("{} País: {}", flag, country),
            None if countries.countries().any(|known| known == country) => info!("🌍 País: {}", country),
            None => warn!(
                "⚠️ País desconocido '{}', ningún coche coincidirá (disponibles: {})",
                country,
                countries.countries().collect::<Vec<_>>().join(", ")
            ),
        }
        service.dispatch(CatalogAction::SelectCountry(country));
    }
    if let Some(query) = non_empty_var("CATALOG_SEARCH") {
        service.dispatch(CatalogAction::SetSearch(query));
    }

    let status = match non_empty_var("CATALOG_CAR_TYPE") {
        Some(car_type) => {
            let filter = CarTypeFilter {
                name: car_type.clone(),
                id: car_type,
            };
            service.filter_by_type(filter).await.clone()
        }
        None => service.refresh().await.clone(),
    };

    match status {
        ScreenStatus::Error(message) => {
            return Err(anyhow::anyhow!("No se pudo cargar el catálogo: {}", message));
        }
        ScreenStatus::LoadedEmpty => info!("📭 Nenhum carro encontrado"),
        _ => {}
    }

    let window = service.state().config.reveal_window;
    let view = service.view();
    for category in Category::ALL {
        log_category(view.category(category), window);
    }
    info!("✅ Total visible tras filtros: {}", view.total());

    Ok(())
}

fn log_category(view: &CategoryView, window: usize) {
    info!("📂 {} ({})", view.category.as_str(), view.total);
    for vehicle in &view.visible {
        info!("   • {} {} - {}", vehicle.display_name(), vehicle.year, vehicle.formatted_price());
    }
    if view.can_toggle(window) && !view.expanded {
        info!("   Ver mais ({})", view.hidden);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
