//! Tabla país → marcas
//!
//! Constante de proceso usada solo por el filtro por país. Una marca puede
//! aparecer en varios países (Toyota está en Japón, Singapur, EAU y Tailandia).

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Marcas asociadas a un país
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryBrands {
    pub country: String,
    pub flag: String,
    pub brands: Vec<String>,
}

/// Tabla ordenada país → marcas (el orden es el de presentación)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCountryMap {
    entries: Vec<CountryBrands>,
}

lazy_static! {
    /// Tabla por defecto de la tienda
    pub static ref COUNTRY_BRANDS: BrandCountryMap = BrandCountryMap::storefront_default();
}

impl BrandCountryMap {
    /// Construye una tabla a partir de pares (país, marcas), sin banderas
    pub fn from_pairs<C, B, I>(pairs: I) -> Self
    where
        C: Into<String>,
        B: Into<String>,
        I: IntoIterator<Item = (C, Vec<B>)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(country, brands)| CountryBrands {
                    country: country.into(),
                    flag: String::new(),
                    brands: brands.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    pub fn storefront_default() -> Self {
        let table: [(&str, &str, &[&str]); 10] = [
            ("Japan", "🇯🇵", &["Toyota", "Honda", "Nissan", "Mazda", "Subaru", "Mitsubishi", "Suzuki"]),
            ("Korea", "🇰🇷", &["Hyundai", "Kia"]),
            ("Germany", "🇩🇪", &["BMW", "Mercedes-Benz", "Audi", "Volkswagen", "Porsche"]),
            ("USA", "🇺🇸", &["Ford", "Chevrolet", "Cadillac", "Buick"]),
            ("Italy", "🇮🇹", &["Ferrari", "Lamborghini", "Fiat", "Alfa Romeo"]),
            ("France", "🇫🇷", &["Peugeot", "Renault", "Citroën"]),
            ("UK", "🇬🇧", &["Land Rover", "Jaguar", "Mini", "Rolls-Royce"]),
            ("Singapore", "🇸🇬", &["Toyota", "Honda", "BMW"]),
            ("UAE", "🇦🇪", &["Toyota", "Nissan", "BMW"]),
            ("Thailand", "🇹🇭", &["Toyota", "Honda", "Nissan"]),
        ];

        Self {
            entries: table
                .iter()
                .map(|(country, flag, brands)| CountryBrands {
                    country: country.to_string(),
                    flag: flag.to_string(),
                    brands: brands.iter().map(|b| b.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Marcas del país (búsqueda exacta por nombre de país)
    pub fn brands_for(&self, country: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.country == country)
            .map(|entry| entry.brands.as_slice())
    }

    /// ¿La marca (sin distinguir mayúsculas) pertenece al país?
    /// Un país desconocido no contiene ninguna marca.
    pub fn country_has_brand(&self, country: &str, brand: &str) -> bool {
        let brand = brand.to_lowercase();
        self.brands_for(country)
            .map(|brands| brands.iter().any(|b| b.to_lowercase() == brand))
            .unwrap_or(false)
    }

    pub fn flag_for(&self, country: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.country == country)
            .map(|entry| entry.flag.as_str())
            .filter(|flag| !flag.is_empty())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.country.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        assert_eq!(COUNTRY_BRANDS.countries().count(), 10);
        assert!(COUNTRY_BRANDS.country_has_brand("Germany", "bmw"));
        assert!(COUNTRY_BRANDS.country_has_brand("Thailand", "TOYOTA"));
        assert!(!COUNTRY_BRANDS.country_has_brand("Korea", "Toyota"));
        assert!(!COUNTRY_BRANDS.country_has_brand("Atlantis", "Toyota"));
        assert_eq!(COUNTRY_BRANDS.flag_for("Japan"), Some("🇯🇵"));
    }

    #[test]
    fn test_custom_table() {
        let map = BrandCountryMap::from_pairs([("Germany", vec!["BMW", "Audi"])]);
        assert_eq!(map.brands_for("Germany").map(|b| b.len()), Some(2));
        assert_eq!(map.flag_for("Germany"), None);
        assert!(map.brands_for("Japan").is_none());
    }
}
