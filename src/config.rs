//! Site configuration
//!
//! A single JSON document injected by the host page (`window.__lab_config`)
//! or read from the file named by `LAB_CONFIG` in the CLI. Every field is
//! optional; absent sections fall back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::countries::{CatalogError, Country, CountryCatalog};
use crate::core::flags::DEFAULT_FLAG_BASE_URL;
use crate::core::particles::DEFAULT_POOL_SIZE;

/// Upper bound for `particles.pool_size`
pub const MAX_POOL_SIZE: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("particles.pool_size must be in 1..=10000, got {0}")]
    PoolSize(usize),
    #[error("map.flag_base_url must be an http(s) URL, got {0:?}")]
    FlagBaseUrl(String),
    #[error("invalid country list: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub particles: ParticleSettings,
    pub map: MapSettings,
}

/// Hero background settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleSettings {
    /// Number of particles, fixed for the mount session
    pub pool_size: usize,
    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            seed: None,
        }
    }
}

/// World map settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapSettings {
    /// Flag image base; images are fetched from `<base>/<code>.png`
    pub flag_base_url: String,
    /// Replaces the built-in collaborator list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<Country>>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            flag_base_url: DEFAULT_FLAG_BASE_URL.to_string(),
            countries: None,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pool_size = self.particles.pool_size;
        if !(1..=MAX_POOL_SIZE).contains(&pool_size) {
            return Err(ConfigError::PoolSize(pool_size));
        }

        let url = &self.map.flag_base_url;
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .is_some_and(|rest| !rest.trim_matches('/').is_empty());
        if !has_host {
            return Err(ConfigError::FlagBaseUrl(url.clone()));
        }

        if let Some(countries) = &self.map.countries {
            CountryCatalog::new(countries.clone())?;
        }
        Ok(())
    }

    /// Country catalog to display: the configured list, or the built-in one.
    pub fn catalog(&self) -> Result<CountryCatalog, ConfigError> {
        match &self.map.countries {
            Some(countries) => Ok(CountryCatalog::new(countries.clone())?),
            None => Ok(CountryCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.particles.pool_size, 100);
        assert_eq!(config.map.flag_base_url, "https://flagcdn.com/w40");
        assert_eq!(config.catalog().unwrap().len(), 8);
    }

    #[test]
    fn defaults_round_trip() {
        let json = serde_json::to_string(&SiteConfig::default()).unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let doc = json!({ "particles": { "seed": 42 } }).to_string();
        let config = SiteConfig::from_json(&doc).unwrap();
        assert_eq!(config.particles.seed, Some(42));
        assert_eq!(config.particles.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.map, MapSettings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        for doc in [
            json!({ "particle": {} }),
            json!({ "particles": { "count": 5 } }),
            json!({ "map": { "zoom": 2.0 } }),
        ] {
            assert!(matches!(
                SiteConfig::from_json(&doc.to_string()),
                Err(ConfigError::Json(_))
            ));
        }
    }

    #[test]
    fn pool_size_is_bounded() {
        for bad in [0usize, MAX_POOL_SIZE + 1] {
            let doc = json!({ "particles": { "pool_size": bad } }).to_string();
            assert!(matches!(
                SiteConfig::from_json(&doc),
                Err(ConfigError::PoolSize(n)) if n == bad
            ));
        }
        let doc = json!({ "particles": { "pool_size": MAX_POOL_SIZE } }).to_string();
        assert!(SiteConfig::from_json(&doc).is_ok());
    }

    #[test]
    fn flag_base_must_be_http() {
        for bad in ["", "flagcdn.com/w40", "ftp://flags", "https://", "http:///"] {
            let doc = json!({ "map": { "flag_base_url": bad } }).to_string();
            assert!(
                matches!(SiteConfig::from_json(&doc), Err(ConfigError::FlagBaseUrl(_))),
                "{bad:?} should be rejected"
            );
        }
        let doc = json!({ "map": { "flag_base_url": "http://localhost:8000/flags" } });
        assert!(SiteConfig::from_json(&doc.to_string()).is_ok());
    }

    #[test]
    fn custom_country_list_replaces_builtin() {
        let doc = json!({
            "map": { "countries": [{
                "id": "japan", "name": "Japan", "code": "JP",
                "position": { "x": 690.0, "y": 165.0 }, "color": "#F43F5E",
                "capital": "Tokyo", "population": "125M", "continent": "Asia",
                "area": "377,975 km²", "language": "Japanese"
            }]}
        });
        let catalog = SiteConfig::from_json(&doc.to_string()).unwrap().catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("japan").unwrap().code.lower(), "jp");
    }

    #[test]
    fn invalid_country_list_is_a_catalog_error() {
        let doc = json!({ "map": { "countries": [] } }).to_string();
        assert!(matches!(
            SiteConfig::from_json(&doc),
            Err(ConfigError::Catalog(CatalogError::Empty))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SiteConfig::from_file("/nonexistent/lab-config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
