//! Collaborating-country catalog shown on the world map

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::flags::CountryCode;
use super::geometry::{Point, Rgb};
use super::view::{MAP_HEIGHT, MAP_WIDTH};

/// Radius of the marker halo in content units; also the click/drag hit area
pub const MARKER_HALO_RADIUS: f32 = 8.0;
pub const MARKER_DOT_RADIUS: f32 = 6.0;
pub const MARKER_HIT_RADIUS: f32 = MARKER_HALO_RADIUS;

/// Static descriptor of one marker. Display strings are shown verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub code: CountryCode,
    /// Marker position in the 800x400 content box
    pub position: Point,
    pub color: Rgb,
    pub capital: String,
    pub population: String,
    pub continent: String,
    pub area: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("country catalog is empty")]
    Empty,
    #[error("duplicate country id {0:?}")]
    DuplicateId(String),
    #[error("country id must not be blank")]
    BlankId,
    #[error("marker {id:?} at ({x}, {y}) lies outside the map")]
    OutOfBounds { id: String, x: f32, y: f32 },
}

/// Validated, ordered set of markers. Order is draw order.
#[derive(Clone, Debug)]
pub struct CountryCatalog {
    countries: Vec<Country>,
}

impl CountryCatalog {
    pub fn new(countries: Vec<Country>) -> Result<Self, CatalogError> {
        if countries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for country in &countries {
            if country.id.trim().is_empty() {
                return Err(CatalogError::BlankId);
            }
            if !seen.insert(country.id.as_str()) {
                return Err(CatalogError::DuplicateId(country.id.clone()));
            }
            let Point { x, y } = country.position;
            if !(0.0..=MAP_WIDTH).contains(&x) || !(0.0..=MAP_HEIGHT).contains(&y) {
                return Err(CatalogError::OutOfBounds {
                    id: country.id.clone(),
                    x,
                    y,
                });
            }
        }
        Ok(Self { countries })
    }

    /// Built-in collaborator set
    pub fn builtin() -> Self {
        Self {
            countries: default_countries(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Marker under a content-space point. Overlapping markers resolve to the
    /// one drawn last (topmost).
    pub fn marker_at(&self, content: Point) -> Option<&Country> {
        self.countries
            .iter()
            .rev()
            .find(|c| c.position.distance(content) <= MARKER_HIT_RADIUS)
    }

    /// Distinct continents, sorted
    pub fn continents(&self) -> BTreeSet<&str> {
        self.countries.iter().map(|c| c.continent.as_str()).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn country(
    id: &str,
    name: &str,
    code: [u8; 2],
    (x, y): (f32, f32),
    color: Rgb,
    capital: &str,
    population: &str,
    continent: &str,
    area: &str,
    language: &str,
) -> Country {
    Country {
        id: id.to_string(),
        name: name.to_string(),
        code: CountryCode::from_ascii(code),
        position: Point::new(x, y),
        color,
        capital: capital.to_string(),
        population: population.to_string(),
        continent: continent.to_string(),
        area: area.to_string(),
        language: language.to_string(),
    }
}

/// The lab's collaborating countries
#[rustfmt::skip]
pub fn default_countries() -> Vec<Country> {
    vec![
        country(
            "usa", "United States", *b"US", (180.0, 160.0), Rgb::new(0x3B, 0x82, 0xF6),
            "Washington D.C.", "331M", "North America", "9.8M km²", "English",
        ),
        country(
            "algeria", "Algeria", *b"DZ", (440.0, 190.0), Rgb::new(0x10, 0xB9, 0x81),
            "Algiers", "44M", "Africa", "2.4M km²", "Arabic",
        ),
        country(
            "france", "France", *b"FR", (430.0, 150.0), Rgb::new(0xEF, 0x44, 0x44),
            "Paris", "68M", "Europe", "643,801 km²", "French",
        ),
        country(
            "uk", "United Kingdom", *b"GB", (420.0, 140.0), Rgb::new(0x8B, 0x5C, 0xF6),
            "London", "67M", "Europe", "242,495 km²", "English",
        ),
        country(
            "south-korea", "South Korea", *b"KR", (640.0, 170.0), Rgb::new(0xF5, 0x9E, 0x0B),
            "Seoul", "52M", "Asia", "100,363 km²", "Korean",
        ),
        country(
            "netherlands", "Netherlands", *b"NL", (430.0, 145.0), Rgb::new(0xEC, 0x48, 0x99),
            "Amsterdam", "17M", "Europe", "41,865 km²", "Dutch",
        ),
        country(
            "denmark", "Denmark", *b"DK", (445.0, 130.0), Rgb::new(0x14, 0xB8, 0xA6),
            "Copenhagen", "5.9M", "Europe", "42,933 km²", "Danish",
        ),
        country(
            "ireland", "Ireland", *b"IE", (410.0, 140.0), Rgb::new(0x22, 0xC5, 0x5E),
            "Dublin", "5.1M", "Europe", "70,273 km²", "English, Irish",
        ),
    ]
}
