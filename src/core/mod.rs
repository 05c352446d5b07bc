//! Platform-agnostic core - shared between the browser front-end and the CLI

pub mod countries;
pub mod flags;
pub mod geometry;
pub mod map;
pub mod outline;
pub mod particles;
pub mod view;

pub use countries::{default_countries, CatalogError, Country, CountryCatalog};
pub use flags::{flag_url, CountryCode, CountryCodeError, FlagCache, FlagStatus};
pub use geometry::{ColorError, Point, Rgb, Rgba};
pub use map::{MapState, PressOutcome, Selection};
pub use outline::{world_outlines, Continent, PathError, QuadPath};
pub use particles::{Bounds, FrameStats, ParticleField, Surface};
pub use view::{ViewTransform, Viewport};
