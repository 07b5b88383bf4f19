//! Core library for the `breeze` weather client.
//!
//! This crate defines:
//! - Parsing of the text endpoint's fixed-field responses
//! - Time and condition helpers for presenting those fields
//! - The persisted recent-searches list and its storage backends
//! - Session state, the events that change it, and the fetchers emitting them
//! - Configuration handling
//!
//! It is used by `breeze-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod fetch;
pub mod fields;
pub mod geo;
pub mod model;
pub mod provider;
pub mod recent;
pub mod state;
pub mod storage;
pub mod timefmt;

pub use condition::{MoonPhase, Sky};
pub use config::Config;
pub use fetch::Fetcher;
pub use fields::{Field, parse_fields};
pub use geo::Coordinates;
pub use model::{CityWeather, NOT_AVAILABLE, WeatherEntry, WeatherRecord};
pub use provider::{SourceError, WeatherSource, lookup_cities, lookup_weather};
pub use recent::RecentSearches;
pub use state::{AppEvent, AppState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timefmt::{format_clock, format_time};
