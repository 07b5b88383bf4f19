//! Session state and the events that mutate it.
//!
//! Fetchers never touch [`AppState`] directly: they emit [`AppEvent`]s and
//! the owner of the state feeds them to [`AppState::apply`].

use crate::{
    model::{CityWeather, WeatherRecord},
    recent::RecentSearches,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A weather lookup was issued. Request numbers only grow.
    WeatherRequested { request: u64 },
    WeatherReceived { request: u64, location: String, record: WeatherRecord },
    /// Emitted once per request on every exit path, after any `WeatherReceived`.
    WeatherSettled { request: u64 },
    CitiesRequested,
    CitiesReceived(Vec<CityWeather>),
    CitiesSettled,
    SearchRemoved(String),
}

#[derive(Debug)]
pub struct AppState {
    weather: Option<WeatherRecord>,
    weather_location: Option<String>,
    loading: bool,
    cities: Vec<CityWeather>,
    cities_loading: bool,
    recent: RecentSearches,
    latest_request: u64,
}

impl AppState {
    pub fn new(recent: RecentSearches) -> Self {
        Self {
            weather: None,
            weather_location: None,
            loading: false,
            cities: Vec::new(),
            cities_loading: false,
            recent,
            latest_request: 0,
        }
    }

    pub fn weather(&self) -> Option<&WeatherRecord> {
        self.weather.as_ref()
    }

    /// Location string that produced the current record.
    pub fn weather_location(&self) -> Option<&str> {
        self.weather_location.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cities(&self) -> &[CityWeather] {
        &self.cities
    }

    pub fn is_cities_loading(&self) -> bool {
        self.cities_loading
    }

    pub fn recent(&self) -> &[String] {
        self.recent.all()
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.cities_loading
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::WeatherRequested { request } => {
                self.latest_request = self.latest_request.max(request);
                self.loading = true;
            }
            AppEvent::WeatherReceived { request, location, record } => {
                if request == self.latest_request {
                    self.weather = Some(record);
                    self.weather_location = Some(location.clone());
                } else {
                    tracing::debug!(
                        "Ignoring stale weather for '{location}' (request {request}, latest {})",
                        self.latest_request
                    );
                }
                if let Err(e) = self.recent.add(&location) {
                    tracing::error!("{e:#}");
                }
            }
            AppEvent::WeatherSettled { request } => {
                if request == self.latest_request {
                    self.loading = false;
                }
            }
            AppEvent::CitiesRequested => self.cities_loading = true,
            AppEvent::CitiesReceived(cities) => self.cities = cities,
            AppEvent::CitiesSettled => self.cities_loading = false,
            AppEvent::SearchRemoved(location) => {
                if let Err(e) = self.recent.remove(&location) {
                    tracing::error!("{e:#}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fields::parse_detail,
        recent::STORAGE_KEY,
        storage::{FailingStore, KeyValueStore, MemoryStore},
    };

    fn state() -> (AppState, MemoryStore) {
        let store = MemoryStore::new();
        (AppState::new(RecentSearches::load(Box::new(store.clone()))), store)
    }

    fn received(request: u64, location: &str) -> AppEvent {
        AppEvent::WeatherReceived {
            request,
            location: location.to_string(),
            record: parse_detail(&format!("{location}|Sunny")),
        }
    }

    #[test]
    fn successful_lookup_replaces_record_and_records_search() {
        let (mut state, store) = state();

        state.apply(AppEvent::WeatherRequested { request: 1 });
        assert!(state.is_loading());

        state.apply(received(1, "Delhi"));
        state.apply(AppEvent::WeatherSettled { request: 1 });

        assert!(!state.is_loading());
        assert_eq!(state.weather().and_then(WeatherRecord::location), Some("Delhi"));
        assert_eq!(state.weather_location(), Some("Delhi"));
        assert_eq!(state.recent(), ["Delhi"]);
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some(r#"["Delhi"]"#));
    }

    #[test]
    fn failed_lookup_keeps_previous_record() {
        let (mut state, _) = state();

        state.apply(AppEvent::WeatherRequested { request: 1 });
        state.apply(received(1, "Delhi"));
        state.apply(AppEvent::WeatherSettled { request: 1 });

        state.apply(AppEvent::WeatherRequested { request: 2 });
        state.apply(AppEvent::WeatherSettled { request: 2 });

        assert!(!state.is_loading());
        assert_eq!(state.weather().and_then(WeatherRecord::location), Some("Delhi"));
        assert_eq!(state.recent(), ["Delhi"]);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_request() {
        let (mut state, _) = state();

        state.apply(AppEvent::WeatherRequested { request: 1 });
        state.apply(AppEvent::WeatherRequested { request: 2 });

        state.apply(received(2, "Mumbai"));
        state.apply(AppEvent::WeatherSettled { request: 2 });
        assert!(!state.is_loading());

        state.apply(received(1, "Delhi"));
        state.apply(AppEvent::WeatherSettled { request: 1 });

        assert_eq!(state.weather_location(), Some("Mumbai"));
        assert!(!state.is_loading());
        // both lookups succeeded, so both are remembered
        assert_eq!(state.recent(), ["Delhi", "Mumbai"]);
    }

    #[test]
    fn loading_stays_set_until_latest_request_settles() {
        let (mut state, _) = state();

        state.apply(AppEvent::WeatherRequested { request: 1 });
        state.apply(AppEvent::WeatherRequested { request: 2 });
        state.apply(AppEvent::WeatherSettled { request: 1 });

        assert!(state.is_loading());

        state.apply(AppEvent::WeatherSettled { request: 2 });
        assert!(!state.is_loading());
    }

    #[test]
    fn cities_replace_whole_list() {
        let (mut state, _) = state();
        let city = |name: &str| CityWeather {
            city: name.to_string(),
            condition: "Sunny".to_string(),
            temperature: "+30°C".to_string(),
        };

        state.apply(AppEvent::CitiesRequested);
        assert!(state.is_busy());
        state.apply(AppEvent::CitiesReceived(vec![city("Pune"), city("Surat")]));
        state.apply(AppEvent::CitiesSettled);

        state.apply(AppEvent::CitiesRequested);
        state.apply(AppEvent::CitiesReceived(vec![city("Delhi")]));
        state.apply(AppEvent::CitiesSettled);

        assert!(!state.is_cities_loading());
        assert_eq!(state.cities(), [city("Delhi")]);
    }

    #[test]
    fn failed_cities_batch_keeps_previous_list() {
        let (mut state, _) = state();
        let previous = vec![CityWeather {
            city: "Pune".into(),
            condition: "Sunny".into(),
            temperature: "+30°C".into(),
        }];

        state.apply(AppEvent::CitiesReceived(previous.clone()));
        state.apply(AppEvent::CitiesRequested);
        state.apply(AppEvent::CitiesSettled);

        assert_eq!(state.cities(), previous.as_slice());
    }

    #[test]
    fn search_removed_updates_store() {
        let store = MemoryStore::with_entry(STORAGE_KEY, r#"["Delhi","Pune"]"#);
        let mut state = AppState::new(RecentSearches::load(Box::new(store.clone())));

        state.apply(AppEvent::SearchRemoved("Delhi".into()));

        assert_eq!(state.recent(), ["Pune"]);
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some(r#"["Pune"]"#));
    }

    #[test]
    fn storage_failure_does_not_block_state_updates() {
        let mut state = AppState::new(RecentSearches::load(Box::new(FailingStore::default())));

        state.apply(AppEvent::WeatherRequested { request: 1 });
        state.apply(received(1, "Delhi"));
        state.apply(AppEvent::WeatherSettled { request: 1 });

        assert!(!state.is_loading());
        assert_eq!(state.weather_location(), Some("Delhi"));
        assert_eq!(state.recent(), ["Delhi"]);

        state.apply(AppEvent::SearchRemoved("Delhi".into()));
        assert!(state.recent().is_empty());
    }
}
