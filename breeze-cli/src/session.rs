use std::{fmt, sync::Arc};

use anyhow::{Context, Result};
use breeze_core::{
    AppEvent, AppState, Config, Coordinates, FileStore, Fetcher, KeyValueStore, RecentSearches,
    WeatherSource, provider::source_from_config,
};
use inquire::{InquireError, Select, Text};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::render;

/// App state plus the channel its fetchers report on.
pub struct Session {
    pub state: AppState,
    fetcher: Fetcher,
    events: UnboundedReceiver<AppEvent>,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let source = source_from_config(config)?;
        let store = FileStore::open_default()?;
        Ok(Self::with_parts(source, Box::new(store)))
    }

    pub fn with_parts(source: Arc<dyn WeatherSource>, store: Box<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(RecentSearches::load(store)),
            fetcher: Fetcher::new(source, tx),
            events: rx,
        }
    }

    /// Returns false if `location` is blank and nothing was requested.
    pub fn fetch_weather(&self, location: &str) -> bool {
        self.fetcher.fetch_weather(location.trim()).is_some()
    }

    pub fn fetch_top_cities(&self, cities: Vec<String>) {
        self.fetcher.fetch_top_cities(cities);
    }

    pub fn remove_search(&mut self, location: &str) {
        self.state.apply(AppEvent::SearchRemoved(location.to_string()));
    }

    /// Apply events until no fetch is outstanding.
    pub async fn settle(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.state.apply(event);
        }

        if self.state.is_busy() {
            eprintln!("Loading...");
        }

        while self.state.is_busy() {
            match self.events.recv().await {
                Some(event) => self.state.apply(event),
                None => break,
            }
        }
    }
}

enum Action {
    Search,
    Recent(String),
    Forget,
    TopCities,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search a location"),
            Action::Recent(location) => write!(f, "Recent: {location}"),
            Action::Forget => f.write_str("Remove a recent search"),
            Action::TopCities => f.write_str("Show top cities (loaded at start)"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// `Ok(None)` when the user cancels the prompt.
pub(crate) async fn prompt<T, F>(ask: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    match tokio::task::spawn_blocking(ask).await.context("Prompt task failed")? {
        Ok(answer) => Ok(Some(answer)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Prompt failed"),
    }
}

pub async fn run_interactive(config: &Config, at: Option<Coordinates>) -> Result<()> {
    let mut session = Session::open(config)?;

    let start = match at {
        Some(coords) => Some(coords),
        None => config.home_coordinates().unwrap_or_else(|e| {
            tracing::warn!("{e:#}");
            None
        }),
    };
    match start {
        Some(coords) => {
            session.fetch_weather(&coords.to_string());
        }
        None => tracing::info!("No starting coordinates; skipping initial lookup"),
    }
    session.fetch_top_cities(config.top_cities());
    session.settle().await;

    println!("Breeze\n");
    print!("{}", render::cities(session.state.cities()));

    loop {
        if let Some(record) = session.state.weather() {
            println!();
            print!("{}", render::weather(record));
        }
        println!();

        let mut actions = vec![Action::Search];
        actions.extend(session.state.recent().iter().cloned().map(Action::Recent));
        if !session.state.recent().is_empty() {
            actions.push(Action::Forget);
        }
        actions.push(Action::TopCities);
        actions.push(Action::Quit);

        let Some(action) = prompt(move || Select::new("What next?", actions).prompt()).await?
        else {
            break;
        };

        match action {
            Action::Search => {
                if let Some(city) = prompt(|| Text::new("Enter city:").prompt()).await? {
                    if !session.fetch_weather(&city) {
                        println!("Please enter a location.");
                    }
                }
            }
            Action::Recent(location) => {
                session.fetch_weather(&location);
            }
            Action::Forget => {
                let options = session.state.recent().to_vec();
                if let Some(location) =
                    prompt(move || Select::new("Remove which search?", options).prompt()).await?
                {
                    session.remove_search(&location);
                }
            }
            Action::TopCities => {
                println!();
                print!("{}", render::cities(session.state.cities()));
            }
            Action::Quit => break,
        }

        session.settle().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use breeze_core::{MemoryStore, SourceError, fields::SUMMARY_FORMAT};

    #[derive(Debug)]
    struct EchoSource;

    #[async_trait]
    impl WeatherSource for EchoSource {
        async fn fetch_text(&self, location: &str, format: &str) -> Result<String, SourceError> {
            if location == "nowhere" {
                return Err(SourceError::InvalidEndpoint("nowhere".into()));
            }
            if format == SUMMARY_FORMAT {
                return Ok("Sunny|+30°C".to_string());
            }
            Ok(format!("{location}|Sunny|+30°C"))
        }
    }

    fn session() -> Session {
        Session::with_parts(Arc::new(EchoSource), Box::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn settle_waits_for_lookup() {
        let mut session = session();

        assert!(session.fetch_weather("  Delhi "));
        session.settle().await;

        assert!(!session.state.is_loading());
        assert_eq!(session.state.weather_location(), Some("Delhi"));
        assert_eq!(session.state.recent(), ["Delhi"]);
    }

    #[tokio::test]
    async fn blank_location_requests_nothing() {
        let mut session = session();

        assert!(!session.fetch_weather("   "));
        session.settle().await;

        assert!(session.state.weather().is_none());
    }

    #[tokio::test]
    async fn failed_lookup_is_not_recorded() {
        let mut session = session();

        session.fetch_weather("Pune");
        session.settle().await;
        session.fetch_weather("nowhere");
        session.settle().await;

        assert_eq!(session.state.weather_location(), Some("Pune"));
        assert_eq!(session.state.recent(), ["Pune"]);
    }

    #[tokio::test]
    async fn top_cities_and_remove() {
        let mut session = session();

        session.fetch_top_cities(vec!["Delhi".into(), "Pune".into()]);
        session.fetch_weather("Surat");
        session.settle().await;

        assert_eq!(session.state.cities().len(), 2);
        assert_eq!(session.state.cities()[0].city, "Delhi");
        assert_eq!(session.state.cities()[0].condition, "Sunny");

        session.remove_search("Surat");
        assert!(session.state.recent().is_empty());
    }
}
