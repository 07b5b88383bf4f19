//! Fire-and-forget fetchers reporting through the [`AppEvent`] channel.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::{
    provider::{WeatherSource, lookup_cities, lookup_weather},
    state::AppEvent,
};

#[derive(Debug, Clone)]
pub struct Fetcher {
    source: Arc<dyn WeatherSource>,
    events: UnboundedSender<AppEvent>,
    requests: Arc<AtomicU64>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn WeatherSource>, events: UnboundedSender<AppEvent>) -> Self {
        Self { source, events, requests: Arc::new(AtomicU64::new(0)) }
    }

    /// Look up `location` in the background.
    ///
    /// `WeatherRequested` is sent before this returns. Returns `None` without
    /// doing anything when `location` is empty.
    pub fn fetch_weather(&self, location: &str) -> Option<JoinHandle<()>> {
        if location.is_empty() {
            return None;
        }

        let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        self.send(AppEvent::WeatherRequested { request });

        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let location = location.to_string();

        Some(tokio::spawn(async move {
            let _settle = SettleOnDrop::new(events.clone(), AppEvent::WeatherSettled { request });

            match lookup_weather(source.as_ref(), &location).await {
                Ok(record) => {
                    let _ = events.send(AppEvent::WeatherReceived { request, location, record });
                }
                Err(e) => tracing::error!("Error fetching weather data: {e:#}"),
            }
        }))
    }

    /// Load the top-cities panel in the background. All cities or nothing.
    pub fn fetch_top_cities(&self, cities: Vec<String>) -> JoinHandle<()> {
        self.send(AppEvent::CitiesRequested);

        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        tokio::spawn(async move {
            let _settle = SettleOnDrop::new(events.clone(), AppEvent::CitiesSettled);

            match lookup_cities(source, &cities).await {
                Ok(list) => {
                    let _ = events.send(AppEvent::CitiesReceived(list));
                }
                Err(e) => tracing::error!("Error fetching city weather: {e:#}"),
            }
        })
    }

    fn send(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("State receiver dropped; event discarded");
        }
    }
}

/// Sends its event when dropped, including on panic or task abort.
struct SettleOnDrop {
    events: UnboundedSender<AppEvent>,
    event: Option<AppEvent>,
}

impl SettleOnDrop {
    fn new(events: UnboundedSender<AppEvent>, event: AppEvent) -> Self {
        Self { events, event: Some(event) }
    }
}

impl Drop for SettleOnDrop {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            let _ = self.events.send(event);
        }
    }
}
