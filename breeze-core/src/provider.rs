use crate::{
    Config,
    fields::{self, SUMMARY_FIELDS},
    model::{CityWeather, NOT_AVAILABLE, WeatherRecord},
    provider::wttr::WttrSource,
};
use anyhow::Context;
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod wttr;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid weather endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid location '{0}'")]
    InvalidLocation(String),
    #[error("Weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Weather endpoint returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
}

/// Remote endpoint answering `location` + format string with delimited plaintext.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_text(&self, location: &str, format: &str) -> Result<String, SourceError>;
}

/// Construct the endpoint client named by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let source = WttrSource::new(config.endpoint())
        .context("Hint: fix `endpoint` with `breeze configure`.")?;
    Ok(Arc::new(source))
}

/// Fetch and parse the 13-field detail response for one location.
pub async fn lookup_weather(
    source: &dyn WeatherSource,
    location: &str,
) -> anyhow::Result<WeatherRecord> {
    let body = source
        .fetch_text(location, fields::DETAIL_FORMAT)
        .await
        .with_context(|| format!("Failed to fetch weather for '{location}'"))?;

    Ok(fields::parse_detail(&body))
}

/// Fetch the condition/temperature summary of every city concurrently.
///
/// Results keep the order of `cities`. If any request fails the whole batch fails.
pub async fn lookup_cities(
    source: Arc<dyn WeatherSource>,
    cities: &[String],
) -> anyhow::Result<Vec<CityWeather>> {
    let handles: Vec<_> = cities
        .iter()
        .cloned()
        .map(|city| {
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let body = source.fetch_text(&city, fields::SUMMARY_FORMAT).await;
                (city, body)
            })
        })
        .collect();

    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        let (city, body) = handle.await.context("City weather task panicked")?;
        let body = body.with_context(|| format!("Failed to fetch weather for '{city}'"))?;
        out.push(summary_from_text(city, &body));
    }

    Ok(out)
}

fn summary_from_text(city: String, body: &str) -> CityWeather {
    let record = fields::parse_fields(body, &SUMMARY_FIELDS, fields::DELIMITER);
    let value = |field: &str| record.get(field).unwrap_or(NOT_AVAILABLE).to_string();

    CityWeather {
        condition: value(SUMMARY_FIELDS[0]),
        temperature: value(SUMMARY_FIELDS[1]),
        city,
    }
}
