use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{SourceError, WeatherSource};

pub const DEFAULT_ENDPOINT: &str = "https://wttr.in";

/// Plaintext client for a wttr.in-compatible endpoint.
#[derive(Debug, Clone)]
pub struct WttrSource {
    endpoint: Url,
    http: Client,
}

impl WttrSource {
    pub fn new(endpoint: &str) -> Result<Self, SourceError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| SourceError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        if endpoint.cannot_be_a_base() {
            return Err(SourceError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self { endpoint, http: Client::new() })
    }

    /// `<endpoint>/<location>?format=<format>` with `location` as one encoded path segment.
    ///
    /// `.` and `..` are rejected: URL normalisation would drop them and hit the endpoint root.
    pub fn url_for(&self, location: &str, format: &str) -> Result<Url, SourceError> {
        if location == "." || location == ".." {
            return Err(SourceError::InvalidLocation(location.to_string()));
        }

        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .push(location);
        url.query_pairs_mut().clear().append_pair("format", format);
        Ok(url)
    }
}

#[async_trait]
impl WeatherSource for WttrSource {
    async fn fetch_text(&self, location: &str, format: &str) -> Result<String, SourceError> {
        let url = self.url_for(location, format)?;
        tracing::debug!("Requesting weather text from {url}");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(SourceError::Status { status, body: truncate_body(&body) });
        }

        Ok(body.strip_suffix('\n').unwrap_or(&body).to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_location_and_format() {
        let source = WttrSource::new("https://wttr.in").unwrap();
        let url = source.url_for("New Delhi", "%C|%t").unwrap();

        assert_eq!(url.as_str(), "https://wttr.in/New%20Delhi?format=%25C%7C%25t");
    }

    #[test]
    fn coordinates_stay_a_single_segment() {
        let source = WttrSource::new("http://localhost:8080/").unwrap();
        let url = source.url_for("28.61,77.2", "%l").unwrap();

        assert_eq!(url.path(), "/28.61,77.2");
    }

    #[test]
    fn slash_in_location_is_escaped() {
        let source = WttrSource::new("https://wttr.in").unwrap();
        let url = source.url_for("a/b", "%l").unwrap();

        assert_eq!(url.path(), "/a%2Fb");
    }

    #[test]
    fn dot_segments_are_rejected() {
        let source = WttrSource::new("https://wttr.in").unwrap();

        for location in [".", ".."] {
            assert!(matches!(
                source.url_for(location, "%l"),
                Err(SourceError::InvalidLocation(l)) if l == location
            ));
        }

        let url = source.url_for("...", "%l").unwrap();
        assert_eq!(url.path(), "/...");
    }

    #[test]
    fn endpoint_with_base_path_is_kept() {
        let source = WttrSource::new("http://proxy.local/weather").unwrap();
        let url = source.url_for("Pune", "%t").unwrap();

        assert_eq!(url.path(), "/weather/Pune");
    }

    #[test]
    fn invalid_endpoint_rejected() {
        assert!(matches!(WttrSource::new("not a url"), Err(SourceError::InvalidEndpoint(_))));
        assert!(matches!(WttrSource::new("mailto:a@b.c"), Err(SourceError::InvalidEndpoint(_))));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "°".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
