use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A latitude/longitude pair, usable directly as a lookup location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow!("Latitude {latitude} is outside -90..=90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("Longitude {longitude} is outside -180..=180"));
        }
        Ok(Self { latitude, longitude })
    }
}

/// Renders as `"<lat>,<lon>"`, the form the endpoint accepts as a location.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("Expected coordinates as `lat,lon`, got '{s}'"))?;

        let lat: f64 =
            lat.trim().parse().map_err(|e| anyhow!("Invalid latitude '{}': {e}", lat.trim()))?;
        let lon: f64 =
            lon.trim().parse().map_err(|e| anyhow!("Invalid longitude '{}': {e}", lon.trim()))?;

        Self::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let c: Coordinates = "28.6139, 77.209".parse().unwrap();
        assert_eq!(c, Coordinates { latitude: 28.6139, longitude: 77.209 });
        assert_eq!(c.to_string(), "28.6139,77.209");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("91,0".parse::<Coordinates>().is_err());
        assert!("0,-181".parse::<Coordinates>().is_err());
        assert!("NaN,0".parse::<Coordinates>().is_err());
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["", "28.6", "north,south", "1,2,3"] {
            assert!(raw.parse::<Coordinates>().is_err(), "input {raw:?}");
        }
    }
}
