use serde::{Deserialize, Serialize};

/// Placeholder stored for any field the endpoint did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// One named value of a parsed weather response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub field: String,
    pub value: String,
}

/// Parsed result of a single location lookup.
///
/// Always holds exactly one entry per requested field name, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherRecord {
    entries: Vec<WeatherEntry>,
}

impl WeatherRecord {
    pub(crate) fn from_entries(entries: Vec<WeatherEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WeatherEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first entry whose field name matches `field` exactly.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.field == field).map(|e| e.value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.get(crate::fields::Field::Location.label())
    }
}

impl<'a> IntoIterator for &'a WeatherRecord {
    type Item = &'a WeatherEntry;
    type IntoIter = std::slice::Iter<'a, WeatherEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Condition and temperature for one city of the top-cities panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityWeather {
    pub city: String,
    pub condition: String,
    pub temperature: String,
}
