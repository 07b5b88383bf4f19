//! Fixed-schema parsing of the endpoint's delimited plaintext responses.

use crate::model::{NOT_AVAILABLE, WeatherEntry, WeatherRecord};

/// Delimiter used by both response formats.
pub const DELIMITER: &str = "|";

/// Format string for the 13-field detail response.
pub const DETAIL_FORMAT: &str = "%l|%C|%t|%f|%h|%w|%p|%P|%u|%S|%s|%m|%T";

/// Format string for the condition/temperature summary response.
pub const SUMMARY_FORMAT: &str = "%C|%t";

/// Field names of the summary response, in response order.
pub const SUMMARY_FIELDS: [&str; 2] = ["Condition", "Temperature"];

/// Canonical fields of the detail response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Location,
    Condition,
    Temperature,
    FeelsLike,
    Humidity,
    WindSpeed,
    Precipitation,
    Pressure,
    UvIndex,
    Sunrise,
    Sunset,
    MoonPhase,
    CurrentTime,
}

impl Field {
    pub const fn all() -> &'static [Field] {
        &[
            Field::Location,
            Field::Condition,
            Field::Temperature,
            Field::FeelsLike,
            Field::Humidity,
            Field::WindSpeed,
            Field::Precipitation,
            Field::Pressure,
            Field::UvIndex,
            Field::Sunrise,
            Field::Sunset,
            Field::MoonPhase,
            Field::CurrentTime,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Location => "Location",
            Field::Condition => "Condition",
            Field::Temperature => "Temperature",
            Field::FeelsLike => "Feels Like",
            Field::Humidity => "Humidity",
            Field::WindSpeed => "Wind Speed",
            Field::Precipitation => "Precipitation",
            Field::Pressure => "Pressure",
            Field::UvIndex => "UV Index",
            Field::Sunrise => "Sunrise",
            Field::Sunset => "Sunset",
            Field::MoonPhase => "Moon Phase",
            Field::CurrentTime => "Current Time",
        }
    }

    /// Endpoint format code producing this field.
    pub fn code(&self) -> &'static str {
        match self {
            Field::Location => "%l",
            Field::Condition => "%C",
            Field::Temperature => "%t",
            Field::FeelsLike => "%f",
            Field::Humidity => "%h",
            Field::WindSpeed => "%w",
            Field::Precipitation => "%p",
            Field::Pressure => "%P",
            Field::UvIndex => "%u",
            Field::Sunrise => "%S",
            Field::Sunset => "%s",
            Field::MoonPhase => "%m",
            Field::CurrentTime => "%T",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::all().iter().map(Field::label).collect()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for Field {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.label() == value)
            .ok_or_else(|| anyhow::anyhow!("Unknown weather field '{value}'."))
    }
}

/// Pair the `delimiter`-separated tokens of `raw` with `names`, position by position.
///
/// The result always has one entry per name. Missing or empty tokens become
/// [`NOT_AVAILABLE`]; surplus tokens are dropped. Values are kept verbatim.
pub fn parse_fields<S: AsRef<str>>(raw: &str, names: &[S], delimiter: &str) -> WeatherRecord {
    let tokens: Vec<&str> =
        if delimiter.is_empty() { vec![raw] } else { raw.split(delimiter).collect() };

    let entries = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let value = match tokens.get(i) {
                Some(token) if !token.is_empty() => *token,
                _ => NOT_AVAILABLE,
            };
            WeatherEntry { field: name.as_ref().to_string(), value: value.to_string() }
        })
        .collect();

    WeatherRecord::from_entries(entries)
}

/// Parse a detail response against the canonical field list.
pub fn parse_detail(raw: &str) -> WeatherRecord {
    parse_fields(raw, &Field::labels(), DELIMITER)
}
