//! Classification of free-text condition and moon phase values.

use serde::{Deserialize, Serialize};

/// Sky category derived from a condition description such as "Light rain shower".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Rain,
    Cloud,
    Sun,
    Snow,
    Storm,
    Haze,
    Fog,
}

impl Sky {
    /// Case-insensitive keyword match; the first matching keyword wins and
    /// anything unrecognised falls back to [`Sky::Fog`].
    pub fn classify(condition: &str) -> Self {
        let text = condition.to_lowercase();
        [
            ("rain", Sky::Rain),
            ("cloud", Sky::Cloud),
            ("sun", Sky::Sun),
            ("snow", Sky::Snow),
            ("storm", Sky::Storm),
            ("haze", Sky::Haze),
        ]
        .into_iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map_or(Sky::Fog, |(_, sky)| sky)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn classify(phase: &str) -> Self {
        [
            ("New", MoonPhase::New),
            ("Waxing Crescent", MoonPhase::WaxingCrescent),
            ("First Quarter", MoonPhase::FirstQuarter),
            ("Waxing Gibbous", MoonPhase::WaxingGibbous),
            ("Full", MoonPhase::Full),
            ("Waning Gibbous", MoonPhase::WaningGibbous),
            ("Last Quarter", MoonPhase::LastQuarter),
            ("Waning Crescent", MoonPhase::WaningCrescent),
        ]
        .into_iter()
        .find(|(keyword, _)| phase.contains(keyword))
        .map_or(MoonPhase::New, |(_, moon)| moon)
    }
}
