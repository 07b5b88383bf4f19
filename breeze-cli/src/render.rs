//! Plain-text rendering of session state for the terminal.

use std::fmt::Write;

use breeze_core::{CityWeather, Field, MoonPhase, Sky, WeatherRecord, format_clock, format_time};
use chrono::Local;

fn sky_glyph(sky: Sky) -> &'static str {
    match sky {
        Sky::Rain => "🌧",
        Sky::Cloud => "☁",
        Sky::Sun => "☀",
        Sky::Snow => "❄",
        Sky::Storm => "⛈",
        Sky::Haze => "🌫",
        Sky::Fog => "🌁",
    }
}

fn moon_glyph(moon: MoonPhase) -> &'static str {
    match moon {
        MoonPhase::New => "🌑",
        MoonPhase::WaxingCrescent => "🌒",
        MoonPhase::FirstQuarter => "🌓",
        MoonPhase::WaxingGibbous => "🌔",
        MoonPhase::Full => "🌕",
        MoonPhase::WaningGibbous => "🌖",
        MoonPhase::LastQuarter => "🌗",
        MoonPhase::WaningCrescent => "🌘",
    }
}

pub fn field_glyph(field: &str, value: &str) -> &'static str {
    match Field::try_from(field) {
        Ok(Field::Condition) => sky_glyph(Sky::classify(value)),
        Ok(Field::MoonPhase) => moon_glyph(MoonPhase::classify(value)),
        Ok(Field::Location) => "📍",
        Ok(Field::Temperature) => "🌡",
        Ok(Field::FeelsLike) => "🤒",
        Ok(Field::Humidity) => "💧",
        Ok(Field::WindSpeed) => "💨",
        Ok(Field::Precipitation) => "☔",
        Ok(Field::Pressure) => "⏲",
        Ok(Field::UvIndex) => "🔆",
        Ok(Field::Sunrise) => "🌅",
        Ok(Field::Sunset) => "🌇",
        Ok(Field::CurrentTime) => "🕒",
        Err(_) => "•",
    }
}

/// Location header, compact clock line, then every other field.
pub fn weather(record: &WeatherRecord) -> String {
    let current_time = Field::CurrentTime.label();
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}", record.location().unwrap_or(breeze_core::NOT_AVAILABLE));
    if let Some(raw) = record.get(current_time) {
        let _ = writeln!(out, "🕒 {}", format_clock(raw));
    }
    out.push('\n');

    for entry in record.iter().filter(|e| e.field != Field::Location.label()) {
        let value = if entry.field == current_time {
            format_time(&entry.value)
        } else {
            entry.value.clone()
        };
        let _ = writeln!(
            out,
            "  {} {:<14} {}",
            field_glyph(&entry.field, &entry.value),
            entry.field,
            value
        );
    }

    let _ = writeln!(out, "\nFetched at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    out
}

pub fn cities(list: &[CityWeather]) -> String {
    if list.is_empty() {
        return "No city weather available.\n".to_string();
    }

    let width = list.iter().map(|c| c.city.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for city in list {
        let _ = writeln!(
            out,
            "  {} {:<width$}  {:<8}  {}",
            sky_glyph(Sky::classify(&city.condition)),
            city.city,
            city.temperature,
            city.condition,
        );
    }
    out
}

pub fn recent(list: &[String]) -> String {
    if list.is_empty() {
        return "No recent searches.\n".to_string();
    }

    list.iter().enumerate().fold(String::new(), |mut out, (i, location)| {
        let _ = writeln!(out, "{:>3}. {location}", i + 1);
        out
    })
}
