use anyhow::{Context, Result};
use breeze_core::{Config, Coordinates, provider::wttr::WttrSource};
use inquire::Text;

use crate::session::prompt;

/// Prompt on a blocking thread; `None` when cancelled.
async fn ask(message: &'static str, default: String) -> Result<Option<String>> {
    prompt(move || Text::new(message).with_default(&default).prompt()).await
}

pub async fn run(mut config: Config) -> Result<()> {
    let Some(endpoint) = ask("Weather endpoint:", config.endpoint().to_string()).await? else {
        return cancelled();
    };

    let home = config.home.clone().unwrap_or_default();
    let Some(home) = ask("Home coordinates (lat,lon), empty for none:", home).await? else {
        return cancelled();
    };

    let cities = config.top_cities().join(", ");
    let Some(cities) = ask("Top cities, comma separated:", cities).await? else {
        return cancelled();
    };

    apply_answers(&mut config, &endpoint, &home, &cities)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn cancelled() -> Result<()> {
    println!("Configuration cancelled, nothing saved.");
    Ok(())
}

fn apply_answers(config: &mut Config, endpoint: &str, home: &str, cities: &str) -> Result<()> {
    let endpoint = endpoint.trim();
    config.endpoint = if endpoint.is_empty() {
        None
    } else {
        WttrSource::new(endpoint)?;
        Some(endpoint.to_string())
    };

    let home = home.trim();
    let home = if home.is_empty() {
        None
    } else {
        Some(home.parse::<Coordinates>().context("Invalid home coordinates")?)
    };
    config.set_home(home);

    config.top_cities = Some(
        cities
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_applied() {
        let mut cfg = Config::default();
        apply_answers(&mut cfg, " http://localhost:9000 ", "28.61, 77.2", "Delhi, ,Pune ").unwrap();

        assert_eq!(cfg.endpoint(), "http://localhost:9000");
        assert_eq!(cfg.home.as_deref(), Some("28.61,77.2"));
        assert_eq!(cfg.top_cities(), ["Delhi", "Pune"]);
    }

    #[test]
    fn blank_answers_clear_optional_values() {
        let mut cfg = Config { home: Some("1,2".into()), ..Config::default() };
        apply_answers(&mut cfg, "", "", "").unwrap();

        assert!(cfg.endpoint.is_none());
        assert!(cfg.home.is_none());
        assert!(cfg.top_cities().is_empty());
    }

    #[test]
    fn invalid_answers_are_rejected() {
        let mut cfg = Config::default();
        assert!(apply_answers(&mut cfg, "nope", "", "Delhi").is_err());
        assert!(apply_answers(&mut cfg, "https://wttr.in", "north", "Delhi").is_err());
    }
}
