use anyhow::{Context, anyhow};
use breeze_core::{Config, Coordinates, FileStore, RecentSearches};
use clap::{Parser, Subcommand};

use crate::{configure, render, session::{self, Session}};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "breeze", version, about = "Breeze weather CLI")]
pub struct Cli {
    /// Runs the interactive session when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the endpoint, home coordinates and top cities.
    Configure,

    /// Show weather for a location.
    Show {
        /// Place name or "lat,lon". Defaults to the configured home coordinates.
        location: Option<String>,

        /// Look up these coordinates instead of a place name.
        #[arg(
            long,
            value_name = "LAT,LON",
            conflicts_with = "location",
            allow_hyphen_values = true
        )]
        at: Option<Coordinates>,

        /// Print the parsed fields as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show condition and temperature for the configured top cities.
    Top {
        #[arg(long)]
        json: bool,
    },

    /// List recent searches, most recent first.
    Recent,

    /// Remove a location from recent searches.
    Forget {
        location: String,
    },

    /// Interactive session: search, revisit recent searches, top cities.
    Interactive {
        /// Starting coordinates; defaults to the configured home.
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        at: Option<Coordinates>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Some(Command::Configure) => configure::run(config).await?,
            Some(Command::Show { location, at, json }) => {
                let location = resolve_location(location, at, &config)?;

                let mut session = Session::open(&config)?;
                session.fetch_weather(&location);
                session.settle().await;

                let record = session.state.weather().ok_or_else(|| {
                    anyhow!(
                        "Could not fetch weather for '{location}'. \
                         Run with RUST_LOG=debug for details."
                    )
                })?;

                if json {
                    println!("{}", serde_json::to_string_pretty(record)?);
                } else {
                    print!("{}", render::weather(record));
                }
            }
            Some(Command::Top { json }) => {
                let cities = config.top_cities();
                if cities.is_empty() {
                    println!("No top cities configured.");
                    return Ok(());
                }

                let mut session = Session::open(&config)?;
                session.fetch_top_cities(cities);
                session.settle().await;

                if session.state.cities().is_empty() {
                    return Err(anyhow!("Could not fetch weather for the top cities."));
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(session.state.cities())?);
                } else {
                    print!("{}", render::cities(session.state.cities()));
                }
            }
            Some(Command::Recent) => {
                let recent = RecentSearches::load(Box::new(FileStore::open_default()?));
                print!("{}", render::recent(recent.all()));
            }
            Some(Command::Forget { location }) => {
                let mut recent = RecentSearches::load(Box::new(FileStore::open_default()?));
                let known = recent.contains(&location);
                recent.remove(&location)?;

                if known {
                    println!("Removed '{location}' from recent searches.");
                } else {
                    println!("'{location}' was not in recent searches.");
                }
            }
            Some(Command::Interactive { at }) => session::run_interactive(&config, at).await?,
            None => session::run_interactive(&config, None).await?,
        }

        Ok(())
    }
}

fn resolve_location(
    location: Option<String>,
    at: Option<Coordinates>,
    config: &Config,
) -> anyhow::Result<String> {
    if let Some(location) = location {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Location must not be empty."));
        }
        return Ok(trimmed.to_string());
    }

    if let Some(coords) = at {
        return Ok(coords.to_string());
    }

    let home = config.home_coordinates()?.context(
        "No location given and no home coordinates configured.\n\
         Hint: pass a location, use `--at LAT,LON`, or run `breeze configure`.",
    )?;
    Ok(home.to_string())
}
