use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use weather_core::{Config, WeatherLookup};

use crate::render::{self, Panel};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city and/or postal code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit service endpoints and the country filter.
    Configure,

    /// Show current weather for a city and/or postal code.
    Show {
        /// City, town or village name.
        #[arg(long)]
        city: Option<String>,

        /// Postal code.
        #[arg(long)]
        zip: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep asking for a city and postal code until cancelled (Esc / Ctrl-C).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, zip, json } => show(city, zip, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

async fn show(city: Option<String>, zip: Option<String>, json: bool) -> anyhow::Result<()> {
    let lookup = WeatherLookup::from_config(&Config::load()?)?;

    let result = lookup.search(city.as_deref(), zip.as_deref()).await;

    match render::outcome(&result, json)? {
        Panel::Result(text) => println!("{text}"),
        Panel::Error(text) => {
            eprintln!("{text}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let lookup = WeatherLookup::from_config(&Config::load()?)?;

    loop {
        let Some(city) = prompt("City")? else { break };
        let Some(zip) = prompt("Postal code")? else { break };

        let result = lookup.search(Some(city.as_str()), Some(zip.as_str())).await;

        match render::outcome(&result, false)? {
            Panel::Result(text) => println!("{text}\n"),
            Panel::Error(text) => eprintln!("{text}\n"),
        }
    }

    Ok(())
}

/// `None` once the user cancels the form.
fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    match Text::new(label).with_help_message("leave empty to skip").prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read input"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.geocoding_url = Text::new("Geocoding endpoint")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    config.weather_url = Text::new("Weather endpoint")
        .with_default(&config.weather_url)
        .prompt()
        .context("Failed to read weather endpoint")?;

    let countries = Text::new("Country codes (comma separated)")
        .with_default(&config.country_filter())
        .prompt()
        .context("Failed to read country codes")?;
    config.set_country_codes(&countries)?;

    config.user_agent = Text::new("User agent")
        .with_default(&config.user_agent)
        .prompt()
        .context("Failed to read user agent")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
