use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_core::{
    Config, Units, WeatherProvider,
    extract::{format_timestamp, local_time},
    extract_observation,
    provider::provider_from_config,
};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Current weather lookups in the browser")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server (default).
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:8080".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Print current weather for a city without starting the server.
    Show {
        city: String,

        /// "metric", "imperial" or anything else for Kelvin.
        #[arg(long, default_value = "metric")]
        units: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command.unwrap_or(Command::Serve { bind: None }) {
            Command::Serve { bind } => server::serve(&config, bind.as_deref()).await?,
            Command::Configure => {
                let key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.set_api_key(key.trim().to_string());
                config.save()?;

                println!("Saved API key to {}", Config::config_file_path()?.display());
            }
            Command::Show { city, units } => {
                let provider: Box<dyn WeatherProvider> = provider_from_config(&config)?;
                let units = Units::from(units.as_str());

                let payload = provider
                    .current_weather(&city, &units)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))
                    .with_context(|| format!("Lookup for '{city}' failed"))?;
                let obs = extract_observation(&payload);
                let letter = units.letter();

                let sunrise = local_time(obs.sunrise.unwrap_or(0));
                let sunset = local_time(obs.sunset.unwrap_or(0));

                println!("{} ({})", obs.name, format_timestamp(&Local::now()));
                println!("  {}", obs.description);
                println!("  Temperature: {} °{letter}", obs.temperature);
                println!("  Humidity:    {}%", obs.humidity);
                println!("  Wind speed:  {}", obs.wind_speed);
                println!("  Sunrise:     {}", format_timestamp(&sunrise));
                println!("  Sunset:      {}", format_timestamp(&sunset));
            }
        }

        Ok(())
    }
}
