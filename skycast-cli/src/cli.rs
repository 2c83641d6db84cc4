use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, IpLocator, WeatherReport, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather for wherever you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Print the coordinates resolved from your IP address.
    Locate,

    /// Show current weather at your location.
    Show,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Locate => locate().await,
            Command::Show => show().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = Some(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn locate() -> anyhow::Result<()> {
    let config = Config::load()?;
    let locator = IpLocator::from_config(&config)?;

    let coordinates = locator.resolve().await?;
    println!("{:.4}, {:.4}", coordinates.latitude, coordinates.longitude);

    Ok(())
}

async fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    let locator = IpLocator::from_config(&config)?;
    let provider = provider_from_config(&config)?;

    let coordinates = locator.resolve().await?;
    let report = provider.get_weather(coordinates).await?;

    println!("{}", render(&report));
    Ok(())
}

fn render(report: &WeatherReport) -> String {
    format!(
        "{}: {}°C, {}\nSunrise: {}\nSunset: {}",
        report.city,
        report.temperature,
        report.condition,
        report.sunrise.format("%H:%M"),
        report.sunset.format("%H:%M"),
    )
}
