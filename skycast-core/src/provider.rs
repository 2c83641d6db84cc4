use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::{
    Config,
    model::{Coordinates, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Errors raised while fetching or decoding weather data.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("could not reach the weather service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather service answered with status {0}")]
    Status(StatusCode),

    #[error("weather service returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response is missing '{0}'")]
    MissingField(&'static str),

    #[error("timestamp {0} in weather response is out of range")]
    BadTimestamp(i64),

    #[error("unrecognized weather condition code {0}")]
    UnknownCondition(u16),
}

/// A source of current weather for a coordinate pair.
///
/// Keeping this behind a trait lets tests substitute a canned implementation
/// without touching the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherError>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key."
        )
    })?;

    let provider = OpenWeatherProvider::new(
        config.weather_url.clone(),
        api_key,
        config.request_timeout(),
        config.accept_invalid_certs,
    )?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[derive(Debug)]
    struct StubProvider;

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn get_weather(
            &self,
            _coordinates: Coordinates,
        ) -> Result<WeatherReport, WeatherError> {
            Ok(WeatherReport {
                temperature: 20,
                condition: crate::model::WeatherCondition::Clear,
                sunrise: Local.timestamp_opt(1_651_630_800, 0).unwrap(),
                sunset: Local.timestamp_opt(1_651_686_300, 0).unwrap(),
                city: "Moscow".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn stub_provider_works_through_the_trait_object() {
        let provider: Box<dyn WeatherProvider> = Box::new(StubProvider);
        let coords = Coordinates {
            latitude: 55.75,
            longitude: 37.62,
        };

        let report = provider.get_weather(coords).await.expect("stub never fails");
        assert_eq!(report.city, "Moscow");
        assert_eq!(report.temperature, 20);
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_present() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            ..Config::default()
        };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
