use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::model::{Celsius, Coordinates, WeatherCondition, WeatherReport};

use super::{WeatherError, WeatherProvider};

/// OpenWeather current-weather client.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    url_template: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `url_template` must contain `{latitude}`, `{longitude}` and
    /// `{api_key}` placeholders.
    ///
    /// `accept_invalid_certs` disables TLS certificate verification for this
    /// client only; it should stay off outside of intercepting-proxy setups.
    pub fn new(
        url_template: impl Into<String>,
        api_key: String,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            url_template: url_template.into(),
            api_key,
            http,
        })
    }

    fn build_url(&self, coordinates: Coordinates) -> String {
        self.url_template
            .replace("{latitude}", &coordinates.latitude.to_string())
            .replace("{longitude}", &coordinates.longitude.to_string())
            .replace("{api_key}", &self.api_key)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherError> {
        let url = self.build_url(coordinates);
        debug!(lat = coordinates.latitude, lon = coordinates.longitude, "fetching current weather");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await?;
        let parsed: OwResponse = serde_json::from_str(&body)?;

        report_from(parsed)
    }
}

/// Map the decoded OpenWeather payload into a [`WeatherReport`].
///
/// Every field must resolve; a partial report is never produced.
fn report_from(raw: OwResponse) -> Result<WeatherReport, WeatherError> {
    let code = raw
        .weather
        .first()
        .ok_or(WeatherError::MissingField("weather"))?
        .id;
    let condition = WeatherCondition::from_code(code).ok_or(WeatherError::UnknownCondition(code))?;

    Ok(WeatherReport {
        temperature: round_celsius(raw.main.temp),
        condition,
        sunrise: local_timestamp(raw.sys.sunrise)?,
        sunset: local_timestamp(raw.sys.sunset)?,
        city: raw.name,
    })
}

/// Round to the nearest whole degree; readings exactly at `.5` round away
/// from zero.
fn round_celsius(temp: f64) -> Celsius {
    temp.round() as Celsius
}

fn local_timestamp(ts: i64) -> Result<DateTime<Local>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or(WeatherError::BadTimestamp(ts))
}
