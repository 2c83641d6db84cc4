use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Whole-degree Celsius temperature.
pub type Celsius = i32;

/// A latitude/longitude pair, as resolved from the caller's IP address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather condition categories mapped from OpenWeather condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Clear,
    Fog,
    Clouds,
}

impl WeatherCondition {
    /// Map an OpenWeather condition code to a category.
    ///
    /// Codes outside the recognized groups yield `None`; callers treat that
    /// as an error rather than falling back to a default category.
    /// See: <https://openweathermap.org/weather-conditions>
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200..=232 => Some(Self::Thunderstorm),
            300..=321 => Some(Self::Drizzle),
            500..=531 => Some(Self::Rain),
            600..=622 => Some(Self::Snow),
            701..=781 => Some(Self::Fog),
            800 => Some(Self::Clear),
            801..=804 => Some(Self::Clouds),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Clear => "Clear",
            Self::Fog => "Fog",
            Self::Clouds => "Clouds",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Current conditions at a location, normalized across the provider's
/// response shape. Constructed once per lookup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: Celsius,
    pub condition: WeatherCondition,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_thunderstorm_range() {
        assert_eq!(
            WeatherCondition::from_code(200),
            Some(WeatherCondition::Thunderstorm)
        );
        assert_eq!(
            WeatherCondition::from_code(232),
            Some(WeatherCondition::Thunderstorm)
        );
    }

    #[test]
    fn code_drizzle_range() {
        assert_eq!(
            WeatherCondition::from_code(300),
            Some(WeatherCondition::Drizzle)
        );
        assert_eq!(
            WeatherCondition::from_code(321),
            Some(WeatherCondition::Drizzle)
        );
    }

    #[test]
    fn code_rain_range() {
        assert_eq!(
            WeatherCondition::from_code(500),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(
            WeatherCondition::from_code(511),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(
            WeatherCondition::from_code(531),
            Some(WeatherCondition::Rain)
        );
    }

    #[test]
    fn code_snow_range() {
        assert_eq!(
            WeatherCondition::from_code(600),
            Some(WeatherCondition::Snow)
        );
        assert_eq!(
            WeatherCondition::from_code(622),
            Some(WeatherCondition::Snow)
        );
    }

    #[test]
    fn code_fog_range() {
        assert_eq!(
            WeatherCondition::from_code(701),
            Some(WeatherCondition::Fog)
        );
        assert_eq!(
            WeatherCondition::from_code(741),
            Some(WeatherCondition::Fog)
        );
        assert_eq!(
            WeatherCondition::from_code(781),
            Some(WeatherCondition::Fog)
        );
    }

    #[test]
    fn code_clear_is_exactly_800() {
        assert_eq!(
            WeatherCondition::from_code(800),
            Some(WeatherCondition::Clear)
        );
    }

    #[test]
    fn code_clouds_range() {
        assert_eq!(
            WeatherCondition::from_code(801),
            Some(WeatherCondition::Clouds)
        );
        assert_eq!(
            WeatherCondition::from_code(804),
            Some(WeatherCondition::Clouds)
        );
    }

    #[test]
    fn unknown_codes_have_no_category() {
        assert_eq!(WeatherCondition::from_code(0), None);
        assert_eq!(WeatherCondition::from_code(100), None);
        assert_eq!(WeatherCondition::from_code(233), None);
        assert_eq!(WeatherCondition::from_code(405), None);
        assert_eq!(WeatherCondition::from_code(782), None);
        assert_eq!(WeatherCondition::from_code(805), None);
        assert_eq!(WeatherCondition::from_code(999), None);
    }

    #[test]
    fn condition_display_matches_description() {
        assert_eq!(WeatherCondition::Clear.to_string(), "Clear");
        assert_eq!(WeatherCondition::Thunderstorm.to_string(), "Thunderstorm");
    }
}
