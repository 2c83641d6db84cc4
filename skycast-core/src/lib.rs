//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Coordinate resolution from IP-based geolocation
//! - Abstraction over weather providers and the OpenWeather implementation
//! - Shared domain models
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use location::{IpLocator, LocationError};
pub use model::{Celsius, Coordinates, WeatherCondition, WeatherReport};
pub use provider::{WeatherError, WeatherProvider, provider_from_config};
