use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Closed set of icon categories used to pick a display glyph.
///
/// Serialized names match the animated-icon asset identifiers
/// (`CLEAR_DAY`, `CLOUDY`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Icon {
    #[default]
    ClearDay,
    Cloudy,
    Rain,
    Snow,
    Wind,
    Sleet,
    Fog,
}

impl Icon {
    /// Map a provider condition label to an icon category.
    ///
    /// Total over all inputs: unrecognized labels fall back to `ClearDay`.
    pub fn from_condition(label: &str) -> Self {
        match label {
            "Haze" => Icon::ClearDay,
            "Clouds" => Icon::Cloudy,
            "Rain" => Icon::Rain,
            "Snow" => Icon::Snow,
            "Dust" | "Tornado" => Icon::Wind,
            "Drizzle" => Icon::Sleet,
            "Fog" | "Smoke" => Icon::Fog,
            _ => Icon::ClearDay,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            Icon::ClearDay => "CLEAR_DAY",
            Icon::Cloudy => "CLOUDY",
            Icon::Rain => "RAIN",
            Icon::Snow => "SNOW",
            Icon::Wind => "WIND",
            Icon::Sleet => "SLEET",
            Icon::Fog => "FOG",
        }
    }
}

/// Complete display state from one successful fetch.
///
/// Snapshots are built in one shot and replaced wholesale; no field is
/// ever mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub coordinates: Coordinates,
    pub city: String,
    pub country: String,
    /// Provider-defined condition label, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub icon: Icon,
}

impl WeatherSnapshot {
    /// Build a snapshot from a raw Celsius observation.
    pub fn from_observation(
        coordinates: Coordinates,
        city: String,
        country: String,
        condition: String,
        celsius: f64,
    ) -> Self {
        Self {
            coordinates,
            icon: Icon::from_condition(&condition),
            temperature_c: celsius.round() as i32,
            // Fahrenheit comes from the unrounded Celsius reading.
            temperature_f: (celsius * 1.8 + 32.0).round() as i32,
            city,
            country,
            condition,
        }
    }
}
