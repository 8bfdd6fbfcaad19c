use crate::{
    Config,
    model::{Coordinates, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current-weather observations for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coordinates: Coordinates) -> anyhow::Result<WeatherSnapshot>;
}

/// Construct the configured provider.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-widget configure` and enter your OpenWeatherMap API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(config.base_url.clone(), api_key.to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.api_key = Some("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
