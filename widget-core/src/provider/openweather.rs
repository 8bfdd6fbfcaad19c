use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, WeatherSnapshot};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is the endpoint prefix up to and including the trailing
    /// slash, e.g. `https://api.openweathermap.org/data/2.5/`.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        let url = format!("{}weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("lat", coordinates.latitude), ("lon", coordinates.longitude)])
            .query(&[("units", "metric"), ("APPID", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        // Missing weather entry maps to the ClearDay default downstream.
        let condition = parsed
            .weather
            .first()
            .map(|w| w.main.clone())
            .unwrap_or_default();

        Ok(WeatherSnapshot::from_observation(
            coordinates,
            parsed.name,
            parsed.sys.country,
            condition,
            parsed.main.temp,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        self.fetch_current(coordinates).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Icon;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DELHI: Coordinates = Coordinates { latitude: 28.67, longitude: 77.22 };

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new(format!("{}/", server.uri()), "KEY".to_string())
    }

    #[tokio::test]
    async fn maps_current_weather_into_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "28.67"))
            .and(query_param("lon", "77.22"))
            .and(query_param("units", "metric"))
            .and(query_param("APPID", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"weather":[{"main":"Rain"}],"name":"Delhi","main":{"temp":30},"sys":{"country":"IN"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let snapshot = provider_for(&server).current(DELHI).await.expect("fetch succeeds");

        assert_eq!(snapshot.city, "Delhi");
        assert_eq!(snapshot.country, "IN");
        assert_eq!(snapshot.condition, "Rain");
        assert_eq!(snapshot.temperature_c, 30);
        assert_eq!(snapshot.temperature_f, 86);
        assert_eq!(snapshot.icon, Icon::Rain);
        assert_eq!(snapshot.coordinates, DELHI);
    }

    #[tokio::test]
    async fn empty_weather_array_yields_clear_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"weather":[],"name":"Delhi","main":{"temp":21.7},"sys":{"country":"IN"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let snapshot = provider_for(&server).current(DELHI).await.expect("fetch succeeds");

        assert_eq!(snapshot.condition, "");
        assert_eq!(snapshot.icon, Icon::ClearDay);
        assert_eq!(snapshot.temperature_c, 22);
        assert_eq!(snapshot.temperature_f, 71);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_raw(r#"{"cod":401,"message":"Invalid API key"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).current(DELHI).await.unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("failed with status"));
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
            .mount(&server)
            .await;

        let err = provider_for(&server).current(DELHI).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
