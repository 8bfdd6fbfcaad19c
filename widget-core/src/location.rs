use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{error::LocationError, model::Coordinates};

/// Asynchronous source of the user's current coordinates.
///
/// One-shot by contract: the widget asks exactly once at mount.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

const IP_API_URL: &str = "http://ip-api.com/json/";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// GeoIP locator: resolves coordinates from the caller's public IP.
///
/// The terminal stand-in for a platform geolocation capability.
#[derive(Debug, Clone)]
pub struct IpLocator {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new() -> Result<Self, LocationError> {
        Self::with_endpoint(IP_API_URL.to_string())
    }

    /// Point the locator at a different endpoint (mock servers in tests).
    pub fn with_endpoint(endpoint: String) -> Result<Self, LocationError> {
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.endpoint).send().await.map_err(|e| {
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::ServiceUnavailable
            }
        })?;

        if !res.status().is_success() {
            return Err(LocationError::ServiceUnavailable);
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Other(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::Other(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!(latitude, longitude, "resolved location from GeoIP");
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(LocationError::Other("response missing coordinates".to_string())),
        }
    }
}
