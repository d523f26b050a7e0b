//! Location adapters
//!
//! `IpGeolocation` asks an IP geolocation service which country the host is
//! in. `FixedLocation` answers from configuration and never touches the
//! network.

use std::time::Duration;

use async_trait::async_trait;
use countrylist_domain::common::non_blank;
use reqwest::Client;
use serde::Deserialize;

use crate::ports::outbound::LocationPort;

/// Default geolocation endpoint.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Resolves the host country through an HTTP geolocation lookup
#[derive(Clone)]
pub struct IpGeolocation {
    client: Client,
    url: String,
}

impl IpGeolocation {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    async fn lookup(&self) -> Result<GeoResponse, String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| format!("geolocation request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("geolocation returned HTTP {}", response.status()));
        }

        response
            .json::<GeoResponse>()
            .await
            .map_err(|e| format!("geolocation response unreadable: {e}"))
    }
}

#[async_trait]
impl LocationPort for IpGeolocation {
    async fn resolve_country(&self) -> Option<String> {
        match self.lookup().await {
            Ok(GeoResponse {
                country_name: Some(name),
            }) => {
                let name = non_blank(&name).map(str::to_string);
                tracing::debug!(country = ?name, "Geolocation resolved");
                name
            }
            Ok(_) => {
                tracing::debug!("Geolocation response carried no country");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %self.url, "Could not resolve device country");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    country_name: Option<String>,
}

/// Location that always answers with the configured country, or nothing
#[derive(Debug, Clone, Default)]
pub struct FixedLocation(Option<String>);

impl FixedLocation {
    pub fn new(country: Option<String>) -> Self {
        Self(country.and_then(|c| non_blank(&c).map(str::to_string)))
    }

    pub fn unknown() -> Self {
        Self(None)
    }
}

#[async_trait]
impl LocationPort for FixedLocation {
    async fn resolve_country(&self) -> Option<String> {
        self.0.clone()
    }
}
