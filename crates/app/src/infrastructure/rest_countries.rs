//! REST Countries directory client (v3.1 API)

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use countrylist_domain::{common::first_or_unknown, Country, CountryName};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::ports::outbound::{DirectoryError, DirectoryPort};

/// Production REST Countries base URL.
pub const PRODUCTION_BASE_URL: &str = "https://restcountries.com/v3.1/";

/// Staging REST Countries base URL.
pub const STAGING_BASE_URL: &str = "https://staging.restcountries.com/v3.1/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Only the fields the shortlist needs; the full payload is several MB.
const ALL_FIELDS: &str = "name,capital,currencies";

/// Which hosted directory to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryServer {
    #[default]
    Production,
    Staging,
}

impl DirectoryServer {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Staging => STAGING_BASE_URL,
        }
    }
}

impl FromStr for DirectoryServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            other => Err(format!("unknown directory server: {other}")),
        }
    }
}

/// Client for the REST Countries `all` endpoint
#[derive(Clone)]
pub struct RestCountriesClient {
    client: Client,
    all_url: Url,
}

impl RestCountriesClient {
    /// Build a client for `base_url` (e.g. `https://restcountries.com/v3.1/`).
    ///
    /// # Errors
    ///
    /// `DirectoryError::Request` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            all_url: all_url(base_url)?,
        })
    }

    pub fn for_server(server: DirectoryServer, timeout: Duration) -> Result<Self, DirectoryError> {
        Self::new(server.base_url(), timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.all_url
    }
}

fn all_url(base_url: &str) -> Result<Url, DirectoryError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let mut url = Url::parse(&base)
        .and_then(|b| b.join("all"))
        .map_err(|e| DirectoryError::request(format!("invalid directory URL {base_url:?}: {e}")))?;
    url.query_pairs_mut().append_pair("fields", ALL_FIELDS);
    Ok(url)
}

#[async_trait]
impl DirectoryPort for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, DirectoryError> {
        tracing::debug!(url = %self.all_url, "Fetching country directory");

        let response = self
            .client
            .get(self.all_url.clone())
            .send()
            .await
            .map_err(DirectoryError::request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(DirectoryError::request)?;
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(DirectoryError::request)?;
        let countries = decode_countries(&body)?;
        tracing::info!(count = countries.len(), "Country directory fetched");
        Ok(countries)
    }
}

/// Decode an `all` response body into countries, in response order.
///
/// Entries without a usable common name cannot be identified and are skipped.
pub fn decode_countries(body: &[u8]) -> Result<Vec<Country>, DirectoryError> {
    let entries: Vec<RestCountry> =
        serde_json::from_slice(body).map_err(DirectoryError::decode)?;

    let mut countries = Vec::with_capacity(entries.len());
    for entry in entries {
        match convert_country(entry) {
            Ok(country) => countries.push(country),
            Err(e) => tracing::warn!(error = %e, "Skipping unnamed directory entry"),
        }
    }
    Ok(countries)
}

fn convert_country(entry: RestCountry) -> Result<Country, countrylist_domain::DomainError> {
    let name = CountryName::new(entry.name.common)?;
    let capital = first_or_unknown(entry.capital.unwrap_or_default());
    let currency = first_or_unknown(
        entry
            .currencies
            .unwrap_or_default()
            .into_values()
            .take(1)
            .map(|c| c.name.unwrap_or_default()),
    );

    Ok(Country::new(name)
        .with_official_name(&entry.name.official)
        .with_capital(&capital)
        .with_currency_name(&currency))
}

// =============================================================================
// REST Countries API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RestCountry {
    name: RestName,
    #[serde(default)]
    capital: Option<Vec<String>>,
    /// Keyed by ISO 4217 code; BTreeMap makes "first" deterministic.
    #[serde(default)]
    currencies: Option<BTreeMap<String, RestCurrency>>,
}

#[derive(Debug, Deserialize)]
struct RestName {
    common: String,
    #[serde(default)]
    official: String,
}

#[derive(Debug, Deserialize)]
struct RestCurrency {
    #[serde(default)]
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::RawQuery, http::StatusCode, routing::get, Router};
    use countrylist_domain::common::UNKNOWN;

    const SAMPLE: &str = r#"[
        {
            "name": {"common": "Egypt", "official": "Arab Republic of Egypt", "nativeName": {}},
            "currencies": {"EGP": {"name": "Egyptian pound", "symbol": "£"}},
            "capital": ["Cairo"]
        },
        {
            "name": {"common": "Antarctica", "official": "Antarctica"},
            "currencies": {},
            "capital": []
        },
        {
            "name": {"common": "Zimbabwe", "official": "Republic of Zimbabwe"},
            "currencies": {"ZWL": {"name": "Zimbabwean dollar", "symbol": "$"},
                           "BWP": {"name": "Botswana pula", "symbol": "P"}},
            "capital": ["Harare"]
        },
        {
            "name": {"common": "Heard Island", "official": "Heard Island and McDonald Islands"}
        },
        {
            "name": {"common": "  ", "official": "Nameless"}
        }
    ]"#;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v3.1")
    }

    mod decoding {
        use super::*;

        #[test]
        fn maps_directory_shape_to_countries() {
            let countries = decode_countries(SAMPLE.as_bytes()).unwrap();
            let names: Vec<_> = countries
                .iter()
                .map(|c| c.common_name().as_str())
                .collect();
            assert_eq!(names, vec!["Egypt", "Antarctica", "Zimbabwe", "Heard Island"]);

            let egypt = &countries[0];
            assert_eq!(egypt.official_name(), "Arab Republic of Egypt");
            assert_eq!(egypt.capital(), "Cairo");
            assert_eq!(egypt.currency_name(), "Egyptian pound");
        }

        #[test]
        fn absent_capital_and_currency_are_unknown() {
            let countries = decode_countries(SAMPLE.as_bytes()).unwrap();
            for name in ["Antarctica", "Heard Island"] {
                let country = countries.iter().find(|c| c.is_named(name)).unwrap();
                assert_eq!(country.capital(), UNKNOWN);
                assert_eq!(country.currency_name(), UNKNOWN);
            }
        }

        #[test]
        fn first_currency_is_chosen_by_code() {
            let countries = decode_countries(SAMPLE.as_bytes()).unwrap();
            let zimbabwe = countries.iter().find(|c| c.is_named("Zimbabwe")).unwrap();
            assert_eq!(zimbabwe.currency_name(), "Botswana pula");
        }

        #[test]
        fn malformed_body_is_a_decode_error() {
            assert!(matches!(
                decode_countries(b"{\"status\":404}"),
                Err(DirectoryError::Decode(_))
            ));
            assert!(matches!(
                decode_countries(b"[{\"capital\":[\"x\"]}]"),
                Err(DirectoryError::Decode(_))
            ));
        }
    }

    mod urls {
        use super::*;

        #[test]
        fn endpoint_is_built_with_field_filter() {
            let client =
                RestCountriesClient::for_server(DirectoryServer::Production, Duration::from_secs(1))
                    .unwrap();
            assert_eq!(
                client.endpoint().as_str(),
                "https://restcountries.com/v3.1/all?fields=name%2Ccapital%2Ccurrencies"
            );
        }

        #[test]
        fn base_without_trailing_slash_keeps_version_segment() {
            let client =
                RestCountriesClient::new("http://localhost:9000/v3.1", Duration::from_secs(1))
                    .unwrap();
            assert_eq!(client.endpoint().path(), "/v3.1/all");
        }

        #[test]
        fn relative_base_is_rejected() {
            assert!(matches!(
                RestCountriesClient::new("restcountries", Duration::from_secs(1)),
                Err(DirectoryError::Request(_))
            ));
        }

        #[test]
        fn server_names_parse() {
            assert_eq!("Staging".parse::<DirectoryServer>(), Ok(DirectoryServer::Staging));
            assert_eq!("prod".parse::<DirectoryServer>(), Ok(DirectoryServer::Production));
            assert!("qa".parse::<DirectoryServer>().is_err());
        }
    }

    mod http {
        use super::*;

        #[tokio::test]
        async fn fetches_and_decodes_catalog() {
            let router = Router::new().route(
                "/v3.1/all",
                get(|RawQuery(query): RawQuery| async move {
                    assert_eq!(query.as_deref(), Some("fields=name%2Ccapital%2Ccurrencies"));
                    SAMPLE
                }),
            );
            let base = serve(router).await;

            let client = RestCountriesClient::new(&base, Duration::from_secs(5)).unwrap();
            let countries = client.fetch_all().await.unwrap();
            assert_eq!(countries.len(), 4);
        }

        #[tokio::test]
        async fn non_success_status_is_reported() {
            let router = Router::new().route(
                "/v3.1/all",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            );
            let base = serve(router).await;

            let client = RestCountriesClient::new(&base, Duration::from_secs(5)).unwrap();
            let err = client.fetch_all().await.unwrap_err();
            assert_eq!(
                err,
                DirectoryError::Status {
                    status: 503,
                    body: "maintenance".to_string()
                }
            );
        }

        #[tokio::test]
        async fn unreachable_server_is_a_request_error() {
            // Bind then drop to get a port nobody listens on.
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let client =
                RestCountriesClient::new(&format!("http://{addr}/v3.1/"), Duration::from_secs(2))
                    .unwrap();
            assert!(matches!(
                client.fetch_all().await,
                Err(DirectoryError::Request(_))
            ));
        }
    }
}
