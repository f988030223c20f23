use crate::{config::ApiConfig, error::Error, model::WeatherReport, token::TokenCache};
use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use tracing::info;

/// Abstraction over the remote weather service, the seam the poller is
/// tested against.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch the server-authoritative list of city names the service can
    /// report on.
    async fn list_valid_cities(&self) -> Result<Vec<String>, Error>;

    /// Fetch the current weather report for one city.
    async fn city_weather(&self, city: &str) -> Result<WeatherReport, Error>;
}

/// HTTP implementation of [`WeatherApi`].
///
/// Every call obtains a bearer token from the [`TokenCache`] first and
/// issues exactly one request. A rejected token surfaces as an `Api`
/// error for that call; there is no refresh-and-retry on 401.
pub struct WeatherClient {
    http: Client,
    config: ApiConfig,
    tokens: TokenCache,
}

impl WeatherClient {
    pub fn new(config: ApiConfig) -> Self {
        let http = Client::new();
        let tokens = TokenCache::new(http.clone(), config.clone());
        Self {
            http,
            config,
            tokens,
        }
    }

    async fn get_authorized(&self, endpoint: &str) -> Result<reqwest::Response, Error> {
        let token = self.tokens.token().await?;
        let response = self
            .http
            .get(endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", token.value))
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl WeatherApi for WeatherClient {
    async fn list_valid_cities(&self) -> Result<Vec<String>, Error> {
        let endpoint = format!("{}{}", self.config.base_url, self.config.cities_route);
        info!(%endpoint, "Requesting the weather API for valid cities");

        let response = self.get_authorized(&endpoint).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Decode {
            endpoint,
            reason: format!("response is not a string array: {e}"),
        })
    }

    async fn city_weather(&self, city: &str) -> Result<WeatherReport, Error> {
        let endpoint = format!(
            "{}{}{}",
            self.config.base_url, self.config.weathers_route, city
        );
        info!(%city, %endpoint, "Requesting the weather API for a city report");

        let response = self.get_authorized(&endpoint).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Decode {
            endpoint,
            reason: format!("response is not a weather report: {e}"),
        })
    }
}
