//! Amadeus Self-Service flight offers client.
//!
//! Authenticates with the OAuth2 client-credentials grant and keeps the bearer
//! token in a [`TokenCache`] owned by the client.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::token_cache::{FetchedToken, TokenCache};
use super::{FlightProvider, FlightQuery, ProviderError};

/// Offers returned per search.
const MAX_OFFERS: &str = "10";

/// Connection settings for the Amadeus API.
#[derive(Debug, Clone)]
pub struct AmadeusConfig {
    /// API root, e.g. `https://test.api.amadeus.com`.
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug)]
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    tokens: TokenCache,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, ProviderError> {
        Self::with_token_cache(config, TokenCache::new())
    }

    /// Build a client around an existing token cache.
    pub fn with_token_cache(
        config: AmadeusConfig,
        tokens: TokenCache,
    ) -> Result<Self, ProviderError> {
        if config.base_url.is_empty() {
            return Err(ProviderError::Config("Amadeus base URL is empty".into()));
        }
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(ProviderError::Config("Amadeus credentials are empty".into()));
        }

        // reqwest is built with rustls-no-provider; Err means already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            api_secret: config.api_secret,
            tokens,
        })
    }

    pub const fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    async fn fetch_token(&self) -> Result<FetchedToken, ProviderError> {
        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let resp = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.api_key.as_str()),
                ("client_secret", self.api_secret.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "Amadeus token request rejected");
            return Err(ProviderError::Auth("Amadeus"));
        }
        Ok(resp.json().await?)
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        self.tokens.get_or_refresh(|| self.fetch_token()).await
    }
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    async fn search_flights(&self, query: &FlightQuery) -> Result<serde_json::Value, ProviderError> {
        let token = self.access_token().await?;

        let mut params = vec![
            ("originLocationCode", query.origin.as_str()),
            ("destinationLocationCode", query.destination.as_str()),
            ("departureDate", query.date.as_str()),
            ("adults", "1"),
            ("max", MAX_OFFERS),
        ];
        if let Some(airline) = query.airline.as_deref() {
            params.push(("includeAirlineCodes", airline));
        }

        let url = format!("{}/v2/shopping/flight-offers", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }
        ProviderError::check_status(&resp)?;

        let body: serde_json::Value = resp.json().await?;
        debug!(
            origin = %query.origin,
            destination = %query.destination,
            offers = body["data"].as_array().map_or(0, Vec::len),
            "Amadeus flight search complete"
        );
        Ok(body)
    }
}
