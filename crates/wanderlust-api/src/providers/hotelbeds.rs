//! Hotelbeds availability and content client.
//!
//! Every request is signed with `X-Signature`, the hex SHA-256 of the API key,
//! the secret and the current Unix time in seconds concatenated.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::{HotelProvider, HotelQuery, ProviderError};

/// Connection settings for the Hotelbeds API.
#[derive(Debug, Clone)]
pub struct HotelbedsConfig {
    /// API root, e.g. `https://api.test.hotelbeds.com`.
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Request signature for `api_key` and `secret` at `unix_seconds`.
pub fn signature(api_key: &str, secret: &str, unix_seconds: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(secret.as_bytes());
    hasher.update(unix_seconds.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    hotels: Option<AvailabilityHotels>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityHotels {
    #[serde(default)]
    hotels: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    hotels: Vec<Value>,
}

#[derive(Debug)]
pub struct HotelbedsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl HotelbedsClient {
    pub fn new(config: HotelbedsConfig) -> Result<Self, ProviderError> {
        if config.base_url.is_empty() {
            return Err(ProviderError::Config("Hotelbeds base URL is empty".into()));
        }
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(ProviderError::Config("Hotelbeds credentials are empty".into()));
        }

        // reqwest is built with rustls-no-provider; Err means already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            api_secret: config.api_secret,
        })
    }

    fn signed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let sig = signature(
            &self.api_key,
            &self.api_secret,
            wanderlust_core::db::unix_timestamp(),
        );
        req.header("Api-key", &self.api_key)
            .header("X-Signature", sig)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Hotels with rooms available for `query`, without images.
    async fn availability(&self, query: &HotelQuery) -> Result<Vec<Value>, ProviderError> {
        let body = json!({
            "stay": { "checkIn": query.check_in, "checkOut": query.check_out },
            "occupancies": [{
                "rooms": query.rooms,
                "adults": query.adults,
                "children": query.children,
            }],
            "destination": { "code": query.destination_code },
        });

        let url = format!("{}/hotel-api/1.0/hotels", self.base_url);
        let resp = self.signed(self.http.post(&url)).json(&body).send().await?;
        ProviderError::check_status(&resp)?;

        let parsed: AvailabilityResponse = resp.json().await?;
        Ok(parsed.hotels.map(|h| h.hotels).unwrap_or_default())
    }

    /// Content records for `codes`. Any failure yields no records.
    async fn details(&self, codes: &[String]) -> Vec<Value> {
        if codes.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/hotel-content-api/1.0/hotels", self.base_url);
        let codes = codes.join(",");
        let result = async {
            let resp = self
                .signed(self.http.get(&url))
                .query(&[
                    ("codes", codes.as_str()),
                    ("language", "ENG"),
                    ("useSecondaryLanguage", "false"),
                ])
                .send()
                .await?;
            ProviderError::check_status(&resp)?;
            Ok::<ContentResponse, ProviderError>(resp.json().await?)
        }
        .await;

        match result {
            Ok(content) => content.hotels,
            Err(e) => {
                warn!(error = %e, "Hotelbeds content lookup failed, returning hotels without images");
                Vec::new()
            }
        }
    }
}

/// Render a hotel code (a JSON number or string) for the content query.
fn code_key(code: &Value) -> Option<String> {
    match code {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Attach each content record's `images` to the availability hotel with the
/// same code. Hotels without a matching record get an empty array.
fn attach_images(hotels: Vec<Value>, details: &[Value]) -> Vec<Value> {
    hotels
        .into_iter()
        .map(|mut hotel| {
            let key = hotel.get("code").and_then(code_key);
            let images = details
                .iter()
                .find(|d| key.is_some() && d.get("code").and_then(code_key) == key)
                .and_then(|d| d.get("images").cloned())
                .unwrap_or_else(|| json!([]));
            if let Value::Object(map) = &mut hotel {
                map.insert("images".into(), images);
            }
            hotel
        })
        .collect()
}

#[async_trait]
impl HotelProvider for HotelbedsClient {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<Value>, ProviderError> {
        let hotels = self.availability(query).await?;
        if hotels.is_empty() {
            debug!(destination = %query.destination_code, "Hotelbeds returned no hotels");
            return Ok(hotels);
        }

        let codes: Vec<String> = hotels
            .iter()
            .filter_map(|h| h.get("code").and_then(code_key))
            .collect();
        let details = self.details(&codes).await;

        debug!(
            destination = %query.destination_code,
            hotels = hotels.len(),
            with_content = details.len(),
            "Hotelbeds search complete"
        );
        Ok(attach_images(hotels, &details))
    }
}
