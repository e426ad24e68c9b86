//! Third-party travel providers.
//!
//! Flight offers come from Amadeus and hotel availability from Hotelbeds.
//! Handlers only see the [`FlightProvider`] and [`HotelProvider`] traits, so
//! tests can install fakes and a server without credentials installs
//! [`UnconfiguredProvider`].

pub mod amadeus;
pub mod hotelbeds;
pub mod token_cache;

use async_trait::async_trait;
use thiserror::Error;

pub use amadeus::{AmadeusClient, AmadeusConfig};
pub use hotelbeds::{HotelbedsClient, HotelbedsConfig};
pub use token_cache::{FetchedToken, TokenCache};

/// Errors talking to an external provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication with {0} failed")]
    Auth(&'static str),

    #[error("{0} is not configured")]
    Unconfigured(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Map a non-success response to [`ProviderError::Api`].
    pub(crate) fn check_status(resp: &reqwest::Response) -> Result<(), Self> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").into(),
            });
        }
        Ok(())
    }
}

/// A one-way flight offer search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: String,
    /// Restrict offers to these IATA airline codes (comma separated).
    pub airline: Option<String>,
}

/// A hotel availability search for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelQuery {
    pub destination_code: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Search flight offers. The provider's response body is returned as-is.
    async fn search_flights(&self, query: &FlightQuery) -> Result<serde_json::Value, ProviderError>;
}

#[async_trait]
pub trait HotelProvider: Send + Sync {
    /// Search available hotels, each carrying an `images` array.
    ///
    /// An empty vector means the provider answered with no hotels.
    async fn search_hotels(
        &self,
        query: &HotelQuery,
    ) -> Result<Vec<serde_json::Value>, ProviderError>;
}

/// Stand-in for a provider whose credentials were not supplied.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredProvider {
    name: &'static str,
}

impl UnconfiguredProvider {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl FlightProvider for UnconfiguredProvider {
    async fn search_flights(&self, _query: &FlightQuery) -> Result<serde_json::Value, ProviderError> {
        Err(ProviderError::Unconfigured(self.name))
    }
}

#[async_trait]
impl HotelProvider for UnconfiguredProvider {
    async fn search_hotels(
        &self,
        _query: &HotelQuery,
    ) -> Result<Vec<serde_json::Value>, ProviderError> {
        Err(ProviderError::Unconfigured(self.name))
    }
}
