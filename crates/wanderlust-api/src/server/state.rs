//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::JwtManager;
use crate::providers::{FlightProvider, HotelProvider};
use crate::storage::ApiDatabase;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub db: ApiDatabase,
    pub jwt: Arc<JwtManager>,
    pub flights: Arc<dyn FlightProvider>,
    pub hotels: Arc<dyn HotelProvider>,
    /// Code an operator registration must present. `None` leaves operator
    /// signup open.
    pub operator_code: Option<Arc<str>>,
    /// Requests running longer than this end with a 408.
    pub request_timeout: Duration,
    /// Directory served for paths no route matches (hotel photos).
    pub public_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        db: ApiDatabase,
        jwt: JwtManager,
        flights: Arc<dyn FlightProvider>,
        hotels: Arc<dyn HotelProvider>,
    ) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
            flights,
            hotels,
            operator_code: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            public_dir: None,
        }
    }

    #[must_use]
    pub fn with_operator_code(mut self, code: Option<String>) -> Self {
        self.operator_code = code.filter(|c| !c.is_empty()).map(Arc::from);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_public_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.public_dir = dir;
        self
    }
}
