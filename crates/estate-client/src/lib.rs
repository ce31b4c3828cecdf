//! Live client for the estate search application.
//!
//! [`LiveClient`] is the seam between the verification engine and the system
//! under test: one async method per API surface, each returning a decoded
//! domain value or a [`ClientError`]. Detail lookups return `Ok(None)` when the
//! application answers `404 Not Found`, which is distinct from an error.
//!
//! [`HttpLiveClient`] implements the trait over HTTP with `reqwest`.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::{ClientConfig, HttpLiveClient};

use async_trait::async_trait;
use estate_types::{
    Chair, ChairSearchCondition, ChairsResponse, Coordinates, Estate, EstateSearchCondition,
    EstatesResponse,
};

/// Typed access to every API surface the verifier replays.
#[async_trait]
pub trait LiveClient: Send + Sync {
    /// `GET /api/chair/:id`
    async fn chair_detail(&self, id: &str) -> Result<Option<Chair>, ClientError>;

    /// `GET /api/chair/search/condition`
    async fn chair_search_condition(&self) -> Result<ChairSearchCondition, ClientError>;

    /// `GET /api/chair/search`
    async fn search_chairs(
        &self,
        query: &[(String, String)],
    ) -> Result<ChairsResponse, ClientError>;

    /// `GET /api/chair/low_priced`
    async fn low_priced_chairs(&self) -> Result<ChairsResponse, ClientError>;

    /// `GET /api/estate/:id`
    async fn estate_detail(&self, id: &str) -> Result<Option<Estate>, ClientError>;

    /// `GET /api/estate/search/condition`
    async fn estate_search_condition(&self) -> Result<EstateSearchCondition, ClientError>;

    /// `GET /api/estate/search`
    async fn search_estates(
        &self,
        query: &[(String, String)],
    ) -> Result<EstatesResponse, ClientError>;

    /// `GET /api/estate/low_priced`
    async fn low_priced_estates(&self) -> Result<EstatesResponse, ClientError>;

    /// `GET /api/recommended_estate/:id`
    async fn recommended_estates_for_chair(
        &self,
        chair_id: i64,
    ) -> Result<Option<EstatesResponse>, ClientError>;

    /// `POST /api/estate/nazotte`
    async fn search_estates_in_polygon(
        &self,
        coordinates: &Coordinates,
    ) -> Result<EstatesResponse, ClientError>;
}
