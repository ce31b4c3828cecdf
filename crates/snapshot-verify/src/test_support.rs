//! Shared fixtures for unit tests.

use async_trait::async_trait;
use estate_client::{ClientError, LiveClient};
use estate_types::{
    Chair, ChairSearchCondition, ChairsResponse, Coordinates, Estate, EstateSearchCondition,
    EstatesResponse,
};

/// A client that must never be called.
pub struct UnreachableClient;

#[async_trait]
impl LiveClient for UnreachableClient {
    async fn chair_detail(&self, id: &str) -> Result<Option<Chair>, ClientError> {
        unreachable!("chair_detail({id}) called")
    }

    async fn chair_search_condition(&self) -> Result<ChairSearchCondition, ClientError> {
        unreachable!("chair_search_condition called")
    }

    async fn search_chairs(
        &self,
        _query: &[(String, String)],
    ) -> Result<ChairsResponse, ClientError> {
        unreachable!("search_chairs called")
    }

    async fn low_priced_chairs(&self) -> Result<ChairsResponse, ClientError> {
        unreachable!("low_priced_chairs called")
    }

    async fn estate_detail(&self, id: &str) -> Result<Option<Estate>, ClientError> {
        unreachable!("estate_detail({id}) called")
    }

    async fn estate_search_condition(&self) -> Result<EstateSearchCondition, ClientError> {
        unreachable!("estate_search_condition called")
    }

    async fn search_estates(
        &self,
        _query: &[(String, String)],
    ) -> Result<EstatesResponse, ClientError> {
        unreachable!("search_estates called")
    }

    async fn low_priced_estates(&self) -> Result<EstatesResponse, ClientError> {
        unreachable!("low_priced_estates called")
    }

    async fn recommended_estates_for_chair(
        &self,
        chair_id: i64,
    ) -> Result<Option<EstatesResponse>, ClientError> {
        unreachable!("recommended_estates_for_chair({chair_id}) called")
    }

    async fn search_estates_in_polygon(
        &self,
        _coordinates: &Coordinates,
    ) -> Result<EstatesResponse, ClientError> {
        unreachable!("search_estates_in_polygon called")
    }
}
