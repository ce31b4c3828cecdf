//! Per-endpoint instantiations of [`Surface`].

use crate::compare::RuleSet;
use crate::error::VerifyError;
use crate::query::parse_query;
use crate::snapshot::Snapshot;
use crate::verifier::Surface;
use async_trait::async_trait;
use estate_client::{ClientError, LiveClient};
use estate_types::{
    Chair, ChairSearchCondition as ChairCondition, ChairsResponse, Coordinates, Estate,
    EstateSearchCondition as EstateCondition, EstatesResponse,
};

fn resource_id(snapshot: &Snapshot) -> Result<String, VerifyError> {
    snapshot.resource_id().map(str::to_string).ok_or_else(|| {
        VerifyError::SnapshotCorrupt(format!(
            "no resource id in recorded path {:?}",
            snapshot.request.resource
        ))
    })
}

fn query_pairs(snapshot: &Snapshot) -> Result<Vec<(String, String)>, VerifyError> {
    parse_query(&snapshot.request.query).map_err(|e| VerifyError::corrupt("recorded query", e))
}

pub struct ChairDetail;

#[async_trait]
impl Surface for ChairDetail {
    type Request = String;
    type Response = Chair;
    const LABEL: &'static str = "GET /api/chair/:id";
    const RULES: RuleSet = RuleSet::CHAIR;
    const DETAIL_LOOKUP: bool = true;

    fn decode_request(snapshot: &Snapshot) -> Result<String, VerifyError> {
        resource_id(snapshot)
    }

    async fn call(client: &dyn LiveClient, id: &String) -> Result<Option<Chair>, ClientError> {
        client.chair_detail(id).await
    }
}

pub struct ChairSearchCondition;

#[async_trait]
impl Surface for ChairSearchCondition {
    type Request = ();
    type Response = ChairCondition;
    const LABEL: &'static str = "GET /api/chair/search/condition";
    const RULES: RuleSet = RuleSet::CHAIR;

    fn decode_request(_snapshot: &Snapshot) -> Result<(), VerifyError> {
        Ok(())
    }

    async fn call(client: &dyn LiveClient, _: &()) -> Result<Option<ChairCondition>, ClientError> {
        client.chair_search_condition().await.map(Some)
    }
}

pub struct ChairSearch;

#[async_trait]
impl Surface for ChairSearch {
    type Request = Vec<(String, String)>;
    type Response = ChairsResponse;
    const LABEL: &'static str = "GET /api/chair/search";
    const RULES: RuleSet = RuleSet::CHAIR;

    fn decode_request(snapshot: &Snapshot) -> Result<Self::Request, VerifyError> {
        query_pairs(snapshot)
    }

    async fn call(
        client: &dyn LiveClient,
        query: &Self::Request,
    ) -> Result<Option<ChairsResponse>, ClientError> {
        client.search_chairs(query).await.map(Some)
    }
}

pub struct ChairLowPriced;

#[async_trait]
impl Surface for ChairLowPriced {
    type Request = ();
    type Response = ChairsResponse;
    const LABEL: &'static str = "GET /api/chair/low_priced";
    const RULES: RuleSet = RuleSet::CHAIR;

    fn decode_request(_snapshot: &Snapshot) -> Result<(), VerifyError> {
        Ok(())
    }

    async fn call(client: &dyn LiveClient, _: &()) -> Result<Option<ChairsResponse>, ClientError> {
        client.low_priced_chairs().await.map(Some)
    }
}

pub struct EstateDetail;

#[async_trait]
impl Surface for EstateDetail {
    type Request = String;
    type Response = Estate;
    const LABEL: &'static str = "GET /api/estate/:id";
    const RULES: RuleSet = RuleSet::ESTATE;
    const DETAIL_LOOKUP: bool = true;

    fn decode_request(snapshot: &Snapshot) -> Result<String, VerifyError> {
        resource_id(snapshot)
    }

    async fn call(client: &dyn LiveClient, id: &String) -> Result<Option<Estate>, ClientError> {
        client.estate_detail(id).await
    }
}

pub struct EstateSearchCondition;

#[async_trait]
impl Surface for EstateSearchCondition {
    type Request = ();
    type Response = EstateCondition;
    const LABEL: &'static str = "GET /api/estate/search/condition";
    const RULES: RuleSet = RuleSet::STRICT;

    fn decode_request(_snapshot: &Snapshot) -> Result<(), VerifyError> {
        Ok(())
    }

    async fn call(
        client: &dyn LiveClient,
        _: &(),
    ) -> Result<Option<EstateCondition>, ClientError> {
        client.estate_search_condition().await.map(Some)
    }
}

pub struct EstateSearch;

#[async_trait]
impl Surface for EstateSearch {
    type Request = Vec<(String, String)>;
    type Response = EstatesResponse;
    const LABEL: &'static str = "GET /api/estate/search";
    const RULES: RuleSet = RuleSet::ESTATE;

    fn decode_request(snapshot: &Snapshot) -> Result<Self::Request, VerifyError> {
        query_pairs(snapshot)
    }

    async fn call(
        client: &dyn LiveClient,
        query: &Self::Request,
    ) -> Result<Option<EstatesResponse>, ClientError> {
        client.search_estates(query).await.map(Some)
    }
}

pub struct EstateLowPriced;

#[async_trait]
impl Surface for EstateLowPriced {
    type Request = ();
    type Response = EstatesResponse;
    const LABEL: &'static str = "GET /api/estate/low_priced";
    const RULES: RuleSet = RuleSet::ESTATE;

    fn decode_request(_snapshot: &Snapshot) -> Result<(), VerifyError> {
        Ok(())
    }

    async fn call(
        client: &dyn LiveClient,
        _: &(),
    ) -> Result<Option<EstatesResponse>, ClientError> {
        client.low_priced_estates().await.map(Some)
    }
}

pub struct RecommendedEstateWithChair;

#[async_trait]
impl Surface for RecommendedEstateWithChair {
    type Request = i64;
    type Response = EstatesResponse;
    const LABEL: &'static str = "GET /api/recommended_estate/:id";
    const RULES: RuleSet = RuleSet::ESTATE;
    const DETAIL_LOOKUP: bool = true;

    fn decode_request(snapshot: &Snapshot) -> Result<i64, VerifyError> {
        let id = resource_id(snapshot)?;
        id.parse()
            .map_err(|e| VerifyError::corrupt(&format!("chair id {id:?}"), e))
    }

    async fn call(
        client: &dyn LiveClient,
        chair_id: &i64,
    ) -> Result<Option<EstatesResponse>, ClientError> {
        client.recommended_estates_for_chair(*chair_id).await
    }
}

/// Polygon search: the input comes from the recorded request *body*.
pub struct EstateNazotte;

#[async_trait]
impl Surface for EstateNazotte {
    type Request = Coordinates;
    type Response = EstatesResponse;
    const LABEL: &'static str = "POST /api/estate/nazotte";
    const RULES: RuleSet = RuleSet::ESTATE;

    fn decode_request(snapshot: &Snapshot) -> Result<Coordinates, VerifyError> {
        serde_json::from_str(&snapshot.request.body)
            .map_err(|e| VerifyError::corrupt("recorded request body", e))
    }

    async fn call(
        client: &dyn LiveClient,
        coordinates: &Coordinates,
    ) -> Result<Option<EstatesResponse>, ClientError> {
        client.search_estates_in_polygon(coordinates).await.map(Some)
    }
}
