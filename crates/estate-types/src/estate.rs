//! Estate listings.

use crate::de::null_as_default;
use serde::{Deserialize, Serialize};

/// An estate as returned by `GET /api/estate/:id` and the estate listing endpoints.
///
/// `latitude` and `longitude` may be recomputed by the application between
/// runs, so verification treats them as volatile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Estate {
    pub id: i64,
    pub thumbnail: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub rent: i64,
    pub door_height: i64,
    pub door_width: i64,
    pub features: String,
    /// Ranking input, never exposed by the API.
    #[serde(skip)]
    pub popularity: i64,
}

/// Body of the estate search, low-priced, recommendation and polygon endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstatesResponse {
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub estates: Vec<Estate>,
}
