//! Chair listings.

use crate::de::null_as_default;
use serde::{Deserialize, Serialize};

/// A chair as returned by `GET /api/chair/:id` and the chair listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chair {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: i64,
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub color: String,
    pub features: String,
    pub kind: String,
    /// Ranking input, never exposed by the API.
    #[serde(skip)]
    pub popularity: i64,
    /// Remaining stock, never exposed by the API.
    #[serde(skip)]
    pub stock: i64,
}

/// Body of the chair search and low-priced endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairsResponse {
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub chairs: Vec<Chair>,
}
