//! Search condition catalogs served by `/api/{chair,estate}/search/condition`.

use crate::de::null_as_default;
use serde::{Deserialize, Serialize};

/// One bucket of a range filter. `-1` on either bound means open-ended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub id: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeCondition {
    pub prefix: String,
    pub suffix: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ranges: Vec<Range>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCondition {
    #[serde(deserialize_with = "null_as_default")]
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairSearchCondition {
    pub width: RangeCondition,
    pub height: RangeCondition,
    pub depth: RangeCondition,
    pub price: RangeCondition,
    pub color: ListCondition,
    pub feature: ListCondition,
    pub kind: ListCondition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstateSearchCondition {
    pub door_width: RangeCondition,
    pub door_height: RangeCondition,
    pub rent: RangeCondition,
    pub feature: ListCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_condition_catalog() {
        let body = r#"{"doorWidth":{"prefix":"","suffix":"cm","ranges":null},"feature":{"list":null}}"#;
        let parsed: EstateSearchCondition = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.door_width.suffix, "cm");
        assert!(parsed.door_width.ranges.is_empty());
        assert!(parsed.feature.list.is_empty());
        assert_eq!(parsed.rent, RangeCondition::default());
    }
}
