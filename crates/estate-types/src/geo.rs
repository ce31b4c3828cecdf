//! Polygon search input.

use crate::de::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body of `POST /api/estate/nazotte`: the vertices of the search polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Vec<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon_body() {
        let body = r#"{"coordinates":[{"latitude":35.1,"longitude":139.2},{"latitude":35.3,"longitude":139.4}]}"#;
        let polygon: Coordinates = serde_json::from_str(body).unwrap();
        assert_eq!(polygon.coordinates.len(), 2);
        assert_eq!(polygon.coordinates[1].longitude, 139.4);
    }
}
