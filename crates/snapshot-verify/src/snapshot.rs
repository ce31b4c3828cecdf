//! Snapshot records and the on-disk corpus.
//!
//! The corpus holds one subdirectory per endpoint category; every regular
//! file inside is one JSON-encoded [`Snapshot`]:
//!
//! ```json
//! {
//!   "request":  { "method": "GET", "resource": "/api/chair/12", "query": "", "body": "" },
//!   "response": { "statusCode": 200, "body": "{\"id\":12, ...}" }
//! }
//! ```
//!
//! Fields not listed above are ignored; absent ones take their zero value.

use crate::error::VerifyError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Request as originally sent to the system under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotRequest {
    pub method: String,
    /// URL path, e.g. "/api/estate/42".
    pub resource: String,
    /// Raw query component without the leading '?'.
    pub query: String,
    pub body: String,
}

/// Response as originally received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// A recorded request/response pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub request: SnapshotRequest,
    pub response: SnapshotResponse,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Trailing segment of the recorded resource path.
    ///
    /// `None` when the path has no '/' or ends with one.
    pub fn resource_id(&self) -> Option<&str> {
        let resource = &self.request.resource;
        let idx = resource.rfind('/')?;
        let id = &resource[idx + 1..];
        (!id.is_empty()).then_some(id)
    }
}

/// Filesystem-backed snapshot corpus.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate the snapshot files of one category, sorted by file name.
    pub async fn list_category(&self, category: &str) -> Result<SnapshotListing, VerifyError> {
        let dir = self.root.join(category);
        let unavailable = |e: std::io::Error| VerifyError::StorageUnavailable {
            category: category.to_string(),
            reason: format!("{}: {e}", dir.display()),
        };

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(unavailable)?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let metadata = entry.metadata().await.map_err(unavailable)?;
            if metadata.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        debug!("Listed {} snapshots in {}", files.len(), dir.display());
        SnapshotListing::new(category, files).ok_or_else(|| VerifyError::StorageUnavailable {
            category: category.to_string(),
            reason: format!("no snapshot files in {}", dir.display()),
        })
    }

    /// Read and decode one snapshot file.
    pub async fn load(path: &Path) -> Result<Snapshot, VerifyError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| VerifyError::corrupt(&format!("failed to read {}", path.display()), e))?;
        Snapshot::from_json(&raw)
            .map_err(|e| VerifyError::corrupt(&format!("failed to decode {}", path.display()), e))
    }
}

/// The immutable, non-empty file list of one category.
#[derive(Debug, Clone)]
pub struct SnapshotListing {
    category: String,
    files: Vec<PathBuf>,
}

impl SnapshotListing {
    /// `None` if `files` is empty.
    pub fn new(category: impl Into<String>, files: Vec<PathBuf>) -> Option<Self> {
        if files.is_empty() {
            return None;
        }
        Some(Self {
            category: category.into(),
            files,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pick one file uniformly at random, with replacement.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &Path {
        // Non-empty by construction, so the range is never empty.
        &self.files[rng.random_range(0..self.files.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn write_snapshot(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_snapshot_ignores_unknown_fields() {
        let raw = r#"{
            "request": {"method": "GET", "resource": "/api/chair/10", "query": "", "body": "", "headers": {}},
            "response": {"statusCode": 404, "body": "", "elapsed": 12},
            "capturedAt": "2020-09-12T10:00:00Z"
        }"#;

        let snapshot = Snapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.request.method, "GET");
        assert_eq!(snapshot.response.status_code, 404);
    }

    #[test]
    fn test_parse_snapshot_rejects_non_object() {
        assert!(Snapshot::from_json("[1, 2, 3]").is_err());
        assert!(Snapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_resource_id() {
        let with_resource = |resource: &str| Snapshot {
            request: SnapshotRequest {
                resource: resource.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(with_resource("/api/chair/42").resource_id(), Some("42"));
        assert_eq!(with_resource("/42").resource_id(), Some("42"));
        assert_eq!(with_resource("/api/chair/").resource_id(), None);
        assert_eq!(with_resource("noslash").resource_id(), None);
        assert_eq!(with_resource("").resource_id(), None);
    }

    #[test]
    fn test_parse_snapshot_missing_sections_default() {
        let snapshot = Snapshot::from_json(
            r#"{"request": {"method": "GET", "resource": "/api/chair/low_priced"}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.request.query, "");
        assert_eq!(snapshot.response, SnapshotResponse::default());

        let empty = Snapshot::from_json("{}").unwrap();
        assert_eq!(empty, Snapshot::default());
    }

    #[tokio::test]
    async fn test_list_category_sorted_files_only() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("chair_detail");
        fs::create_dir(&dir).unwrap();
        write_snapshot(&dir, "b.json", "{}");
        write_snapshot(&dir, "a.json", "{}");
        fs::create_dir(dir.join("nested")).unwrap();

        let store = SnapshotStore::new(root.path());
        let listing = store.list_category("chair_detail").await.unwrap();

        assert_eq!(listing.category(), "chair_detail");
        assert_eq!(listing.len(), 2);
        assert!(listing.files()[0].ends_with("a.json"));
        assert!(listing.files()[1].ends_with("b.json"));
    }

    #[tokio::test]
    async fn test_list_missing_category() {
        let root = TempDir::new().unwrap();
        let store = SnapshotStore::new(root.path());

        let err = store.list_category("estate_detail").await.unwrap_err();
        assert!(
            matches!(err, VerifyError::StorageUnavailable { ref category, .. } if category == "estate_detail")
        );
    }

    #[tokio::test]
    async fn test_list_empty_category() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("estate_search")).unwrap();
        let store = SnapshotStore::new(root.path());

        let err = store.list_category("estate_search").await.unwrap_err();
        assert!(matches!(err, VerifyError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let root = TempDir::new().unwrap();
        let path = write_snapshot(root.path(), "broken.json", "{\"request\": ");

        let err = SnapshotStore::load(&path).await.unwrap_err();
        assert!(matches!(err, VerifyError::SnapshotCorrupt(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_corrupt() {
        let root = TempDir::new().unwrap();

        let err = SnapshotStore::load(&root.path().join("gone.json")).await.unwrap_err();
        assert!(matches!(err, VerifyError::SnapshotCorrupt(_)));
    }

    #[tokio::test]
    async fn test_load_recorded_snapshot() {
        let root = TempDir::new().unwrap();
        let path = write_snapshot(
            root.path(),
            "ok.json",
            r#"{"request":{"resource":"/api/estate/3"},"response":{"statusCode":200,"body":"{}"}}"#,
        );

        let snapshot = SnapshotStore::load(&path).await.unwrap();
        assert_eq!(snapshot.resource_id(), Some("3"));
        assert_eq!(snapshot.response.status_code, 200);
    }

    #[test]
    fn test_sample_with_replacement_covers_listing() {
        let files: Vec<PathBuf> = (0..4).map(|i| PathBuf::from(format!("{i}.json"))).collect();
        let listing = SnapshotListing::new("chair_search", files.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let seen: HashSet<&Path> = (0..200).map(|_| listing.sample(&mut rng)).collect();
        assert_eq!(seen.len(), files.len());
    }

    #[test]
    fn test_empty_listing_rejected() {
        assert!(SnapshotListing::new("chair_search", Vec::new()).is_none());
    }
}
