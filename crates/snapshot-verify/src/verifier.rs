//! The verification protocol shared by every API surface.
//!
//! A [`Surface`] knows how to rebuild the live request from a snapshot, how
//! to issue it, and which [`RuleSet`] its responses are compared under.
//! [`verify`] runs the rest of the protocol identically for all of them:
//! decode the request, race the live call against cancellation, then judge
//! the live result against the snapshot's *recorded* status code.

use crate::compare::{compare_documents, CompareResult, RuleSet};
use crate::error::VerifyError;
use crate::snapshot::Snapshot;
use async_trait::async_trait;
use estate_client::{ClientError, LiveClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const STATUS_OK: u16 = 200;
const STATUS_NOT_FOUND: u16 = 404;

/// One API surface of the application under test.
#[async_trait]
pub trait Surface: Send + Sync + 'static {
    /// Live-call input decoded from the recorded request.
    type Request: Send + Sync;

    /// Domain type of the response body.
    type Response: Serialize + DeserializeOwned + Send;

    /// Route label used in messages.
    const LABEL: &'static str;

    /// Fields of `Response` excluded from comparison.
    const RULES: RuleSet;

    /// Whether a recorded 404 means the live call must report absence.
    const DETAIL_LOOKUP: bool = false;

    fn decode_request(snapshot: &Snapshot) -> Result<Self::Request, VerifyError>;

    /// Issue the live call. `Ok(None)` is an explicit "not found".
    async fn call(
        client: &dyn LiveClient,
        request: &Self::Request,
    ) -> Result<Option<Self::Response>, ClientError>;
}

/// Replay `snapshot` through surface `S`.
///
/// A request that cannot be decoded is reported before any live call is made.
pub async fn verify<S: Surface>(
    client: &dyn LiveClient,
    snapshot: &Snapshot,
    cancel: &CancellationToken,
) -> Result<(), VerifyError> {
    let request = S::decode_request(snapshot)?;

    let actual = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = S::call(client, &request) => result,
    };
    debug!(
        "{}: recorded status {}, live call ok: {}",
        S::LABEL,
        snapshot.response.status_code,
        actual.is_ok()
    );

    judge::<S>(snapshot, actual)
}

/// Classify a live result against the recorded one.
pub(crate) fn judge<S: Surface>(
    snapshot: &Snapshot,
    actual: Result<Option<S::Response>, ClientError>,
) -> Result<(), VerifyError> {
    match snapshot.response.status_code {
        STATUS_OK => {
            let actual = actual?;
            let expected: S::Response = serde_json::from_str(&snapshot.response.body)
                .map_err(|e| VerifyError::corrupt("recorded response body", e))?;
            let actual = actual.ok_or(VerifyError::UnexpectedAbsence)?;

            let result = compare_documents(&expected, &actual, &S::RULES)
                .map_err(|e| VerifyError::corrupt("response not comparable", e))?;
            match result {
                CompareResult::Match => Ok(()),
                CompareResult::Mismatch {
                    path,
                    expected,
                    actual,
                } => Err(VerifyError::UnexpectedMismatch {
                    path,
                    expected,
                    actual,
                }),
                CompareResult::Missing { path } => Err(VerifyError::UnexpectedMismatch {
                    path,
                    expected: "<present>".to_string(),
                    actual: "<absent>".to_string(),
                }),
            }
        }
        STATUS_NOT_FOUND if S::DETAIL_LOOKUP => match actual {
            Ok(Some(_)) => Err(VerifyError::UnexpectedSuccess {
                recorded_status: STATUS_NOT_FOUND,
            }),
            Ok(None) | Err(_) => Ok(()),
        },
        recorded_status => match actual {
            Ok(_) => Err(VerifyError::UnexpectedSuccess { recorded_status }),
            Err(_) => Ok(()),
        },
    }
}
