//! The ten API surfaces covered by snapshot verification.

use crate::error::{ConfigError, VerifyError};
use crate::snapshot::Snapshot;
use crate::surface;
use crate::verifier::{verify, Surface};
use estate_client::LiveClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

/// One endpoint category of the snapshot corpus.
///
/// Declaration order is dispatch order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    ChairDetail,
    ChairSearchCondition,
    ChairSearch,
    EstateDetail,
    EstateSearchCondition,
    EstateSearch,
    ChairLowPriced,
    EstateLowPriced,
    RecommendedEstateWithChair,
    EstateNazotte,
}

/// Static facts about an endpoint category.
struct Descriptor {
    dir_name: &'static str,
    label: &'static str,
    default_tasks: usize,
}

impl Endpoint {
    pub const ALL: [Endpoint; 10] = [
        Endpoint::ChairDetail,
        Endpoint::ChairSearchCondition,
        Endpoint::ChairSearch,
        Endpoint::EstateDetail,
        Endpoint::EstateSearchCondition,
        Endpoint::EstateSearch,
        Endpoint::ChairLowPriced,
        Endpoint::EstateLowPriced,
        Endpoint::RecommendedEstateWithChair,
        Endpoint::EstateNazotte,
    ];

    const fn descriptor(self) -> Descriptor {
        let (dir_name, label, default_tasks) = match self {
            Endpoint::ChairDetail => ("chair_detail", "GET /api/chair/:id", 5),
            Endpoint::ChairSearchCondition => {
                ("chair_search_condition", "GET /api/chair/search/condition", 1)
            }
            Endpoint::ChairSearch => ("chair_search", "GET /api/chair/search", 5),
            Endpoint::EstateDetail => ("estate_detail", "GET /api/estate/:id", 5),
            Endpoint::EstateSearchCondition => (
                "estate_search_condition",
                "GET /api/estate/search/condition",
                1,
            ),
            Endpoint::EstateSearch => ("estate_search", "GET /api/estate/search", 5),
            Endpoint::ChairLowPriced => ("chair_low_priced", "GET /api/chair/low_priced", 1),
            Endpoint::EstateLowPriced => ("estate_low_priced", "GET /api/estate/low_priced", 1),
            Endpoint::RecommendedEstateWithChair => (
                "recommended_estate_with_chair",
                "GET /api/recommended_estate/:id",
                5,
            ),
            Endpoint::EstateNazotte => ("estate_nazotte", "POST /api/estate/nazotte", 5),
        };
        Descriptor {
            dir_name,
            label,
            default_tasks,
        }
    }

    /// Name of this category's subdirectory in the snapshot corpus.
    pub const fn dir_name(self) -> &'static str {
        self.descriptor().dir_name
    }

    /// Method and route template, for messages.
    pub const fn label(self) -> &'static str {
        self.descriptor().label
    }

    /// Number of concurrent verification tasks launched per run by default.
    pub const fn default_tasks(self) -> usize {
        self.descriptor().default_tasks
    }

    /// Detail lookups extract an id from the recorded path and treat a
    /// recorded 404 as "the live call must report absence".
    pub const fn is_detail_lookup(self) -> bool {
        match self {
            Endpoint::ChairDetail => surface::ChairDetail::DETAIL_LOOKUP,
            Endpoint::ChairSearchCondition => surface::ChairSearchCondition::DETAIL_LOOKUP,
            Endpoint::ChairSearch => surface::ChairSearch::DETAIL_LOOKUP,
            Endpoint::EstateDetail => surface::EstateDetail::DETAIL_LOOKUP,
            Endpoint::EstateSearchCondition => surface::EstateSearchCondition::DETAIL_LOOKUP,
            Endpoint::EstateSearch => surface::EstateSearch::DETAIL_LOOKUP,
            Endpoint::ChairLowPriced => surface::ChairLowPriced::DETAIL_LOOKUP,
            Endpoint::EstateLowPriced => surface::EstateLowPriced::DETAIL_LOOKUP,
            Endpoint::RecommendedEstateWithChair => {
                surface::RecommendedEstateWithChair::DETAIL_LOOKUP
            }
            Endpoint::EstateNazotte => surface::EstateNazotte::DETAIL_LOOKUP,
        }
    }

    /// Replay `snapshot` against the live system and judge the result.
    pub async fn verify(
        self,
        client: &dyn LiveClient,
        snapshot: &Snapshot,
        cancel: &CancellationToken,
    ) -> Result<(), VerifyError> {
        match self {
            Endpoint::ChairDetail => verify::<surface::ChairDetail>(client, snapshot, cancel).await,
            Endpoint::ChairSearchCondition => {
                verify::<surface::ChairSearchCondition>(client, snapshot, cancel).await
            }
            Endpoint::ChairSearch => verify::<surface::ChairSearch>(client, snapshot, cancel).await,
            Endpoint::EstateDetail => {
                verify::<surface::EstateDetail>(client, snapshot, cancel).await
            }
            Endpoint::EstateSearchCondition => {
                verify::<surface::EstateSearchCondition>(client, snapshot, cancel).await
            }
            Endpoint::EstateSearch => {
                verify::<surface::EstateSearch>(client, snapshot, cancel).await
            }
            Endpoint::ChairLowPriced => {
                verify::<surface::ChairLowPriced>(client, snapshot, cancel).await
            }
            Endpoint::EstateLowPriced => {
                verify::<surface::EstateLowPriced>(client, snapshot, cancel).await
            }
            Endpoint::RecommendedEstateWithChair => {
                verify::<surface::RecommendedEstateWithChair>(client, snapshot, cancel).await
            }
            Endpoint::EstateNazotte => {
                verify::<surface::EstateNazotte>(client, snapshot, cancel).await
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Endpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.dir_name() == s)
            .ok_or_else(|| ConfigError::UnknownEndpoint(s.to_string()))
    }
}
