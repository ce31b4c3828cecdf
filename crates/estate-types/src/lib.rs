//! Domain values for the estate search application under benchmark.
//!
//! Every type here mirrors a JSON document returned by the application's
//! public API. Attributes the application keeps for itself (ranking inputs,
//! stock counters) live on the structs but are never serialized, so they
//! neither appear on the wire nor take part in snapshot comparison.
//!
//! Decoding is lenient: absent fields take their zero value and `null` lists
//! decode as empty.
//!
//! ```text
//! estate-types (this crate)
//!    │
//!    ├─── estate-client    (decodes live responses into these types)
//!    └─── snapshot-verify  (decodes recorded responses and compares)
//! ```

pub mod chair;
pub mod condition;
mod de;
pub mod estate;
pub mod geo;

pub use chair::{Chair, ChairsResponse};
pub use condition::{
    ChairSearchCondition, EstateSearchCondition, ListCondition, Range, RangeCondition,
};
pub use estate::{Estate, EstatesResponse};
pub use geo::{Coordinate, Coordinates};
