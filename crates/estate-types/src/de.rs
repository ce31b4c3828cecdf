//! Lenient decoding helpers.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default, e.g. an empty list.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
