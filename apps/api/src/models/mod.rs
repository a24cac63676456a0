pub mod feedback;
pub mod profile;

use serde::{Deserialize, Deserializer};

/// Deserializes an explicit JSON `null` as the type's default.
/// LLM output routinely writes `null` where an empty list is meant.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
