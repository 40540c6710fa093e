//! Field presence tracking for partial-update DTOs.
//!
//! A plain `Option<T>` cannot tell "key omitted" apart from "key sent as
//! `null`". Update DTOs declare such fields as `Option<Option<T>>` and decode
//! them with [`present`]:
//!
//! | JSON                 | Decoded              |
//! |----------------------|----------------------|
//! | key omitted          | `None`               |
//! | `"field": null`      | `Some(None)`         |
//! | `"field": value`     | `Some(Some(value))`  |
//!
//! ```ignore
//! #[derive(Deserialize)]
//! pub struct UpdateThing {
//!     #[serde(default, deserialize_with = "monarch_core::patch::present")]
//!     pub note: Option<Option<String>>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize a field that was present in the payload, keeping `null`.
///
/// Must be paired with `#[serde(default)]` so an omitted key becomes `None`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
