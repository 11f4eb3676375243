//! Merge-patch building blocks.
//!
//! Update payloads only change the keys the caller actually sent. Plain
//! `Option<T>` covers non-nullable columns (a missing key and `null` both mean
//! "leave it"). Nullable columns need a third state so that `null` can clear
//! the stored value, which is what [`Patch`] is for.

use serde::{Deserialize, Deserializer};

/// A field of a merge-patch payload for a nullable column.
///
/// Must be declared with `#[serde(default)]` so a missing key becomes `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Patch<T> {
    /// Key not present in the payload.
    #[default]
    Absent,
    /// Key present with an explicit `null`.
    Null,
    /// Key present with a value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The new column value, if this field changes anything.
    ///
    /// `Some(None)` clears the column; `None` leaves it untouched.
    pub fn change(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Set(value) => Some(Some(value)),
        }
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

/// Implemented by every update payload.
pub trait PartialUpdate {
    /// True when the payload names no field that would change the row.
    fn is_empty(&self) -> bool;
}
