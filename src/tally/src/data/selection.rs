//! What a person can say about a date

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

/// The choice a person makes when picking a date.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionType {
    /// The person cannot make it. Vetoes the date for everyone.
    Unavailable,
    /// The person can make it. Counts as one vote.
    Available,
}

impl SelectionType {
    /// Parse `available` or `unavailable`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownSelectionType`] for anything else.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse()
            .map_err(|_| ValidationError::UnknownSelectionType {
                input: s.to_string(),
            })
    }
}

/// The state of a single (person, date) cell.
///
/// Starts [`Unset`](Self::Unset). Picking a type moves the cell to that type;
/// picking the same type again moves it back to [`Unset`](Self::Unset);
/// picking the other type switches directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CellState {
    /// Nothing picked.
    #[default]
    Unset,
    /// Marked unavailable.
    Unavailable,
    /// Marked available.
    Available,
}

impl From<SelectionType> for CellState {
    #[inline]
    fn from(value: SelectionType) -> Self {
        match value {
            SelectionType::Unavailable => Self::Unavailable,
            SelectionType::Available => Self::Available,
        }
    }
}
