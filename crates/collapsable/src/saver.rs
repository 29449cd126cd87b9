//! Persisting a [`CollapsableState`] across process restarts.
//!
//! Only the two scalars are saved, limit first. Restoring reuses them
//! verbatim; a saved offset is already within its limit.

use crate::state::CollapsableState;

/// Snapshot of a [`CollapsableState`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedCollapsableState {
    pub offset_limit: f32,
    pub offset: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreError {
    WrongLength { expected: usize, found: usize },
    NotFinite { index: usize },
}

impl std::fmt::Display for RestoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreError::WrongLength { expected, found } => {
                write!(f, "expected {expected} saved values, found {found}")
            }
            RestoreError::NotFinite { index } => {
                write!(f, "saved value at index {index} is not finite")
            }
        }
    }
}

impl std::error::Error for RestoreError {}

const SAVED_LEN: usize = 2;

impl CollapsableState {
    pub fn save(&self) -> SavedCollapsableState {
        SavedCollapsableState {
            offset_limit: self.offset_limit(),
            offset: self.offset(),
        }
    }

    pub fn restore(saved: SavedCollapsableState) -> Self {
        log::debug!(
            "restoring collapsable state: limit {}, offset {}",
            saved.offset_limit,
            saved.offset
        );
        Self::with_values(saved.offset_limit, saved.offset)
    }

    /// `[offset_limit, offset]`
    pub fn to_list(&self) -> [f32; SAVED_LEN] {
        [self.offset_limit(), self.offset()]
    }

    pub fn restore_from_list(values: &[f32]) -> Result<Self, RestoreError> {
        let [offset_limit, offset] = <[f32; SAVED_LEN]>::try_from(values).map_err(|_| {
            RestoreError::WrongLength {
                expected: SAVED_LEN,
                found: values.len(),
            }
        })?;
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(RestoreError::NotFinite { index });
        }
        Ok(Self::restore(SavedCollapsableState {
            offset_limit,
            offset,
        }))
    }
}

#[cfg(test)]
#[path = "tests/saver_tests.rs"]
mod tests;
