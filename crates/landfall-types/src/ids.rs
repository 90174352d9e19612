//! Validated marker identifiers.
//!
//! A marker identifier selects which physical marker variant the world spawns
//! (`cube_marker0` through `cube_marker7`). Values outside that set have no
//! object behind them, so the type refuses to hold them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw identifier outside the valid marker variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("marker id {0} is outside the valid range 0..={max}", max = MarkerId::MAX)]
pub struct InvalidMarkerId(pub u8);

/// Identifier of a marker variant, always in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MarkerId(u8);

impl MarkerId {
    /// Largest valid identifier.
    pub const MAX: u8 = 7;

    /// Every valid identifier, ascending.
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// The identifier used for the target marker.
    pub const TARGET: Self = Self(0);

    /// Validate a raw identifier.
    pub const fn new(raw: u8) -> Result<Self, InvalidMarkerId> {
        if raw <= Self::MAX {
            Ok(Self(raw))
        } else {
            Err(InvalidMarkerId(raw))
        }
    }

    /// The raw identifier.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MarkerId {
    type Error = InvalidMarkerId;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<MarkerId> for u8 {
    fn from(id: MarkerId) -> Self {
        id.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
