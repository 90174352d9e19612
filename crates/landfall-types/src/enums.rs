//! Enumeration types for scenario actors.
//!
//! Both enumerations have a stable lowercase name (used in persisted records)
//! and a stable positional index (used in vector encodings). Neither may be
//! reordered without breaking stored scenarios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A name that does not match any variant of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {enumeration} name `{name}`")]
pub struct UnknownName {
    /// Which enumeration was being parsed.
    pub enumeration: &'static str,
    /// The offending input.
    pub name: String,
}

// ---------------------------------------------------------------------------
// ActorKind
// ---------------------------------------------------------------------------

/// What an actor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// A walking pedestrian.
    Person,
    /// A flying bird.
    Bird,
    /// A static marker prop.
    Marker,
}

impl ActorKind {
    /// Every kind, in index order.
    pub const ALL: [Self; 3] = [Self::Person, Self::Bird, Self::Marker];

    /// Positional index used by vector encodings.
    pub const fn index(self) -> u8 {
        match self {
            Self::Person => 0,
            Self::Bird => 1,
            Self::Marker => 2,
        }
    }

    /// Inverse of [`index`](Self::index).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Person),
            1 => Some(Self::Bird),
            2 => Some(Self::Marker),
            _ => None,
        }
    }

    /// Stable record name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Bird => "bird",
            Self::Marker => "marker",
        }
    }

    /// Whether actors of this kind travel between their start and end poses.
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Person | Self::Bird)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActorKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownName {
                enumeration: "actor kind",
                name: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// MoveMode
// ---------------------------------------------------------------------------

/// How a mobile actor travels from its start pose to its end pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveMode {
    /// Wander.
    Random,
    /// Go directly to the end pose.
    Straight,
    /// Shuttle between start and end.
    Loop,
}

impl MoveMode {
    /// Every mode, in index order.
    pub const ALL: [Self; 3] = [Self::Random, Self::Straight, Self::Loop];

    /// Positional index used by vector encodings.
    pub const fn index(self) -> u8 {
        match self {
            Self::Random => 0,
            Self::Straight => 1,
            Self::Loop => 2,
        }
    }

    /// Inverse of [`index`](Self::index).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Random),
            1 => Some(Self::Straight),
            2 => Some(Self::Loop),
            _ => None,
        }
    }

    /// Stable record name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Straight => "straight",
            Self::Loop => "loop",
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownName {
                enumeration: "move mode",
                name: s.to_owned(),
            })
    }
}
