//! Part types, which double as the cell-type categories used for I/O striding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cell-type categories tracked by a collection.
pub const NUM_CELL_TYPES: usize = 7;

/// Element family of a part.
///
/// Each variant is also a cell-type category: cells of one category share a
/// connectivity block layout in the results file, and the collection keeps a
/// separate read range and cross-reference table per category.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartType {
    Particle,
    Beam,
    Shell,
    ThickShell,
    Solid,
    RigidBody,
    RoadSurface,
}

static_assertions::const_assert_eq!(PartType::RoadSurface as usize + 1, NUM_CELL_TYPES);

impl PartType {
    /// All categories in index order.
    pub const ALL: [PartType; NUM_CELL_TYPES] = [
        PartType::Particle,
        PartType::Beam,
        PartType::Shell,
        PartType::ThickShell,
        PartType::Solid,
        PartType::RigidBody,
        PartType::RoadSurface,
    ];

    /// Dense index of this category in `[0, NUM_CELL_TYPES)`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PartType::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Upper-case name stored in each grid's `Type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Particle => "PARTICLE",
            PartType::Beam => "BEAM",
            PartType::Shell => "SHELL",
            PartType::ThickShell => "THICK_SHELL",
            PartType::Solid => "SOLID",
            PartType::RigidBody => "RIGID_BODY",
            PartType::RoadSurface => "ROAD_SURFACE",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
