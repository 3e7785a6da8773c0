//! Part metadata and read-range configuration supplied by the results decoder.
//!
//! Both types are serde-serializable so a driver can persist or hand them
//! across process boundaries as JSON alongside the partition it owns.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::data::array::ScalarType;
use crate::mesh_error::PartSieveError;
use crate::topology::part_type::{NUM_CELL_TYPES, PartType};

fn default_active() -> bool {
    true
}

fn default_word_size() -> usize {
    4
}

/// Description of one material/part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// 1-based material id.
    pub material: usize,
    pub part_type: PartType,
    pub name: String,
    /// Inactive parts get no storage and their cells are dropped on insert.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Model-wide counts and the part table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartMetadata {
    pub parts: Vec<PartInfo>,
    /// Total cells of each category in the whole model.
    pub cells_per_type: [usize; NUM_CELL_TYPES],
    /// Size of the global point pool.
    pub num_points: usize,
    /// Results word size in bytes; 4 selects `f32` property arrays, 8 `f64`.
    #[serde(default = "default_word_size")]
    pub word_size: usize,
}

impl PartMetadata {
    /// Empty part table for a model with `num_points` points.
    pub fn new(num_points: usize, word_size: usize) -> Self {
        Self {
            parts: Vec::new(),
            cells_per_type: [0; NUM_CELL_TYPES],
            num_points,
            word_size,
        }
    }

    /// Append a part; materials are expected in order `1, 2, ..`.
    pub fn with_part(
        mut self,
        material: usize,
        part_type: PartType,
        name: impl Into<String>,
        active: bool,
    ) -> Self {
        self.parts.push(PartInfo {
            material,
            part_type,
            name: name.into(),
            active,
        });
        self
    }

    /// Set the model-wide cell count of one category.
    pub fn with_cells(mut self, category: PartType, count: usize) -> Self {
        self.cells_per_type[category.index()] = count;
        self
    }

    #[inline]
    pub fn number_of_cells(&self, category: PartType) -> usize {
        self.cells_per_type[category.index()]
    }

    /// Number of material slots.
    #[inline]
    pub fn number_of_materials(&self) -> usize {
        self.parts.len()
    }

    /// Precision of cell property arrays.
    pub fn scalar_type(&self) -> Result<ScalarType, PartSieveError> {
        ScalarType::from_word_size(self.word_size).ok_or_else(|| {
            PartSieveError::Config(format!("unsupported word size {}", self.word_size))
        })
    }

    /// Check that materials cover `1..=n` exactly once and the word size is known.
    pub fn validate(&self) -> Result<(), PartSieveError> {
        self.scalar_type()?;
        let n = self.parts.len();
        let mut seen = vec![false; n];
        for info in &self.parts {
            let slot = info
                .material
                .checked_sub(1)
                .and_then(|i| seen.get_mut(i))
                .ok_or_else(|| {
                    PartSieveError::Config(format!(
                        "material id {} of part `{}` is outside [1, {n}]",
                        info.material, info.name
                    ))
                })?;
            if *slot {
                return Err(PartSieveError::Config(format!(
                    "material id {} appears more than once",
                    info.material
                )));
            }
            *slot = true;
        }
        Ok(())
    }
}

/// Per-category `[min, max)` window of global cell indices owned by one
/// collection instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRange {
    pub min_ids: [usize; NUM_CELL_TYPES],
    pub max_ids: [usize; NUM_CELL_TYPES],
}

impl ReadRange {
    /// The whole model: `[0, cells_per_type)` for every category.
    pub fn full(metadata: &PartMetadata) -> Self {
        Self {
            min_ids: [0; NUM_CELL_TYPES],
            max_ids: metadata.cells_per_type,
        }
    }

    /// Replace the window of one category.
    pub fn with_window(mut self, category: PartType, window: Range<usize>) -> Self {
        self.min_ids[category.index()] = window.start;
        self.max_ids[category.index()] = window.end;
        self
    }

    #[inline]
    pub fn window(&self, category: PartType) -> Range<usize> {
        self.min_ids[category.index()]..self.max_ids[category.index()]
    }

    /// Check `min <= max <= total` for every category.
    pub fn validate(&self, metadata: &PartMetadata) -> Result<(), PartSieveError> {
        for category in PartType::ALL {
            let window = self.window(category);
            let total = metadata.number_of_cells(category);
            if window.start > window.end || window.end > total {
                return Err(PartSieveError::Config(format!(
                    "{category} read range [{}, {}) does not fit in {total} cells",
                    window.start, window.end
                )));
            }
        }
        Ok(())
    }
}
