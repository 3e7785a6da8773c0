//! Flat cell connectivity storage.
//!
//! Cells are stored the way unstructured-grid renderers consume them: a
//! single `cell_structure` buffer holding `[n, v0, .., v(n-1)]` per cell, a
//! parallel `cell_types` array, and `cell_location[i]` giving the index of
//! cell `i`'s count field inside `cell_structure`.
//!
//! # Invariants
//!
//! - `cell_types.len() == cell_location.len()`.
//! - `cell_location` is strictly increasing and starts at 0.
//! - `cell_structure[cell_location[i]]` equals cell `i`'s vertex count, and the
//!   record ends exactly where the next one starts.

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{DataIntegrityError, PartSieveError};
use crate::topology::cell_type::CellType;

/// Connectivity of an ordered list of cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellTopology {
    cell_types: Vec<CellType>,
    cell_structure: Vec<usize>,
    cell_location: Vec<usize>,
}

impl CellTopology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty topology with room for `cells` cells of up to
    /// `vertices_per_cell` vertices.
    pub fn with_capacity(cells: usize, vertices_per_cell: usize) -> Self {
        Self {
            cell_types: Vec::with_capacity(cells),
            cell_structure: Vec::with_capacity(cells * (vertices_per_cell + 1)),
            cell_location: Vec::with_capacity(cells),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cell_types.len()
    }

    /// True if no cells were added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_types.is_empty()
    }

    /// Append a cell and return its index.
    pub fn push_cell(&mut self, cell_type: CellType, vertices: &[usize]) -> usize {
        self.cell_types.push(cell_type);
        self.cell_location.push(self.cell_structure.len());
        self.cell_structure.push(vertices.len());
        self.cell_structure.extend_from_slice(vertices);
        self.cell_types.len() - 1
    }

    /// Shape of every cell, in cell order.
    #[inline]
    pub fn cell_types(&self) -> &[CellType] {
        &self.cell_types
    }

    /// Flat `[n, v0, .., v(n-1)]` records.
    #[inline]
    pub fn cell_structure(&self) -> &[usize] {
        &self.cell_structure
    }

    /// Offset of each cell's record in [`cell_structure`](Self::cell_structure).
    #[inline]
    pub fn cell_locations(&self) -> &[usize] {
        &self.cell_location
    }

    /// Vertex ids of cell `index`.
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        let loc = *self.cell_location.get(index)?;
        let n = *self.cell_structure.get(loc)?;
        self.cell_structure.get(loc + 1..loc + 1 + n)
    }

    /// Iterate `(type, vertices)` for every cell in order.
    pub fn cells(&self) -> impl Iterator<Item = (CellType, &[usize])> + '_ {
        self.cell_types
            .iter()
            .zip(&self.cell_location)
            .map(move |(&ct, &loc)| {
                let n = self.cell_structure[loc];
                (ct, &self.cell_structure[loc + 1..loc + 1 + n])
            })
    }

    /// Total number of vertex references across all cells.
    pub fn connectivity_len(&self) -> usize {
        self.cell_structure.len() - self.cell_types.len()
    }

    /// Mutable flat buffer; used to rewrite vertex ids in place.
    pub(crate) fn cell_structure_mut(&mut self) -> &mut [usize] {
        &mut self.cell_structure
    }
}

impl DebugInvariants for CellTopology {
    fn validate_invariants(&self) -> Result<(), PartSieveError> {
        if self.cell_types.len() != self.cell_location.len() {
            return Err(DataIntegrityError::ComponentMismatch {
                expected: self.cell_types.len(),
                found: self.cell_location.len(),
            }
            .into());
        }
        if let Some((_, bad)) = self
            .cell_location
            .iter()
            .tuple_windows()
            .find(|(a, b)| a >= b)
        {
            return Err(DataIntegrityError::MalformedCellStructure { offset: *bad }.into());
        }
        let mut expected = 0;
        for &loc in &self.cell_location {
            if loc != expected {
                return Err(DataIntegrityError::MalformedCellStructure { offset: loc }.into());
            }
            let n = *self
                .cell_structure
                .get(loc)
                .ok_or(DataIntegrityError::MalformedCellStructure { offset: loc })?;
            expected = loc + n + 1;
        }
        if expected != self.cell_structure.len() {
            return Err(DataIntegrityError::MalformedCellStructure { offset: expected }.into());
        }
        Ok(())
    }
}
