//! Per-part accumulation buffers.
//!
//! A [`Part`] composes three lifetimes:
//! - [`CellTopology`], ingested once and constant across timesteps,
//! - [`TimeStepScratch`], cleared by every timestep reset,
//! - the finalized [`UnstructuredGrid`], rebuilt by every `finalize`.

use itertools::Itertools;

use crate::data::cell_property::CellProperty;
use crate::debug_invariants::DebugInvariants;
use crate::grid::UnstructuredGrid;
use crate::mesh_error::{DataIntegrityError, PartSieveError};
use crate::topology::cell_array::CellTopology;
use crate::topology::cell_type::CellType;
use crate::topology::part_type::PartType;

/// Data that must be re-declared before every `finalize`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeStepScratch {
    dead_cells: Vec<usize>,
    cell_properties: Vec<CellProperty>,
}

impl TimeStepScratch {
    /// Local indices of dead cells, strictly increasing.
    #[inline]
    pub fn dead_cells(&self) -> &[usize] {
        &self.dead_cells
    }

    #[inline]
    pub fn cell_properties(&self) -> &[CellProperty] {
        &self.cell_properties
    }

    pub(crate) fn cell_properties_mut(&mut self) -> &mut [CellProperty] {
        &mut self.cell_properties
    }

    pub(crate) fn push_property(&mut self, property: CellProperty) {
        self.cell_properties.push(property);
    }

    /// Move the declared properties out, leaving the list empty.
    pub(crate) fn take_properties(&mut self) -> Vec<CellProperty> {
        std::mem::take(&mut self.cell_properties)
    }

    pub fn clear(&mut self) {
        self.dead_cells.clear();
        self.cell_properties.clear();
    }
}

/// One material's cells and per-timestep state.
#[derive(Clone, Debug)]
pub struct Part {
    part_type: PartType,
    name: String,
    topology: CellTopology,
    point_ids: Vec<usize>,
    scratch: TimeStepScratch,
    grid: Option<UnstructuredGrid>,
}

impl Part {
    pub fn new(part_type: PartType, name: impl Into<String>) -> Self {
        Self {
            part_type,
            name: name.into(),
            topology: CellTopology::new(),
            point_ids: Vec::new(),
            scratch: TimeStepScratch::default(),
            grid: None,
        }
    }

    #[inline]
    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn topology(&self) -> &CellTopology {
        &self.topology
    }

    #[inline]
    pub fn number_of_cells(&self) -> usize {
        self.topology.len()
    }

    /// Local → global point map; empty until topology is finalized.
    #[inline]
    pub fn point_ids(&self) -> &[usize] {
        &self.point_ids
    }

    #[inline]
    pub fn scratch(&self) -> &TimeStepScratch {
        &self.scratch
    }

    #[inline]
    pub fn dead_cells(&self) -> &[usize] {
        self.scratch.dead_cells()
    }

    #[inline]
    pub fn cell_properties(&self) -> &[CellProperty] {
        self.scratch.cell_properties()
    }

    #[inline]
    pub fn grid(&self) -> Option<&UnstructuredGrid> {
        self.grid.as_ref()
    }

    /// Append a cell with 0-based global vertex ids; returns its local index.
    pub(crate) fn insert_cell(&mut self, cell_type: CellType, vertices: &[usize]) -> usize {
        self.topology.push_cell(cell_type, vertices)
    }

    /// Record local cell `cell` as dead for this timestep.
    pub(crate) fn mark_dead(&mut self, cell: usize) -> Result<(), DataIntegrityError> {
        self.check_dead_order(self.scratch.dead_cells.last().copied(), cell)?;
        self.scratch.dead_cells.push(cell);
        Ok(())
    }

    /// Reject `cell` unless it follows `previous` in the dead list.
    pub(crate) fn check_dead_order(
        &self,
        previous: Option<usize>,
        cell: usize,
    ) -> Result<(), DataIntegrityError> {
        match previous {
            Some(previous) if previous >= cell => Err(DataIntegrityError::UnsortedDeadCells {
                part: self.name.clone(),
                previous,
                cell,
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn topology_mut(&mut self) -> &mut CellTopology {
        &mut self.topology
    }

    pub(crate) fn set_point_ids(&mut self, point_ids: Vec<usize>) {
        self.point_ids = point_ids;
    }

    pub(crate) fn scratch_mut(&mut self) -> &mut TimeStepScratch {
        &mut self.scratch
    }

    pub(crate) fn set_grid(&mut self, grid: UnstructuredGrid) {
        self.grid = Some(grid);
    }

    pub(crate) fn take_grid(&mut self) -> Option<UnstructuredGrid> {
        self.grid.take()
    }

    /// Clear dead cells and declared properties; topology is kept.
    pub fn reset_time_step_info(&mut self) {
        self.scratch.clear();
    }
}

impl DebugInvariants for Part {
    fn validate_invariants(&self) -> Result<(), PartSieveError> {
        self.topology.validate_invariants()?;
        let cells = self.topology.len();
        let dead = self.scratch.dead_cells();
        if let Some((&previous, &cell)) = dead.iter().tuple_windows().find(|(a, b)| a >= b) {
            return Err(DataIntegrityError::UnsortedDeadCells {
                part: self.name.clone(),
                previous,
                cell,
            }
            .into());
        }
        if let Some(&last) = dead.last() {
            if last >= cells {
                return Err(DataIntegrityError::DeadCellOutOfRange {
                    part: self.name.clone(),
                    cell: last,
                    cells,
                }
                .into());
            }
        }
        for property in self.scratch.cell_properties() {
            let tuples = property.data().number_of_tuples();
            if tuples != cells {
                return Err(DataIntegrityError::PropertyLengthMismatch {
                    name: property.name().to_owned(),
                    cells,
                    tuples,
                }
                .into());
            }
        }
        if !self.point_ids.is_empty() {
            let mut seen = vec![false; self.point_ids.len()];
            for &local in self.topology.cells().flat_map(|(_, vertices)| vertices) {
                if let Some(slot) = seen.get_mut(local) {
                    *slot = true;
                }
            }
            if let Some(local) = seen.iter().position(|s| !s) {
                return Err(DataIntegrityError::UnusedLocalPoint {
                    part: self.name.clone(),
                    local,
                }
                .into());
            }
        }
        Ok(())
    }
}
