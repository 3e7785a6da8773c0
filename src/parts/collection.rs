//! [`PartCollection`]: splits a globally indexed cell stream into per-part
//! grids.
//!
//! # Lifecycle
//!
//! ```text
//! init_collection ──► Building ──finalize──► Finalized
//!                        ▲                      │
//!                        └─reset_time_step_info─┘
//! ```
//!
//! Topology is ingested once with [`PartCollection::insert_cell`] and renumbered
//! to part-local point ids by the first [`PartCollection::finalize`] (or an
//! explicit [`PartCollection::finalize_topology`]). Dead cells, declared
//! properties and global point arrays are per-timestep scratch and must be
//! supplied again before every `finalize`.

use std::fmt;

use crate::algs::dead_cells::distribute_dead_flags;
use crate::algs::grid_builder::build_grid;
use crate::algs::properties::{declare_property, fill_cell_properties};
use crate::data::array::{ArrayScalar, DataArray};
use crate::data::points::Points;
use crate::debug_invariants::DebugInvariants;
use crate::grid::UnstructuredGrid;
use crate::mesh_error::{DataIntegrityError, PartSieveError, StateError};
use crate::metadata::{PartMetadata, ReadRange};
use crate::parts::cell_map::{CellIndexToPart, CellRef};
use crate::parts::part::Part;
use crate::topology::cell_type::{CellType, MAX_CELL_VERTICES};
use crate::topology::part_type::{NUM_CELL_TYPES, PartType};
use crate::topology::renumber::PointRenumberer;

/// Lifecycle state of a [`PartCollection`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollectionState {
    /// Cells, dead flags and properties may be added.
    #[default]
    Building,
    /// Grids are built; only accessors and the timestep reset are valid.
    Finalized,
}

/// How a caller strides through on-disk data of one category when this
/// instance only owns a sub-range of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PartReadInfo {
    /// Cells of the category assigned to this instance.
    pub count: usize,
    /// Cells to skip before the assigned range.
    pub skip_before: usize,
    /// Cells to skip after the assigned range.
    pub skip_after: usize,
}

/// Per-part accumulation of cells, dead flags and results for one worker's
/// read range.
#[derive(Debug)]
pub struct PartCollection {
    metadata: Option<PartMetadata>,
    read_range: Option<ReadRange>,
    /// Indexed by `material - 1`; `None` for inactive or pruned parts.
    parts: Vec<Option<Part>>,
    cell_index_to_part: [CellIndexToPart; NUM_CELL_TYPES],
    point_properties: Vec<DataArray>,
    topology_finalized: bool,
    state: CollectionState,
}

impl Default for PartCollection {
    fn default() -> Self {
        Self {
            metadata: None,
            read_range: None,
            parts: Vec::new(),
            cell_index_to_part: PartType::ALL.map(|c| CellIndexToPart::new(c, 0..0)),
            point_properties: Vec::new(),
            topology_finalized: false,
            state: CollectionState::Building,
        }
    }
}

impl PartCollection {
    /// Collection initialized from `metadata`, owning `range` (or every cell).
    pub fn new(metadata: PartMetadata, range: Option<ReadRange>) -> Result<Self, PartSieveError> {
        let mut collection = Self::default();
        collection.init_collection(metadata, range)?;
        Ok(collection)
    }

    /// Discard all state, topology included, and start over from `metadata`.
    ///
    /// Without `range` every category defaults to `[0, cells_per_type)`.
    /// A part slot is allocated for each active material only.
    pub fn init_collection(
        &mut self,
        metadata: PartMetadata,
        range: Option<ReadRange>,
    ) -> Result<(), PartSieveError> {
        metadata.validate()?;
        let range = range.unwrap_or_else(|| ReadRange::full(&metadata));
        range.validate(&metadata)?;

        let mut parts: Vec<Option<Part>> = vec![None; metadata.number_of_materials()];
        for info in metadata.parts.iter().filter(|info| info.active) {
            // validate() guarantees 1 <= material <= parts.len()
            parts[info.material - 1] = Some(Part::new(info.part_type, info.name.clone()));
        }

        self.cell_index_to_part = PartType::ALL.map(|c| CellIndexToPart::new(c, range.window(c)));
        self.parts = parts;
        self.point_properties.clear();
        self.topology_finalized = false;
        self.state = CollectionState::Building;
        log::debug!(
            "initialized part collection: {} materials ({} active), {} points",
            metadata.number_of_materials(),
            self.parts.iter().flatten().count(),
            metadata.num_points
        );
        self.metadata = Some(metadata);
        self.read_range = Some(range);
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> CollectionState {
        self.state
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.state == CollectionState::Finalized
    }

    #[inline]
    pub fn metadata(&self) -> Option<&PartMetadata> {
        self.metadata.as_ref()
    }

    #[inline]
    pub fn read_range(&self) -> Option<&ReadRange> {
        self.read_range.as_ref()
    }

    /// Cross-reference of one category.
    #[inline]
    pub fn cell_index_to_part(&self, category: PartType) -> &CellIndexToPart {
        &self.cell_index_to_part[category.index()]
    }

    fn ensure_building(&self) -> Result<&PartMetadata, PartSieveError> {
        if self.is_finalized() {
            return Err(StateError::AlreadyFinalized.into());
        }
        self.metadata
            .as_ref()
            .ok_or_else(|| StateError::NotInitialized.into())
    }

    fn ensure_finalized(&self) -> Result<(), PartSieveError> {
        if self.is_finalized() {
            Ok(())
        } else {
            Err(StateError::NotFinalized.into())
        }
    }

    /// Append one cell to the part owning `material_id`.
    ///
    /// `connectivity` holds 1-based global point ids, decremented here once.
    /// Cells of inactive materials are dropped without error.
    ///
    /// # Errors
    /// - `AlreadyFinalized`, `NotInitialized` or `TopologyFrozen` from the
    ///   lifecycle state.
    /// - `MaterialOutOfRange` if `material_id` is not in `[1, materials]`.
    /// - `CellIndexOutOfRange` if `global_cell_index` is outside the read range.
    /// - `UnsortedCells` if `global_cell_index` does not exceed every index
    ///   already inserted for `category`.
    /// - `TooManyVertices`, `VertexCountMismatch`, `ZeroPointId`,
    ///   `PointOutOfRange` for malformed connectivity.
    pub fn insert_cell(
        &mut self,
        category: PartType,
        global_cell_index: usize,
        material_id: usize,
        cell_type: CellType,
        connectivity: &[i64],
    ) -> Result<(), PartSieveError> {
        let num_points = self.ensure_building()?.num_points;
        if self.topology_finalized {
            return Err(StateError::TopologyFrozen.into());
        }
        let slot = material_id
            .checked_sub(1)
            .filter(|&slot| slot < self.parts.len())
            .ok_or(DataIntegrityError::MaterialOutOfRange {
                id: material_id,
                num_materials: self.parts.len(),
            })?;
        let map = &mut self.cell_index_to_part[category.index()];
        map.offset_of(global_cell_index)?;
        let Some(part) = self.parts[slot].as_mut() else {
            return Ok(());
        };

        if connectivity.len() > MAX_CELL_VERTICES {
            return Err(DataIntegrityError::TooManyVertices {
                found: connectivity.len(),
                max: MAX_CELL_VERTICES,
            }
            .into());
        }
        if connectivity.len() != cell_type.num_vertices() {
            return Err(DataIntegrityError::VertexCountMismatch {
                cell_type: cell_type.as_str(),
                expected: cell_type.num_vertices(),
                found: connectivity.len(),
            }
            .into());
        }
        let mut vertices = [0usize; MAX_CELL_VERTICES];
        for (dst, &id) in vertices.iter_mut().zip(connectivity) {
            if id < 1 {
                return Err(DataIntegrityError::ZeroPointId(id).into());
            }
            let global = usize::try_from(id - 1)
                .ok()
                .filter(|&g| g < num_points)
                .ok_or(DataIntegrityError::PointOutOfRange { id, num_points })?;
            *dst = global;
        }

        map.check_next(global_cell_index)?;
        let cell = part.insert_cell(cell_type, &vertices[..connectivity.len()]);
        map.record(global_cell_index, CellRef { part: slot, cell })?;
        Ok(())
    }

    /// Mark cells of `category` dead for this timestep.
    ///
    /// `death_flags[i]` refers to global cell `min + i` of the read range; any
    /// non-zero value means dead. A no-op when no cells of the category are
    /// tracked.
    pub fn set_cell_dead_flags(
        &mut self,
        category: PartType,
        death_flags: &[i32],
    ) -> Result<(), PartSieveError> {
        self.ensure_building()?;
        let marked = distribute_dead_flags(
            &self.cell_index_to_part[category.index()],
            &mut self.parts,
            death_flags,
        )?;
        log::trace!("{category}: {marked} cells marked dead");
        Ok(())
    }

    /// Declare cell property `name` on every active part of `category`.
    ///
    /// `offset` is the position of the first component inside each cell's
    /// results tuple. Property precision follows the metadata word size.
    pub fn add_property(
        &mut self,
        category: PartType,
        name: &str,
        offset: usize,
        components: usize,
    ) -> Result<(), PartSieveError> {
        let scalar = self.ensure_building()?.scalar_type()?;
        let declared = declare_property(&mut self.parts, category, name, offset, components, scalar)?;
        if declared == 0 {
            log::trace!("property `{name}` matches no active {category} part");
        }
        Ok(())
    }

    /// Fan a flat results buffer for `category` out into declared properties.
    ///
    /// `buffer` holds `cell_count` tuples of `tuple_stride` values covering
    /// this instance's read range in global order.
    pub fn fill_cell_properties<T: ArrayScalar>(
        &mut self,
        buffer: &[T],
        category: PartType,
        cell_count: usize,
        tuple_stride: usize,
    ) -> Result<(), PartSieveError> {
        self.ensure_building()?;
        fill_cell_properties(
            &self.cell_index_to_part[category.index()],
            &mut self.parts,
            buffer,
            cell_count,
            tuple_stride,
        )?;
        Ok(())
    }

    /// Register a global per-point array, indexed by global point id.
    pub fn add_point_array(&mut self, array: DataArray) -> Result<(), PartSieveError> {
        self.ensure_building()?;
        self.point_properties.push(array);
        Ok(())
    }

    #[inline]
    pub fn number_of_point_arrays(&self) -> usize {
        self.point_properties.len()
    }

    #[inline]
    pub fn point_array(&self, index: usize) -> Option<&DataArray> {
        self.point_properties.get(index)
    }

    /// Renumber every part's topology to local point ids and prune parts
    /// without cells. Runs once; later calls are no-ops.
    pub fn finalize_topology(&mut self) -> Result<(), PartSieveError> {
        let num_points = self.ensure_building()?.num_points;
        if self.topology_finalized {
            return Ok(());
        }

        let mut renumberer = PointRenumberer::new(num_points);
        let mut kept = 0;
        let mut pruned = 0;
        for slot in self.parts.iter_mut() {
            let Some(part) = slot.as_mut() else {
                continue;
            };
            if part.topology().is_empty() {
                log::debug!("pruning part `{}`: no cells in this read range", part.name());
                *slot = None;
                pruned += 1;
                continue;
            }
            let point_ids = renumberer.renumber(part.topology_mut())?;
            part.set_point_ids(point_ids);
            part.debug_assert_invariants();
            kept += 1;
        }
        self.topology_finalized = true;
        log::debug!("topology finalized: {kept} parts kept, {pruned} pruned");
        Ok(())
    }

    /// Build every part's grid from `points` and enter [`CollectionState::Finalized`].
    ///
    /// With `remove_dead_cells` the cells marked dead this timestep, and their
    /// property tuples, are left out of the grids. Per-timestep scratch is
    /// consumed.
    ///
    /// # Errors
    /// `PointPoolTooSmall` if `points` or a registered point array has fewer
    /// tuples than the model has points.
    pub fn finalize(&mut self, points: &Points, remove_dead_cells: bool) -> Result<(), PartSieveError> {
        let num_points = self.ensure_building()?.num_points;
        if points.len() < num_points {
            return Err(DataIntegrityError::PointPoolTooSmall {
                name: points.as_array().name().to_owned(),
                required: num_points,
                found: points.len(),
            }
            .into());
        }
        if let Some(short) = self
            .point_properties
            .iter()
            .find(|a| a.number_of_tuples() < num_points)
        {
            return Err(DataIntegrityError::PointPoolTooSmall {
                name: short.name().to_owned(),
                required: num_points,
                found: short.number_of_tuples(),
            }
            .into());
        }

        self.finalize_topology()?;
        for part in self.parts.iter_mut().flatten() {
            let grid = build_grid(part, points, &self.point_properties, remove_dead_cells)?;
            part.set_grid(grid);
            part.reset_time_step_info();
        }
        self.point_properties.clear();
        self.state = CollectionState::Finalized;
        log::debug!(
            "finalized {} part grids (dead cells {})",
            self.parts.iter().flatten().count(),
            if remove_dead_cells { "removed" } else { "kept" }
        );
        Ok(())
    }

    /// Return to [`CollectionState::Building`] for the next timestep.
    ///
    /// Topology and point renumbering are kept; dead cells, declared
    /// properties, point arrays and built grids are dropped.
    pub fn reset_time_step_info(&mut self) {
        for part in self.parts.iter_mut().flatten() {
            part.reset_time_step_info();
            part.take_grid();
        }
        self.point_properties.clear();
        self.state = CollectionState::Building;
    }

    /// Number of part slots, including inactive and pruned ones.
    #[inline]
    pub fn number_of_parts(&self) -> usize {
        self.parts.len()
    }

    /// True if slot `index` holds a part. Out-of-range indices are inactive.
    #[inline]
    pub fn is_active_part(&self, index: usize) -> bool {
        matches!(self.parts.get(index), Some(Some(_)))
    }

    #[inline]
    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index).and_then(Option::as_ref)
    }

    /// Grid of part slot `index`; `Ok(None)` for an empty or out-of-range slot.
    pub fn grid_for_part(&self, index: usize) -> Result<Option<&UnstructuredGrid>, PartSieveError> {
        self.ensure_finalized()?;
        Ok(self.part(index).and_then(Part::grid))
    }

    /// Move the grid of part slot `index` out of the collection.
    pub fn take_grid_for_part(
        &mut self,
        index: usize,
    ) -> Result<Option<UnstructuredGrid>, PartSieveError> {
        self.ensure_finalized()?;
        Ok(self
            .parts
            .get_mut(index)
            .and_then(Option::as_mut)
            .and_then(Part::take_grid))
    }

    /// Stride information for reading `category` from a file holding every
    /// cell of the model.
    pub fn part_read_info(&self, category: PartType) -> PartReadInfo {
        let total = self
            .metadata
            .as_ref()
            .map_or(0, |m| m.number_of_cells(category));
        let window = self.cell_index_to_part[category.index()].window();
        let (count, skip_before) = if window.is_empty() {
            (0, total)
        } else {
            (window.len(), window.start)
        };
        PartReadInfo {
            count,
            skip_before,
            skip_after: total.saturating_sub(count + skip_before),
        }
    }
}

impl fmt::Display for PartCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PartCollection ({:?}, {} point arrays)",
            self.state,
            self.point_properties.len()
        )?;
        for category in PartType::ALL {
            let window = self.cell_index_to_part[category.index()].window();
            if !window.is_empty() {
                writeln!(f, "  {category}: cells [{}, {})", window.start, window.end)?;
            }
        }
        for (slot, part) in self.parts.iter().enumerate() {
            match part {
                Some(part) => writeln!(
                    f,
                    "  part {}: `{}` {} ({} cells, {} points)",
                    slot + 1,
                    part.name(),
                    part.part_type(),
                    part.number_of_cells(),
                    part.point_ids().len()
                )?,
                None => writeln!(f, "  part {}: inactive", slot + 1)?,
            }
        }
        Ok(())
    }
}
