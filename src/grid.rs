//! Finalized per-part unstructured grid.

use crate::data::array::DataArray;
use crate::data::points::Points;
use crate::topology::cell_array::CellTopology;
use crate::topology::cell_type::CellType;
use crate::topology::part_type::PartType;

/// Field-data key holding the part name.
pub const NAME_FIELD: &str = "Name";
/// Field-data key holding the part type name.
pub const TYPE_FIELD: &str = "Type";

/// Immutable mesh of one part: cells in part-local point ids, the part's
/// point coordinates, and per-cell / per-point data arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct UnstructuredGrid {
    part_name: String,
    part_type: PartType,
    topology: CellTopology,
    cell_data: Vec<DataArray>,
    points: Points,
    point_data: Vec<DataArray>,
}

impl UnstructuredGrid {
    pub(crate) fn new(
        part_name: String,
        part_type: PartType,
        topology: CellTopology,
        cell_data: Vec<DataArray>,
        points: Points,
        point_data: Vec<DataArray>,
    ) -> Self {
        Self {
            part_name,
            part_type,
            topology,
            cell_data,
            points,
            point_data,
        }
    }

    #[inline]
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    #[inline]
    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    /// String field data attached to the grid (`Name`, `Type`).
    pub fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            NAME_FIELD => Some(&self.part_name),
            TYPE_FIELD => Some(self.part_type.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn number_of_cells(&self) -> usize {
        self.topology.len()
    }

    #[inline]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn topology(&self) -> &CellTopology {
        &self.topology
    }

    #[inline]
    pub fn cell_types(&self) -> &[CellType] {
        self.topology.cell_types()
    }

    #[inline]
    pub fn cell_locations(&self) -> &[usize] {
        self.topology.cell_locations()
    }

    #[inline]
    pub fn cell_structure(&self) -> &[usize] {
        self.topology.cell_structure()
    }

    /// Local point ids of cell `index`.
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        self.topology.cell(index)
    }

    #[inline]
    pub fn points(&self) -> &Points {
        &self.points
    }

    #[inline]
    pub fn cell_data(&self) -> &[DataArray] {
        &self.cell_data
    }

    /// Cell array by name.
    pub fn cell_array(&self, name: &str) -> Option<&DataArray> {
        self.cell_data.iter().find(|a| a.name() == name)
    }

    #[inline]
    pub fn point_data(&self) -> &[DataArray] {
        &self.point_data
    }

    /// Point array by name.
    pub fn point_array(&self, name: &str) -> Option<&DataArray> {
        self.point_data.iter().find(|a| a.name() == name)
    }
}
