//! Cell shape metadata for ingested elements.

use crate::mesh_error::DataIntegrityError;

/// Largest vertex count of any supported cell (the 8-node hexahedron).
pub const MAX_CELL_VERTICES: usize = 8;

/// Linear cell shapes produced by finite-element element blocks.
///
/// Codes follow the VTK linear cell numbering so grids can be handed to a
/// renderer without translation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellType {
    /// 0D vertex (particles).
    #[default]
    Vertex,
    /// 1D segment (beams).
    Segment,
    /// 2D simplex (degenerate shells).
    Triangle,
    /// 2D tensor-product cell (shells).
    Quadrilateral,
    /// 3D simplex (degenerate solids).
    Tetrahedron,
    /// 3D tensor-product cell (solids, thick shells).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
        }
    }

    /// Number of vertices in the cell's connectivity record.
    pub fn num_vertices(self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
        }
    }

    /// VTK cell type code.
    pub fn vtk_code(self) -> u8 {
        match self {
            CellType::Vertex => 1,
            CellType::Segment => 3,
            CellType::Triangle => 5,
            CellType::Quadrilateral => 9,
            CellType::Tetrahedron => 10,
            CellType::Hexahedron => 12,
            CellType::Prism => 13,
            CellType::Pyramid => 14,
        }
    }

    /// Parse a VTK cell type code.
    pub fn from_vtk_code(code: u8) -> Result<Self, DataIntegrityError> {
        match code {
            1 => Ok(CellType::Vertex),
            3 => Ok(CellType::Segment),
            5 => Ok(CellType::Triangle),
            9 => Ok(CellType::Quadrilateral),
            10 => Ok(CellType::Tetrahedron),
            12 => Ok(CellType::Hexahedron),
            13 => Ok(CellType::Prism),
            14 => Ok(CellType::Pyramid),
            _ => Err(DataIntegrityError::UnknownCellTypeCode(code)),
        }
    }

    /// Short lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Vertex => "vertex",
            CellType::Segment => "segment",
            CellType::Triangle => "triangle",
            CellType::Quadrilateral => "quadrilateral",
            CellType::Tetrahedron => "tetrahedron",
            CellType::Hexahedron => "hexahedron",
            CellType::Prism => "prism",
            CellType::Pyramid => "pyramid",
        }
    }
}

impl TryFrom<u8> for CellType {
    type Error = DataIntegrityError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CellType::from_vtk_code(code)
    }
}
