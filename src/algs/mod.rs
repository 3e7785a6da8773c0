//! Algorithms run by [`PartCollection`](crate::parts::PartCollection) over its parts.

pub mod dead_cells;
pub mod grid_builder;
pub mod properties;

pub use dead_cells::distribute_dead_flags;
pub use grid_builder::{build_grid, construct_cells_without_dead, construct_points};
pub use properties::{declare_property, fill_cell_properties};
