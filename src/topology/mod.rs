//! Cell topology of a part.
//!
//! This module provides:
//! - [`PartType`], the coarse cell category used for I/O striding
//! - [`CellType`], the linear cell shapes a part may hold
//! - [`CellTopology`], the flat `[count, v0, ..]` connectivity store
//! - [`PointRenumberer`], which compacts global point ids to part-local ones

pub mod cell_array;
pub mod cell_type;
pub mod part_type;
pub mod renumber;

pub use cell_array::CellTopology;
pub use cell_type::{CellType, MAX_CELL_VERTICES};
pub use part_type::{NUM_CELL_TYPES, PartType};
pub use renumber::PointRenumberer;
