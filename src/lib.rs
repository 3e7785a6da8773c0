#![cfg_attr(docsrs, feature(doc_cfg))]
//! # part-sieve
//!
//! part-sieve reorganizes globally indexed finite-element results into
//! independent per-part unstructured grids. A results decoder feeds it cells,
//! death flags and flat per-cell result buffers; part-sieve splits them by
//! material, renumbers each part's points into a compact local space,
//! optionally excises dead cells and hands back one grid per part.
//!
//! ## Features
//! - Partitioned ingestion: each [`PartCollection`] owns a `[min, max)` window
//!   of global cell indices per category, so workers can split a model
//! - Linear-time point renumbering through a reusable lookup arena
//! - Dead-cell excision that keeps every cell property in lockstep
//! - Single- or double-precision property arrays following the results word size
//! - Explicit `Building` / `Finalized` lifecycle with typed errors
//!
//! ## Usage
//!
//! ```
//! use part_sieve::prelude::*;
//!
//! let meta = PartMetadata::new(4, 4)
//!     .with_part(1, PartType::Shell, "panel", true)
//!     .with_cells(PartType::Shell, 2);
//! let mut parts = PartCollection::new(meta, None)?;
//! parts.insert_cell(PartType::Shell, 0, 1, CellType::Quadrilateral, &[1, 2, 3, 4])?;
//! parts.insert_cell(PartType::Shell, 1, 1, CellType::Quadrilateral, &[2, 3, 4, 1])?;
//! parts.set_cell_dead_flags(PartType::Shell, &[1, 0])?;
//!
//! let pool = Points::from_xyz(&[
//!     [0.0f32, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [1.0, 1.0, 0.0],
//!     [0.0, 1.0, 0.0],
//! ]);
//! parts.finalize(&pool, true)?;
//! let grid = parts.grid_for_part(0)?.expect("part 1 is active");
//! assert_eq!(grid.number_of_cells(), 1);
//! assert_eq!(grid.cell(0), Some(&[1, 2, 3, 0][..]));
//! # Ok::<(), part_sieve::mesh_error::PartSieveError>(())
//! ```
//!
//! ## Invariant checking
//! Enable the `check-invariants` feature to validate part storage after
//! topology finalization in release builds; debug builds always check.

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod grid;
pub mod mesh_error;
pub mod metadata;
pub mod parts;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use grid::UnstructuredGrid;
pub use mesh_error::PartSieveError;
pub use parts::PartCollection;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::array::{ArrayScalar, DataArray, ScalarType};
    pub use crate::data::points::Points;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::grid::UnstructuredGrid;
    pub use crate::mesh_error::{DataIntegrityError, PartSieveError, StateError};
    pub use crate::metadata::{PartInfo, PartMetadata, ReadRange};
    pub use crate::parts::collection::{CollectionState, PartCollection, PartReadInfo};
    pub use crate::parts::part::Part;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::part_type::PartType;
}
