//! Data module: typed tuple arrays, point coordinates and cell properties
#![warn(missing_docs)]

pub mod array;
pub mod cell_property;
pub mod points;

pub use array::{ArrayScalar, ArrayValues, DataArray, ScalarType};
pub use cell_property::CellProperty;
pub use points::{POINT_DIMENSION, Points};
