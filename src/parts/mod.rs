//! Per-part storage and the collection that routes cells into it.

pub mod cell_map;
pub mod collection;
pub mod part;

pub use cell_map::{CellIndexToPart, CellRef};
pub use collection::{CollectionState, PartCollection, PartReadInfo};
pub use part::{Part, TimeStepScratch};
