//! Global cell index → (part, local cell) cross-reference for one category.
//!
//! Cells appear in the same order in the connectivity block and in every
//! state block of a results file, so once topology is ingested the map lets
//! per-timestep arrays indexed by global cell be routed to parts without any
//! further lookup structure.

use std::ops::Range;

use crate::mesh_error::DataIntegrityError;
use crate::topology::part_type::PartType;

/// Location of an ingested cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellRef {
    /// Slot index of the owning part (`material - 1`).
    pub part: usize,
    /// Index of the cell within its part.
    pub cell: usize,
}

/// Window-relative cross-reference table of one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellIndexToPart {
    category: PartType,
    min_id: usize,
    slots: Vec<Option<CellRef>>,
    /// Highest global index recorded so far.
    last_recorded: Option<usize>,
}

impl CellIndexToPart {
    /// Table covering global cell indices `window` with every slot empty.
    pub fn new(category: PartType, window: Range<usize>) -> Self {
        Self {
            category,
            min_id: window.start,
            slots: vec![None; window.len()],
            last_recorded: None,
        }
    }

    #[inline]
    pub fn category(&self) -> PartType {
        self.category
    }

    /// Global cell indices covered by this table.
    #[inline]
    pub fn window(&self) -> Range<usize> {
        self.min_id..self.min_id + self.slots.len()
    }

    /// Number of covered cells, mapped or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if this instance tracks no cells of the category.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entry at window-relative position `offset`.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<CellRef> {
        self.slots.get(offset).copied().flatten()
    }

    /// Check that `global` lies inside the window and return its offset.
    pub fn offset_of(&self, global: usize) -> Result<usize, DataIntegrityError> {
        let window = self.window();
        if window.contains(&global) {
            Ok(global - self.min_id)
        } else {
            Err(DataIntegrityError::CellIndexOutOfRange {
                category: self.category,
                index: global,
                min: window.start,
                max: window.end,
            })
        }
    }

    /// Check that `global` may be recorded next and return its offset.
    ///
    /// Parts assign local cell indices in insertion order and results tuples
    /// are routed in global order, so recorded indices must strictly increase.
    pub fn check_next(&self, global: usize) -> Result<usize, DataIntegrityError> {
        let offset = self.offset_of(global)?;
        match self.last_recorded {
            Some(previous) if previous >= global => Err(DataIntegrityError::UnsortedCells {
                category: self.category,
                previous,
                index: global,
            }),
            _ => Ok(offset),
        }
    }

    /// Record where global cell `global` was stored.
    pub fn record(&mut self, global: usize, cell: CellRef) -> Result<(), DataIntegrityError> {
        let offset = self.check_next(global)?;
        self.slots[offset] = Some(cell);
        self.last_recorded = Some(global);
        Ok(())
    }

    /// Mapped entries as `(window offset, cell)` in increasing global order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CellRef)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(offset, slot)| slot.map(|cell| (offset, cell)))
    }
}
