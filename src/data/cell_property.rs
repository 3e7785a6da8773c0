//! Declared per-cell result properties and their fill cursors.

use crate::data::array::{ArrayScalar, DataArray, ScalarType};
use crate::mesh_error::DataIntegrityError;

/// One declared cell property of a part for the current timestep.
///
/// `offset` is the position of the property's first component inside each
/// cell's results tuple. `cursor` is the next tuple of `data` to fill; tuples
/// are filled in increasing global cell order, which is the part's local cell
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct CellProperty {
    offset: usize,
    cursor: usize,
    data: DataArray,
}

impl CellProperty {
    /// Declare a property of `components` values for `cells` cells.
    pub fn try_new(
        name: impl Into<String>,
        offset: usize,
        components: usize,
        cells: usize,
        scalar: ScalarType,
    ) -> Result<Self, DataIntegrityError> {
        Ok(Self {
            offset,
            cursor: 0,
            data: DataArray::try_new(name, scalar, components, cells)?,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.data.name()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn data(&self) -> &DataArray {
        &self.data
    }

    /// True once every cell has received a tuple.
    pub fn is_filled(&self) -> bool {
        self.cursor == self.data.number_of_tuples()
    }

    /// Check that `tuples` more tuples of width `tuple_stride` fit.
    pub fn check_fill(&self, tuple_stride: usize, tuples: usize) -> Result<(), DataIntegrityError> {
        let end = self.offset + self.data.components();
        if end > tuple_stride {
            return Err(DataIntegrityError::ComponentMismatch {
                expected: end,
                found: tuple_stride,
            });
        }
        let capacity = self.data.number_of_tuples();
        if self.cursor.saturating_add(tuples) > capacity {
            return Err(DataIntegrityError::PropertyOverflow {
                name: self.data.name().to_owned(),
                capacity,
            });
        }
        Ok(())
    }

    /// Take this property's slice of a full results tuple and store it in the
    /// next free slot.
    pub fn push_tuple<T: ArrayScalar>(&mut self, tuple: &[T]) -> Result<(), DataIntegrityError> {
        let components = self.data.components();
        let src = tuple.get(self.offset..self.offset + components).ok_or(
            DataIntegrityError::ComponentMismatch {
                expected: self.offset + components,
                found: tuple.len(),
            },
        )?;
        let capacity = self.data.number_of_tuples();
        if self.cursor >= capacity {
            return Err(DataIntegrityError::PropertyOverflow {
                name: self.data.name().to_owned(),
                capacity,
            });
        }
        self.data.set_tuple(self.cursor, src)?;
        self.cursor += 1;
        Ok(())
    }

    pub fn into_data(self) -> DataArray {
        self.data
    }
}
