//! Point coordinate storage.
//!
//! Coordinates are stored in a [`DataArray`] with exactly three components
//! per point. The same type serves as the caller-owned global point pool and
//! as the per-part coordinate block of a finalized grid.

use crate::data::array::{ArrayScalar, DataArray, ScalarType};
use crate::mesh_error::DataIntegrityError;

/// Spatial dimension of every point.
pub const POINT_DIMENSION: usize = 3;

const COORDINATES_NAME: &str = "Points";

/// Three-component coordinate array indexed by point id.
#[derive(Clone, Debug, PartialEq)]
pub struct Points {
    array: DataArray,
}

impl Points {
    /// Zero-filled coordinates for `len` points.
    pub fn zeroed(scalar: ScalarType, len: usize) -> Self {
        Self {
            array: DataArray::try_new(COORDINATES_NAME, scalar, POINT_DIMENSION, len)
                .unwrap_or_else(|_| unreachable!("POINT_DIMENSION is non-zero")),
        }
    }

    /// Build from `[x, y, z]` triples.
    pub fn from_xyz<T: ArrayScalar>(xyz: &[[T; POINT_DIMENSION]]) -> Self {
        let flat: Vec<T> = xyz.iter().flatten().copied().collect();
        Self {
            array: DataArray::from_vec(COORDINATES_NAME, POINT_DIMENSION, flat)
                .unwrap_or_else(|_| unreachable!("flattened triples are a multiple of three")),
        }
    }

    /// Wrap an existing array, validating the component count.
    pub fn from_array(array: DataArray) -> Result<Self, DataIntegrityError> {
        if array.components() != POINT_DIMENSION {
            return Err(DataIntegrityError::ComponentMismatch {
                expected: POINT_DIMENSION,
                found: array.components(),
            });
        }
        Ok(Self { array })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.array.number_of_tuples()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    #[inline]
    pub fn scalar_type(&self) -> ScalarType {
        self.array.scalar_type()
    }

    /// Underlying coordinate array.
    #[inline]
    pub fn as_array(&self) -> &DataArray {
        &self.array
    }

    /// Consumes the wrapper and returns the coordinate array.
    #[inline]
    pub fn into_array(self) -> DataArray {
        self.array
    }

    /// Coordinates of point `id` in double precision.
    pub fn point(&self, id: usize) -> Option<[f64; POINT_DIMENSION]> {
        let t = self.array.tuple_f64(id)?;
        Some([t[0], t[1], t[2]])
    }

    /// Copy point `src_id` of `other` into slot `dst_id`.
    pub fn copy_point_from(
        &mut self,
        dst_id: usize,
        other: &Points,
        src_id: usize,
    ) -> Result<(), DataIntegrityError> {
        self.array.copy_tuple_from(dst_id, &other.array, src_id)
    }
}
