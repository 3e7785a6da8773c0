//! Named, typed tuple arrays for per-cell and per-point data.
//!
//! Results files store values in either single or double precision depending
//! on their word size, so arrays are tagged with a [`ScalarType`] and hold a
//! flat `Vec` of that type. Writes accept either precision and convert.

use std::fmt::Debug;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::mesh_error::DataIntegrityError;

/// Scalar type tag for data arrays.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    F32,
    F64,
}

impl ScalarType {
    /// Scalar type for a results file word size in bytes.
    pub fn from_word_size(word_size: usize) -> Option<Self> {
        match word_size {
            4 => Some(ScalarType::F32),
            8 => Some(ScalarType::F64),
            _ => None,
        }
    }

    /// Size in bytes of one value.
    pub fn size_of(self) -> usize {
        match self {
            ScalarType::F32 => 4,
            ScalarType::F64 => 8,
        }
    }

    /// Returns a stable string label for the scalar type.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }
}

/// Flat value storage of a [`DataArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayValues {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ArrayValues {
    fn zeroed(scalar: ScalarType, len: usize) -> Self {
        match scalar {
            ScalarType::F32 => ArrayValues::F32(vec![0.0; len]),
            ScalarType::F64 => ArrayValues::F64(vec![0.0; len]),
        }
    }

    /// Scalar type tag for this buffer.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ArrayValues::F32(_) => ScalarType::F32,
            ArrayValues::F64(_) => ScalarType::F64,
        }
    }

    /// Number of scalar values.
    pub fn len(&self) -> usize {
        match self {
            ArrayValues::F32(v) => v.len(),
            ArrayValues::F64(v) => v.len(),
        }
    }

    /// Return true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw little-endian-in-memory bytes of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ArrayValues::F32(v) => bytemuck::cast_slice(v),
            ArrayValues::F64(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Scalar types that can back a [`DataArray`].
pub trait ArrayScalar:
    bytemuck::Pod + Default + Debug + Send + Sync + AsPrimitive<f32> + AsPrimitive<f64>
{
    /// Scalar type tag for this concrete type.
    const SCALAR_TYPE: ScalarType;

    /// Wrap a typed buffer into tagged storage.
    fn wrap(values: Vec<Self>) -> ArrayValues;
    /// Borrow a typed buffer if the tag matches.
    fn unwrap(values: &ArrayValues) -> Option<&[Self]>;
}

impl ArrayScalar for f32 {
    const SCALAR_TYPE: ScalarType = ScalarType::F32;

    fn wrap(values: Vec<Self>) -> ArrayValues {
        ArrayValues::F32(values)
    }

    fn unwrap(values: &ArrayValues) -> Option<&[Self]> {
        match values {
            ArrayValues::F32(v) => Some(v),
            ArrayValues::F64(_) => None,
        }
    }
}

impl ArrayScalar for f64 {
    const SCALAR_TYPE: ScalarType = ScalarType::F64;

    fn wrap(values: Vec<Self>) -> ArrayValues {
        ArrayValues::F64(values)
    }

    fn unwrap(values: &ArrayValues) -> Option<&[Self]> {
        match values {
            ArrayValues::F64(v) => Some(v),
            ArrayValues::F32(_) => None,
        }
    }
}

/// A named array of fixed-width tuples.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    name: String,
    components: usize,
    values: ArrayValues,
}

impl DataArray {
    /// Allocate a zero-filled array of `tuples` tuples.
    pub fn try_new(
        name: impl Into<String>,
        scalar: ScalarType,
        components: usize,
        tuples: usize,
    ) -> Result<Self, DataIntegrityError> {
        if components == 0 {
            return Err(DataIntegrityError::ZeroComponents);
        }
        Ok(Self {
            name: name.into(),
            components,
            values: ArrayValues::zeroed(scalar, components * tuples),
        })
    }

    /// Wrap existing values; `values.len()` must be a multiple of `components`.
    pub fn from_vec<T: ArrayScalar>(
        name: impl Into<String>,
        components: usize,
        values: Vec<T>,
    ) -> Result<Self, DataIntegrityError> {
        if components == 0 {
            return Err(DataIntegrityError::ZeroComponents);
        }
        if values.len() % components != 0 {
            return Err(DataIntegrityError::ComponentMismatch {
                expected: components,
                found: values.len() % components,
            });
        }
        Ok(Self {
            name: name.into(),
            components,
            values: T::wrap(values),
        })
    }

    /// Zero-filled array with the same name, scalar type and component count.
    pub fn new_like(&self, tuples: usize) -> Self {
        Self {
            name: self.name.clone(),
            components: self.components,
            values: ArrayValues::zeroed(self.scalar_type(), self.components * tuples),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn scalar_type(&self) -> ScalarType {
        self.values.scalar_type()
    }

    #[inline]
    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    /// Typed view of the flat buffer if `T` matches the array's scalar type.
    pub fn as_slice<T: ArrayScalar>(&self) -> Option<&[T]> {
        T::unwrap(&self.values)
    }

    /// Typed view of tuple `index`.
    pub fn tuple<T: ArrayScalar>(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.components)?;
        self.as_slice::<T>()?.get(start..start + self.components)
    }

    /// Tuple `index` converted to `f64`.
    pub fn tuple_f64(&self, index: usize) -> Option<Vec<f64>> {
        let start = index.checked_mul(self.components)?;
        let range = start..start + self.components;
        match &self.values {
            ArrayValues::F32(v) => v.get(range).map(|t| t.iter().map(|&x| f64::from(x)).collect()),
            ArrayValues::F64(v) => v.get(range).map(<[f64]>::to_vec),
        }
    }

    /// Overwrite tuple `index` with `src`, converting precision if needed.
    pub fn set_tuple<T: ArrayScalar>(
        &mut self,
        index: usize,
        src: &[T],
    ) -> Result<(), DataIntegrityError> {
        if src.len() != self.components {
            return Err(DataIntegrityError::ComponentMismatch {
                expected: self.components,
                found: src.len(),
            });
        }
        let tuples = self.number_of_tuples();
        let start = index.saturating_mul(self.components);
        let written = match &mut self.values {
            ArrayValues::F32(v) => write_converted::<f32, T>(v, start, src),
            ArrayValues::F64(v) => write_converted::<f64, T>(v, start, src),
        };
        written.ok_or(DataIntegrityError::TupleOutOfRange { index, tuples })
    }

    /// Copy tuple `src_index` of `other` into tuple `dst_index` of `self`.
    pub fn copy_tuple_from(
        &mut self,
        dst_index: usize,
        other: &DataArray,
        src_index: usize,
    ) -> Result<(), DataIntegrityError> {
        let out_of_range = DataIntegrityError::TupleOutOfRange {
            index: src_index,
            tuples: other.number_of_tuples(),
        };
        match &other.values {
            ArrayValues::F32(_) => {
                let src = other.tuple::<f32>(src_index).ok_or(out_of_range)?;
                self.set_tuple(dst_index, src)
            }
            ArrayValues::F64(_) => {
                let src = other.tuple::<f64>(src_index).ok_or(out_of_range)?;
                self.set_tuple(dst_index, src)
            }
        }
    }

    /// Raw bytes of the flat buffer.
    pub fn as_bytes(&self) -> &[u8] {
        self.values.as_bytes()
    }
}

fn write_converted<D, S>(dst: &mut [D], start: usize, src: &[S]) -> Option<()>
where
    D: Copy + 'static,
    S: AsPrimitive<D>,
{
    let out = dst.get_mut(start..start.checked_add(src.len())?)?;
    for (d, s) in out.iter_mut().zip(src) {
        *d = s.as_();
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_array_has_requested_shape() {
        let a = DataArray::try_new("stress", ScalarType::F32, 6, 4).unwrap();
        assert_eq!(a.number_of_tuples(), 4);
        assert_eq!(a.components(), 6);
        assert_eq!(a.scalar_type(), ScalarType::F32);
        assert_eq!(a.as_bytes().len(), 4 * 6 * 4);
    }

    #[test]
    fn zero_components_rejected() {
        assert_eq!(
            DataArray::try_new("x", ScalarType::F64, 0, 1).unwrap_err(),
            DataIntegrityError::ZeroComponents
        );
    }

    #[test]
    fn set_tuple_converts_precision() {
        let mut a = DataArray::try_new("v", ScalarType::F32, 2, 2).unwrap();
        a.set_tuple(1, &[1.5f64, -2.0]).unwrap();
        assert_eq!(a.tuple::<f32>(1), Some(&[1.5f32, -2.0][..]));
        assert_eq!(a.tuple::<f64>(1), None);
        assert_eq!(a.tuple_f64(1), Some(vec![1.5, -2.0]));
    }

    #[test]
    fn set_tuple_bounds_checked() {
        let mut a = DataArray::try_new("v", ScalarType::F64, 1, 2).unwrap();
        assert_eq!(
            a.set_tuple(2, &[1.0f64]),
            Err(DataIntegrityError::TupleOutOfRange { index: 2, tuples: 2 })
        );
        assert_eq!(
            a.set_tuple(0, &[1.0f64, 2.0]),
            Err(DataIntegrityError::ComponentMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn copy_tuple_between_arrays() {
        let src = DataArray::from_vec("d", 3, vec![0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mut dst = src.new_like(1);
        dst.copy_tuple_from(0, &src, 1).unwrap();
        assert_eq!(dst.tuple::<f64>(0), Some(&[3.0, 4.0, 5.0][..]));
        assert_eq!(dst.name(), "d");
        assert!(dst.copy_tuple_from(0, &src, 2).is_err());
    }

    #[test]
    fn ragged_vec_rejected() {
        assert!(DataArray::from_vec("d", 3, vec![0.0f32; 4]).is_err());
    }
}
