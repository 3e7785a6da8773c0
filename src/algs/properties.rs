//! Cell property declaration and fan-out of flat results buffers.

use crate::data::array::{ArrayScalar, ScalarType};
use crate::data::cell_property::CellProperty;
use crate::mesh_error::DataIntegrityError;
use crate::parts::cell_map::CellIndexToPart;
use crate::parts::part::Part;
use crate::topology::part_type::PartType;

/// Declare property `name` on every part of type `category`.
///
/// Each matching part gets a zeroed array with one tuple per ingested cell.
/// Returns the number of parts that received the property.
pub fn declare_property(
    parts: &mut [Option<Part>],
    category: PartType,
    name: &str,
    offset: usize,
    components: usize,
    scalar: ScalarType,
) -> Result<usize, DataIntegrityError> {
    let mut declared = 0;
    for part in parts.iter_mut().flatten() {
        if part.part_type() != category {
            continue;
        }
        let property =
            CellProperty::try_new(name, offset, components, part.number_of_cells(), scalar)?;
        part.scratch_mut().push_property(property);
        declared += 1;
    }
    Ok(declared)
}

/// Copy each mapped cell's tuple from `buffer` into the declared properties
/// of its part.
///
/// `buffer` holds `cell_count` tuples of `tuple_stride` values for the cells
/// of this instance's window, in global order. Tuples are appended at each
/// property's cursor, so the n-th mapped cell of a part lands in slot n.
/// Every property is checked against the stride and its remaining capacity
/// before any tuple is written.
pub fn fill_cell_properties<T: ArrayScalar>(
    map: &CellIndexToPart,
    parts: &mut [Option<Part>],
    buffer: &[T],
    cell_count: usize,
    tuple_stride: usize,
) -> Result<(), DataIntegrityError> {
    if map.is_empty() {
        return Ok(());
    }
    let available = cell_count.saturating_mul(tuple_stride);
    if buffer.len() < available {
        return Err(DataIntegrityError::BufferTooShort {
            expected: available,
            found: buffer.len(),
        });
    }
    if cell_count < map.len() {
        return Err(DataIntegrityError::BufferTooShort {
            expected: map.len().saturating_mul(tuple_stride),
            found: available,
        });
    }

    let mut pending = vec![0usize; parts.len()];
    for (_, cell) in map.iter() {
        if let Some(count) = pending.get_mut(cell.part) {
            *count += 1;
        }
    }
    for (part, &count) in parts.iter().zip(&pending) {
        let Some(part) = part else { continue };
        if count == 0 {
            continue;
        }
        for property in part.cell_properties() {
            property.check_fill(tuple_stride, count)?;
        }
    }

    for (offset, cell) in map.iter() {
        let Some(part) = parts.get_mut(cell.part).and_then(Option::as_mut) else {
            continue;
        };
        let start = offset * tuple_stride;
        let tuple = &buffer[start..start + tuple_stride];
        for property in part.scratch_mut().cell_properties_mut() {
            property.push_tuple(tuple)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::cell_map::CellRef;
    use crate::topology::cell_type::CellType;

    fn two_shell_parts() -> (CellIndexToPart, Vec<Option<Part>>) {
        let mut parts = vec![
            Some(Part::new(PartType::Shell, "left")),
            Some(Part::new(PartType::Shell, "right")),
            Some(Part::new(PartType::Solid, "block")),
        ];
        let mut map = CellIndexToPart::new(PartType::Shell, 0..3);
        for (global, slot) in [(0usize, 1usize), (1, 0), (2, 1)] {
            let cell = parts[slot]
                .as_mut()
                .unwrap()
                .insert_cell(CellType::Quadrilateral, &[0, 1, 2, 3]);
            map.record(global, CellRef { part: slot, cell }).unwrap();
        }
        (map, parts)
    }

    #[test]
    fn declare_only_matches_category() {
        let (_, mut parts) = two_shell_parts();
        let n = declare_property(&mut parts, PartType::Shell, "thickness", 1, 1, ScalarType::F32)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(parts[0].as_ref().unwrap().cell_properties()[0].data().number_of_tuples(), 1);
        assert_eq!(parts[1].as_ref().unwrap().cell_properties()[0].data().number_of_tuples(), 2);
        assert!(parts[2].as_ref().unwrap().cell_properties().is_empty());
    }

    #[test]
    fn tuples_fan_out_in_global_order() {
        let (map, mut parts) = two_shell_parts();
        declare_property(&mut parts, PartType::Shell, "thickness", 1, 1, ScalarType::F64).unwrap();
        declare_property(&mut parts, PartType::Shell, "pair", 0, 2, ScalarType::F64).unwrap();
        let buffer = [10.0f32, 11.0, 20.0, 21.0, 30.0, 31.0];
        fill_cell_properties(&map, &mut parts, &buffer, 3, 2).unwrap();

        let right = parts[1].as_ref().unwrap();
        assert_eq!(right.cell_properties()[0].data().as_slice::<f64>(), Some(&[11.0, 31.0][..]));
        assert_eq!(
            right.cell_properties()[1].data().as_slice::<f64>(),
            Some(&[10.0, 11.0, 30.0, 31.0][..])
        );
        let left = parts[0].as_ref().unwrap();
        assert_eq!(left.cell_properties()[0].data().as_slice::<f64>(), Some(&[21.0][..]));
        assert!(left.cell_properties().iter().all(CellProperty::is_filled));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let (map, mut parts) = two_shell_parts();
        declare_property(&mut parts, PartType::Shell, "t", 0, 1, ScalarType::F32).unwrap();
        let err = fill_cell_properties(&map, &mut parts, &[1.0f32; 5], 3, 2).unwrap_err();
        assert_eq!(err, DataIntegrityError::BufferTooShort { expected: 6, found: 5 });
        assert!(fill_cell_properties(&map, &mut parts, &[1.0f32; 4], 2, 2).is_err());
    }

    #[test]
    fn property_past_stride_is_rejected() {
        let (map, mut parts) = two_shell_parts();
        declare_property(&mut parts, PartType::Shell, "wide", 1, 2, ScalarType::F32).unwrap();
        let err = fill_cell_properties(&map, &mut parts, &[0.0f32; 6], 3, 2).unwrap_err();
        assert!(matches!(err, DataIntegrityError::ComponentMismatch { .. }));
    }

    #[test]
    fn rejected_fill_leaves_cursors_untouched() {
        let (map, mut parts) = two_shell_parts();
        declare_property(&mut parts, PartType::Shell, "ok", 0, 1, ScalarType::F32).unwrap();
        declare_property(&mut parts, PartType::Shell, "wide", 0, 3, ScalarType::F32).unwrap();
        let err = fill_cell_properties(&map, &mut parts, &[0.0f32; 6], 3, 2).unwrap_err();
        assert_eq!(err, DataIntegrityError::ComponentMismatch { expected: 3, found: 2 });
        for part in parts.iter().flatten() {
            assert!(part.cell_properties().iter().all(|p| p.cursor() == 0));
        }
    }

    #[test]
    fn second_fill_overflows_without_writing() {
        let (map, mut parts) = two_shell_parts();
        declare_property(&mut parts, PartType::Shell, "t", 0, 1, ScalarType::F64).unwrap();
        fill_cell_properties(&map, &mut parts, &[1.0f32, 2.0, 3.0], 3, 1).unwrap();
        let err = fill_cell_properties(&map, &mut parts, &[7.0f32; 3], 3, 1).unwrap_err();
        assert!(matches!(err, DataIntegrityError::PropertyOverflow { .. }));
        let right = parts[1].as_ref().unwrap();
        assert_eq!(right.cell_properties()[0].data().as_slice::<f64>(), Some(&[1.0, 3.0][..]));
        let left = parts[0].as_ref().unwrap();
        assert_eq!(left.cell_properties()[0].data().as_slice::<f64>(), Some(&[2.0][..]));
    }
}
