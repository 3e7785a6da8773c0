//! Compact point renumbering for per-part topology.
//!
//! Every part references a scattered subset of the global point pool. The
//! renumberer rewrites each vertex reference to a dense part-local id,
//! assigned in first-encounter order while walking the cells, and returns
//! the local → global map.
//!
//! # Complexity
//!
//! Lookups go through a lookup arena with one slot per global point instead
//! of a hashed or ordered map. The arena costs `O(num_points)` memory once per
//! collection and gives `O(1)` lookups; it is reused across parts and only the
//! slots a part touched are cleared afterwards, so renumbering a part is
//! linear in its connectivity length.

use crate::mesh_error::DataIntegrityError;
use crate::topology::cell_array::CellTopology;

const UNSEEN: usize = usize::MAX;

/// Reusable global → local lookup arena.
#[derive(Clone, Debug)]
pub struct PointRenumberer {
    lookup: Vec<usize>,
}

impl PointRenumberer {
    /// Allocate an arena covering `num_points` global points.
    pub fn new(num_points: usize) -> Self {
        Self {
            lookup: vec![UNSEEN; num_points],
        }
    }

    /// Number of global points the arena covers.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.lookup.len()
    }

    /// Rewrite `topology` to part-local point ids.
    ///
    /// Returns `point_ids` where `point_ids[local] == global`. Local ids are
    /// dense in `0..point_ids.len()` and follow first-encounter order.
    ///
    /// # Errors
    /// `PointOutOfRange` if a vertex references a point outside the arena,
    /// `MalformedCellStructure` if a record runs past the end of the buffer.
    /// The arena is left clean on error, the topology is not.
    pub fn renumber(
        &mut self,
        topology: &mut CellTopology,
    ) -> Result<Vec<usize>, DataIntegrityError> {
        let mut point_ids = Vec::new();
        let result = self.rewrite(topology.cell_structure_mut(), &mut point_ids);
        for &global in &point_ids {
            self.lookup[global] = UNSEEN;
        }
        result.map(|()| point_ids)
    }

    fn rewrite(
        &mut self,
        structure: &mut [usize],
        point_ids: &mut Vec<usize>,
    ) -> Result<(), DataIntegrityError> {
        let mut pos = 0;
        while pos < structure.len() {
            let n = structure[pos];
            let record = structure
                .get_mut(pos + 1..pos + 1 + n)
                .ok_or(DataIntegrityError::MalformedCellStructure { offset: pos })?;
            for vertex in record {
                let num_points = self.lookup.len();
                let slot = self.lookup.get_mut(*vertex).ok_or(
                    DataIntegrityError::PointOutOfRange {
                        id: *vertex as i64 + 1,
                        num_points,
                    },
                )?;
                if *slot == UNSEEN {
                    *slot = point_ids.len();
                    point_ids.push(*vertex);
                }
                *vertex = *slot;
            }
            pos += n + 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;

    #[test]
    fn first_encounter_order() {
        let mut t = CellTopology::new();
        t.push_cell(CellType::Quadrilateral, &[7, 3, 9, 3]);
        t.push_cell(CellType::Segment, &[9, 1]);
        let mut r = PointRenumberer::new(10);
        let ids = r.renumber(&mut t).unwrap();
        assert_eq!(ids, vec![7, 3, 9, 1]);
        assert_eq!(t.cell(0), Some(&[0, 1, 2, 1][..]));
        assert_eq!(t.cell(1), Some(&[2, 3][..]));
    }

    #[test]
    fn arena_is_reset_between_parts() {
        let mut r = PointRenumberer::new(4);
        let mut a = CellTopology::new();
        a.push_cell(CellType::Segment, &[2, 3]);
        let mut b = CellTopology::new();
        b.push_cell(CellType::Segment, &[3, 0]);
        assert_eq!(r.renumber(&mut a).unwrap(), vec![2, 3]);
        assert_eq!(r.renumber(&mut b).unwrap(), vec![3, 0]);
        assert_eq!(b.cell(0), Some(&[0, 1][..]));
    }

    #[test]
    fn dangling_point_is_rejected_and_arena_cleared() {
        let mut r = PointRenumberer::new(3);
        let mut t = CellTopology::new();
        t.push_cell(CellType::Segment, &[0, 5]);
        let err = r.renumber(&mut t).unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::PointOutOfRange {
                id: 6,
                num_points: 3
            }
        );
        let mut ok = CellTopology::new();
        ok.push_cell(CellType::Segment, &[1, 0]);
        assert_eq!(r.renumber(&mut ok).unwrap(), vec![1, 0]);
    }
}
