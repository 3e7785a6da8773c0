//! Assemble a part's finalized [`UnstructuredGrid`].
//!
//! Cells are either copied wholesale or, when dead cells are excised, walked
//! once with a cursor into the part's sorted dead list so that connectivity
//! and every cell property stay in lockstep. Points are gathered from the
//! global pool through the part's local → global map.

use crate::data::array::DataArray;
use crate::data::points::Points;
use crate::grid::UnstructuredGrid;
use crate::mesh_error::DataIntegrityError;
use crate::parts::part::Part;
use crate::topology::cell_array::CellTopology;

/// Build the grid of `part` from its renumbered topology and this
/// timestep's scratch. Declared cell properties are moved into the grid.
pub fn build_grid(
    part: &mut Part,
    pool: &Points,
    point_arrays: &[DataArray],
    remove_dead_cells: bool,
) -> Result<UnstructuredGrid, DataIntegrityError> {
    let properties: Vec<DataArray> = part
        .scratch_mut()
        .take_properties()
        .into_iter()
        .map(|p| p.into_data())
        .collect();

    let (topology, cell_data) = if remove_dead_cells && !part.dead_cells().is_empty() {
        let (topology, cell_data) =
            construct_cells_without_dead(part.topology(), part.dead_cells(), &properties)?;
        if topology.is_empty() {
            log::warn!(
                "every cell of part `{}` is dead; its grid has no cells",
                part.name()
            );
        }
        (topology, cell_data)
    } else {
        (part.topology().clone(), properties)
    };

    let (points, point_data) = construct_points(part.point_ids(), pool, point_arrays)?;
    log::trace!(
        "built grid for part `{}`: {} cells, {} points",
        part.name(),
        topology.len(),
        points.len()
    );

    Ok(UnstructuredGrid::new(
        part.name().to_owned(),
        part.part_type(),
        topology,
        cell_data,
        points,
        point_data,
    ))
}

/// Copy every surviving cell and its property tuples, skipping `dead`.
///
/// `dead` must be strictly increasing.
pub fn construct_cells_without_dead(
    topology: &CellTopology,
    dead: &[usize],
    properties: &[DataArray],
) -> Result<(CellTopology, Vec<DataArray>), DataIntegrityError> {
    let survivors = topology.len().saturating_sub(dead.len());
    let vertices_per_cell = topology.connectivity_len() / topology.len().max(1);
    let mut out = CellTopology::with_capacity(survivors, vertices_per_cell);
    let mut arrays: Vec<DataArray> = properties.iter().map(|p| p.new_like(survivors)).collect();

    let mut dead_iter = dead.iter().copied().peekable();
    for (index, (cell_type, vertices)) in topology.cells().enumerate() {
        if dead_iter.next_if_eq(&index).is_some() {
            continue;
        }
        let slot = out.push_cell(cell_type, vertices);
        for (new, old) in arrays.iter_mut().zip(properties) {
            new.copy_tuple_from(slot, old, index)?;
        }
    }
    Ok((out, arrays))
}

/// Gather coordinates and point data for the part's local points.
pub fn construct_points(
    point_ids: &[usize],
    pool: &Points,
    point_arrays: &[DataArray],
) -> Result<(Points, Vec<DataArray>), DataIntegrityError> {
    let mut points = Points::zeroed(pool.scalar_type(), point_ids.len());
    let mut arrays: Vec<DataArray> = point_arrays
        .iter()
        .map(|a| a.new_like(point_ids.len()))
        .collect();

    for (local, &global) in point_ids.iter().enumerate() {
        points.copy_point_from(local, pool, global)?;
        for (new, old) in arrays.iter_mut().zip(point_arrays) {
            new.copy_tuple_from(local, old, global)?;
        }
    }
    Ok((points, arrays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;

    fn three_segments() -> CellTopology {
        let mut t = CellTopology::new();
        t.push_cell(CellType::Segment, &[0, 1]);
        t.push_cell(CellType::Segment, &[1, 2]);
        t.push_cell(CellType::Vertex, &[2]);
        t
    }

    #[test]
    fn excision_keeps_properties_in_lockstep() {
        let t = three_segments();
        let prop = DataArray::from_vec("id", 1, vec![100.0f64, 101.0, 102.0]).unwrap();
        let (out, arrays) = construct_cells_without_dead(&t, &[1], &[prop]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.cell(0), Some(&[0, 1][..]));
        assert_eq!(out.cell(1), Some(&[2][..]));
        assert_eq!(out.cell_locations(), &[0, 3]);
        assert_eq!(arrays[0].as_slice::<f64>(), Some(&[100.0, 102.0][..]));
    }

    #[test]
    fn excising_everything_yields_empty_topology() {
        let t = three_segments();
        let (out, arrays) = construct_cells_without_dead(&t, &[0, 1, 2], &[]).unwrap();
        assert!(out.is_empty());
        assert!(arrays.is_empty());
    }

    #[test]
    fn points_follow_local_to_global_map() {
        let pool = Points::from_xyz(&[[0.0f64, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let temp = DataArray::from_vec("temp", 1, vec![5.0f32, 6.0, 7.0]).unwrap();
        let (points, arrays) = construct_points(&[2, 0], &pool, &[temp]).unwrap();
        assert_eq!(points.point(0), Some([2.0, 0.0, 0.0]));
        assert_eq!(points.point(1), Some([0.0, 0.0, 0.0]));
        assert_eq!(arrays[0].as_slice::<f32>(), Some(&[7.0, 5.0][..]));
        assert_eq!(arrays[0].name(), "temp");
    }

    #[test]
    fn short_pool_is_reported() {
        let pool = Points::from_xyz(&[[0.0f64, 0.0, 0.0]]);
        assert!(construct_points(&[3], &pool, &[]).is_err());
    }
}
