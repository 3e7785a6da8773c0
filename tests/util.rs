#![allow(dead_code)]
use std::collections::BTreeSet;
use std::ops::Range;

use part_sieve::prelude::*;

/// Name of the cell property that carries each cell's global index.
pub const GLOBAL_ID: &str = "global_id";

/// Beam strip: cell `g` is a segment between 1-based points `g + 1` and `g + 2`.
pub fn strip_connectivity(global: usize) -> [i64; 2] {
    [global as i64 + 1, global as i64 + 2]
}

/// Metadata for a beam strip of `materials.len()` cells, all materials active.
pub fn strip_metadata(materials: &[usize], num_materials: usize) -> PartMetadata {
    let mut meta = PartMetadata::new(materials.len() + 1, 8)
        .with_cells(PartType::Beam, materials.len());
    for m in 1..=num_materials {
        meta = meta.with_part(m, PartType::Beam, format!("beam-{m}"), true);
    }
    meta
}

/// Collection owning `window` of the strip, with cells inserted.
pub fn strip_collection(
    materials: &[usize],
    num_materials: usize,
    window: Range<usize>,
) -> PartCollection {
    let meta = strip_metadata(materials, num_materials);
    let range = ReadRange::full(&meta).with_window(PartType::Beam, window.clone());
    let mut c = PartCollection::new(meta, Some(range)).unwrap();
    for global in window {
        c.insert_cell(
            PartType::Beam,
            global,
            materials[global],
            CellType::Segment,
            &strip_connectivity(global),
        )
        .unwrap();
    }
    c
}

/// Declare and fill the `GLOBAL_ID` property over the collection's window.
pub fn tag_global_ids(c: &mut PartCollection, window: Range<usize>) {
    c.add_property(PartType::Beam, GLOBAL_ID, 0, 1).unwrap();
    let buffer: Vec<f64> = window.clone().map(|g| g as f64).collect();
    c.fill_cell_properties(&buffer, PartType::Beam, window.len(), 1)
        .unwrap();
}

/// Point pool with point `i` at `(i, 2i, 0)`.
pub fn pool(num_points: usize) -> Points {
    let xyz: Vec<[f64; 3]> = (0..num_points)
        .map(|i| [i as f64, 2.0 * i as f64, 0.0])
        .collect();
    Points::from_xyz(&xyz)
}

/// Global ids carried by a grid's `GLOBAL_ID` cell array.
pub fn grid_global_ids(grid: &UnstructuredGrid) -> BTreeSet<usize> {
    grid.cell_array(GLOBAL_ID)
        .and_then(|a| a.as_slice::<f64>())
        .unwrap_or(&[])
        .iter()
        .map(|&v| v as usize)
        .collect()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
