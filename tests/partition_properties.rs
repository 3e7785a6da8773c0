mod util;
use util::*;

use std::collections::BTreeSet;

use part_sieve::prelude::*;
use proptest::prelude::*;

const MATERIALS: usize = 3;

/// Per-slot global cell ids of a finalized collection; pruned slots are empty.
fn cell_sets(c: &PartCollection) -> Vec<BTreeSet<usize>> {
    (0..c.number_of_parts())
        .map(|slot| {
            c.grid_for_part(slot)
                .unwrap()
                .map(grid_global_ids)
                .unwrap_or_default()
        })
        .collect()
}

fn finalized_strip(materials: &[usize], window: std::ops::Range<usize>) -> PartCollection {
    let mut c = strip_collection(materials, MATERIALS, window.clone());
    tag_global_ids(&mut c, window);
    c.finalize(&pool(materials.len() + 1), false).unwrap();
    c
}

fn materials() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..=MATERIALS, 1..40)
}

#[test]
fn split_strip_by_hand() {
    let materials = [1, 2, 1, 1, 3, 2];
    let left = finalized_strip(&materials, 0..3);
    let right = finalized_strip(&materials, 3..6);
    assert_eq!(
        cell_sets(&left),
        vec![BTreeSet::from([0, 2]), BTreeSet::from([1]), BTreeSet::new()]
    );
    assert_eq!(
        cell_sets(&right),
        vec![BTreeSet::from([3]), BTreeSet::from([5]), BTreeSet::from([4])]
    );
    // part 3 has no cells in [0, 3) and is pruned there
    assert!(!left.is_active_part(2));
    assert!(right.is_active_part(2));
}

proptest! {
    #[test]
    fn prop_partitions_cover_full_read(
        materials in materials(),
        split in 0usize..64,
    ) {
        let n = materials.len();
        let k = split % (n + 1);
        let left = cell_sets(&finalized_strip(&materials, 0..k));
        let right = cell_sets(&finalized_strip(&materials, k..n));
        let full = cell_sets(&finalized_strip(&materials, 0..n));

        for slot in 0..MATERIALS {
            prop_assert!(left[slot].is_disjoint(&right[slot]));
            let union: BTreeSet<usize> = left[slot].union(&right[slot]).copied().collect();
            prop_assert_eq!(&union, &full[slot]);
            let expected: BTreeSet<usize> = (0..n).filter(|&g| materials[g] == slot + 1).collect();
            prop_assert_eq!(&full[slot], &expected);
        }
    }

    #[test]
    fn prop_point_ids_are_a_bijection(materials in materials()) {
        let n = materials.len();
        let pool = pool(n + 1);
        let mut c = strip_collection(&materials, MATERIALS, 0..n);
        let temp: Vec<f32> = (0..=n).map(|g| g as f32 * 10.0).collect();
        c.add_point_array(DataArray::from_vec("temp", 1, temp).unwrap()).unwrap();
        c.finalize(&pool, false).unwrap();

        for slot in 0..MATERIALS {
            let Some(part) = c.part(slot) else {
                prop_assert!(!materials.contains(&(slot + 1)));
                continue;
            };
            let point_ids = part.point_ids();
            let referenced: BTreeSet<usize> = (0..n)
                .filter(|&g| materials[g] == slot + 1)
                .flat_map(|g| [g, g + 1])
                .collect();
            let mapped: BTreeSet<usize> = point_ids.iter().copied().collect();
            prop_assert_eq!(mapped.len(), point_ids.len());
            prop_assert_eq!(&mapped, &referenced);

            let grid = c.grid_for_part(slot).unwrap().unwrap();
            let temp = grid.point_array("temp").unwrap();
            prop_assert_eq!(grid.number_of_points(), point_ids.len());
            for (local, &global) in point_ids.iter().enumerate() {
                prop_assert_eq!(grid.points().point(local), pool.point(global));
                prop_assert_eq!(temp.tuple::<f32>(local), Some(&[global as f32 * 10.0][..]));
            }
            for (_, vertices) in grid.topology().cells() {
                prop_assert!(vertices.iter().all(|&l| l < point_ids.len()));
            }
        }
    }

    #[test]
    fn prop_read_info_accounts_for_every_cell(
        bounds in prop::collection::vec((0usize..50, 0usize..50, 0usize..50), 7),
    ) {
        let mut meta = PartMetadata::new(0, 4);
        let mut windows = Vec::new();
        for (category, &(a, b, c)) in PartType::ALL.iter().zip(&bounds) {
            let mut v = [a, b, c];
            v.sort_unstable();
            meta = meta.with_cells(*category, v[2]);
            windows.push((*category, v[0]..v[1]));
        }
        let mut range = ReadRange::full(&meta);
        for (category, window) in windows {
            range = range.with_window(category, window);
        }
        let c = PartCollection::new(meta.clone(), Some(range.clone())).unwrap();
        for category in PartType::ALL {
            let info = c.part_read_info(category);
            let total = meta.number_of_cells(category);
            prop_assert_eq!(info.skip_before + info.count + info.skip_after, total);
            prop_assert_eq!(info.count, range.window(category).len());
        }
    }
}
