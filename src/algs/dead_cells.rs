//! Split a per-category death-flag array into per-part dead-cell lists.

use crate::mesh_error::DataIntegrityError;
use crate::parts::cell_map::{CellIndexToPart, CellRef};
use crate::parts::part::Part;

/// Route every non-zero flag in `death_flags` to the owning part.
///
/// `death_flags` covers this instance's read window only: position `i` is
/// global cell `window.start + i`. Flags for cells dropped on insert (inactive
/// parts) are ignored. Returns the number of cells marked dead.
///
/// Local indices within one part grow with the global index, so walking the
/// flags in order yields strictly increasing dead lists; a part that already
/// holds a later dead cell (e.g. flags delivered twice) is rejected. Every
/// flagged cell is checked before any dead list is touched.
pub fn distribute_dead_flags(
    map: &CellIndexToPart,
    parts: &mut [Option<Part>],
    death_flags: &[i32],
) -> Result<usize, DataIntegrityError> {
    if map.is_empty() {
        return Ok(0);
    }
    if death_flags.len() > map.len() {
        return Err(DataIntegrityError::DeathFlagsTooLong {
            category: map.category(),
            expected: map.len(),
            found: death_flags.len(),
        });
    }

    let flagged: Vec<CellRef> = death_flags
        .iter()
        .enumerate()
        .filter(|&(_, &flag)| flag != 0)
        .filter_map(|(offset, _)| map.get(offset))
        .filter(|cell| matches!(parts.get(cell.part), Some(Some(_))))
        .collect();

    let mut last: Vec<Option<usize>> = parts
        .iter()
        .map(|p| p.as_ref().and_then(|p| p.dead_cells().last().copied()))
        .collect();
    for cell in &flagged {
        if let Some(part) = parts[cell.part].as_ref() {
            part.check_dead_order(last[cell.part], cell.cell)?;
            last[cell.part] = Some(cell.cell);
        }
    }

    for cell in &flagged {
        if let Some(part) = parts[cell.part].as_mut() {
            part.mark_dead(cell.cell)?;
        }
    }
    Ok(flagged.len())
}
