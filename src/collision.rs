//! Axis-aligned box tests on square cells.

use crate::{Coords, GridInt};

/// Whether two `size`x`size` boxes anchored at their top-left corners intersect.
pub fn overlaps(a: Coords, b: Coords, size: GridInt) -> bool {
    a.0 < b.0 + size && b.0 < a.0 + size && a.1 < b.1 + size && b.1 < a.1 + size
}

/// Whether a `size`x`size` box sticks out of a `width`x`height` field on any side.
pub fn out_of_bounds(pos: Coords, size: GridInt, width: GridInt, height: GridInt) -> bool {
    pos.0 < 0 || pos.1 < 0 || pos.0 + size > width || pos.1 + size > height
}
