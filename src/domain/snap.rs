//! Selection-to-geometry snapping
//!
//! Converts a frozen selection rectangle into the tile-aligned geometry to
//! apply to the target window. The last column and row absorb the pixels
//! left over by the truncating tile division, so a selection touching the
//! far edge reaches it exactly.

use crate::domain::core::{Geometry, Rect};
use crate::domain::grid::TileGrid;

/// Snaps `selection` to the tiles of `grid`
///
/// `selection` is in work-area-relative coordinates. The result is in
/// absolute screen coordinates, offset by `grid`'s own work area.
///
/// # Example
/// ```rust
/// use tile_screen::domain::{core::{Geometry, Rect}, grid::{TileCount, TileGrid}, snap::snap_selection};
///
/// let grid = TileGrid::new(Rect::new(0, 0, 1921, 1080), TileCount::new(2).unwrap()).unwrap();
/// let geometry = snap_selection(&grid, Rect::new(1000, 10, 1200, 20));
/// assert_eq!(geometry, Geometry::new(960, 0, 961, 540));
/// ```
pub fn snap_selection(grid: &TileGrid, selection: Rect) -> Geometry {
    let work_area = grid.work_area();
    let tiles = grid.count().get() as i32;
    let (tile_width, tile_height) = grid.tile_size();

    let (x0, x1) = snap_axis(selection.left, selection.right, tile_width, tiles, work_area.width());
    let (y0, y1) = snap_axis(selection.top, selection.bottom, tile_height, tiles, work_area.height());

    Geometry::new(work_area.left + x0, work_area.top + y0, x1 - x0, y1 - y0)
}

/// Snaps one axis: returns `(start, end)` relative to the work area
fn snap_axis(low: i32, high: i32, tile: i32, tiles: i32, extent: i32) -> (i32, i32) {
    let first = tile_index(low, tile, tiles);
    let last = tile_index(high, tile, tiles);

    let start = first * tile;
    let mut end = (last * tile + tile).min(extent);
    if last == tiles - 1 {
        end += extent % tile;
    }

    (start, end)
}

/// Index of the tile containing `coord`, clamped into the grid
///
/// Coordinates in the remainder strip past the last full tile, or outside
/// the work area entirely, belong to the nearest edge tile.
fn tile_index(coord: i32, tile: i32, tiles: i32) -> i32 {
    (coord.max(0) / tile).min(tiles - 1)
}
