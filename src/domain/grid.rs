//! Grid geometry and cell calculations
//!
//! This module maps a monitor's work area and a tile count into an N×N grid
//! of tiles. It provides tile sizes, inset cell rectangles for the overlay and
//! the overlap test used for highlighting.

use crate::domain::core::Rect;

/// Outer inset applied to the left/top edge of every rendered cell
pub const CELL_INSET: i32 = 2;
/// Amount trimmed from the right/bottom edge of every rendered cell
pub const CELL_TRIM: i32 = 4;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Tile count is outside [2, 9]
    #[error("tile count {0} is outside {}..={}", TileCount::MIN, TileCount::MAX)]
    InvalidTileCount(u32),
    /// Work area cannot hold one pixel per tile
    #[error("work area {width}x{height} is too small for a {tiles}x{tiles} grid")]
    WorkAreaTooSmall { width: i32, height: i32, tiles: u32 },
    /// Cell coordinates are outside the grid
    #[error("cell ({x}, {y}) is outside a {tiles}x{tiles} grid")]
    InvalidCell { x: u32, y: u32, tiles: u32 },
}

/// Number of tiles per row and per column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCount(u8);

impl TileCount {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 9;

    /// Creates a tile count, rejecting values outside [2, 9]
    ///
    /// # Example
    /// ```rust
    /// use tile_screen::domain::grid::TileCount;
    ///
    /// assert_eq!(TileCount::new(3).unwrap().get(), 3);
    /// assert!(TileCount::new(1).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self, GridError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(GridError::InvalidTileCount(value))
        }
    }

    /// Creates a tile count, clamping into [2, 9]
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN as u8, Self::MAX as u8))
    }

    /// Returns the count as an integer
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// Returns the count as the single byte stored in the settings file
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for TileCount {
    fn default() -> Self {
        Self(Self::MIN as u8)
    }
}

impl std::fmt::Display for TileCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An N×N tiling of one work area
///
/// Tile sizes use truncating division; the leftover pixels are only
/// distributed when snapping a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Work area in screen coordinates
    work_area: Rect,
    /// Tiles per row and per column
    count: TileCount,
    /// Width of each tile in pixels
    tile_width: i32,
    /// Height of each tile in pixels
    tile_height: i32,
}

impl TileGrid {
    /// Creates a grid over `work_area`
    ///
    /// # Example
    /// ```rust
    /// use tile_screen::domain::{core::Rect, grid::{TileCount, TileGrid}};
    ///
    /// let grid = TileGrid::new(Rect::new(0, 0, 1920, 1080), TileCount::new(2).unwrap()).unwrap();
    /// assert_eq!(grid.tile_size(), (960, 540));
    /// ```
    pub fn new(work_area: Rect, count: TileCount) -> Result<Self, GridError> {
        let tiles = count.get() as i32;
        let width = work_area.width();
        let height = work_area.height();
        if width < tiles || height < tiles {
            return Err(GridError::WorkAreaTooSmall {
                width,
                height,
                tiles: count.get(),
            });
        }

        Ok(Self {
            work_area,
            count,
            tile_width: width / tiles,
            tile_height: height / tiles,
        })
    }

    /// Returns the work area this grid covers
    pub fn work_area(&self) -> Rect {
        self.work_area
    }

    /// Returns the tile count
    pub fn count(&self) -> TileCount {
        self.count
    }

    /// Returns `(tile_width, tile_height)`
    pub fn tile_size(&self) -> (i32, i32) {
        (self.tile_width, self.tile_height)
    }

    /// Returns the overlay rectangle for cell `(x, y)`
    ///
    /// Coordinates are relative to the work area origin. The cell is inset by
    /// [`CELL_INSET`] on the left/top and trimmed by [`CELL_TRIM`] on the
    /// right/bottom so neighbouring cells stay visually separate.
    pub fn cell_rect(&self, x: u32, y: u32) -> Result<Rect, GridError> {
        let tiles = self.count.get();
        if x >= tiles || y >= tiles {
            return Err(GridError::InvalidCell { x, y, tiles });
        }

        let (x, y) = (x as i32, y as i32);
        Ok(Rect::new(
            x * self.tile_width + CELL_INSET,
            y * self.tile_height + CELL_INSET,
            (x + 1) * self.tile_width - CELL_TRIM,
            (y + 1) * self.tile_height - CELL_TRIM,
        ))
    }

    /// Iterates over every cell as `((x, y), rect)`, row by row
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), Rect)> + '_ {
        let tiles = self.count.get();
        (0..tiles).flat_map(move |y| {
            (0..tiles).filter_map(move |x| self.cell_rect(x, y).ok().map(|rect| ((x, y), rect)))
        })
    }
}

/// Overlap test used for overlay highlighting
///
/// Half-open on the cell side: the selection's right/bottom edge may touch
/// the cell's left/top edge, but its left/top edge must be strictly before
/// the cell's right/bottom edge.
pub fn overlaps(cell: &Rect, selection: &Rect) -> bool {
    selection.right >= cell.left
        && selection.left < cell.right
        && selection.bottom >= cell.top
        && selection.top < cell.bottom
}
