//! Grid rendering system for the overlay window
//!
//! Implements grid visualization using tiny-skia. Layout calculation is kept
//! separate from rendering so the highlighted cells can be tested without
//! touching pixels.

use tiny_skia::{Color, Paint, Pixmap, Rect as SkiaRect, Transform};

use crate::ui::frame::OverlayFrame;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvasDimensions { width: i32, height: i32 },
}

/// Colors used for the overlay
#[derive(Debug, Clone, Copy)]
pub struct OverlayPalette {
    /// Fill behind the cells (visible in the gaps between them)
    pub background: Color,
    /// Cells outside the selection
    pub cell: Color,
    /// Cells overlapping the selection
    pub selected: Color,
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(0, 120, 215, 255),
            cell: Color::from_rgba8(240, 240, 240, 255),
            selected: Color::from_rgba8(32, 32, 32, 255),
        }
    }
}

/// One cell to fill
#[derive(Debug, Clone)]
pub struct CellFill {
    /// Grid coordinates (column, row)
    pub coords: (u32, u32),
    pub rect: SkiaRect,
    pub highlighted: bool,
}

/// Pre-calculated layout for overlay rendering
#[derive(Debug, Clone)]
pub struct OverlayLayout {
    pub cells: Vec<CellFill>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl OverlayLayout {
    /// Create a layout from the session's render snapshot
    ///
    /// A frame without a usable grid (no work area captured yet) yields a
    /// layout with no cells.
    pub fn from_frame(frame: &OverlayFrame) -> Result<Self, RendererError> {
        let width = frame.work_area.width();
        let height = frame.work_area.height();
        if width <= 0 || height <= 0 {
            return Err(RendererError::InvalidCanvasDimensions { width, height });
        }

        let cells = match frame.grid() {
            Ok(grid) => grid
                .cells()
                .filter_map(|(coords, rect)| {
                    let sk_rect = SkiaRect::from_ltrb(
                        rect.left as f32,
                        rect.top as f32,
                        rect.right as f32,
                        rect.bottom as f32,
                    )?;
                    Some(CellFill {
                        coords,
                        rect: sk_rect,
                        highlighted: frame.is_highlighted(&rect),
                    })
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            cells,
            canvas_width: width as u32,
            canvas_height: height as u32,
        })
    }

    /// Coordinates of the highlighted cells
    pub fn highlighted(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.highlighted)
            .map(|cell| cell.coords)
    }
}

/// Overlay renderer using tiny-skia
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    palette: OverlayPalette,
}

impl OverlayRenderer {
    pub fn new(palette: OverlayPalette) -> Self {
        Self { palette }
    }

    /// Render a frame straight to a pixmap
    pub fn render_frame(&self, frame: &OverlayFrame) -> Result<Pixmap, RendererError> {
        self.render_layout(&OverlayLayout::from_frame(frame)?)
    }

    /// Render a layout to a pixmap
    pub fn render_layout(&self, layout: &OverlayLayout) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(layout.canvas_width, layout.canvas_height)
            .ok_or(RendererError::PixmapCreationFailed)?;

        pixmap.fill(self.palette.background);

        let mut paint = Paint::default();
        for cell in &layout.cells {
            let color = if cell.highlighted {
                self.palette.selected
            } else {
                self.palette.cell
            };
            paint.set_color(color);
            pixmap.fill_rect(cell.rect, &paint, Transform::identity(), None);
        }

        Ok(pixmap)
    }
}

/// Convert pixmap data (RGBA) into the BGRA order GDI expects
pub fn pixmap_to_bgra(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect()
}
