//! Pointer message decoding

use crate::domain::core::Point;

/// Decodes the client position packed into a mouse message's LPARAM
///
/// Both words are signed: with mouse capture the pointer can leave the
/// client area to the left or above it.
pub fn point_from_lparam(lparam: isize) -> Point {
    let x = (lparam & 0xffff) as u16 as i16;
    let y = ((lparam >> 16) & 0xffff) as u16 as i16;
    Point::new(i32::from(x), i32::from(y))
}
