//! Overlay presentation
//!
//! `frame` is the render snapshot shared with the paint handler, `renderer`
//! turns it into pixels and `overlay` hosts the Win32 window.

pub mod frame;
#[cfg(windows)]
pub mod overlay;
pub mod renderer;

pub use frame::{OverlayFrame, SharedFrame};
pub use renderer::{OverlayRenderer, RendererError};
