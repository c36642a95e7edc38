//! Screen tiling: drag a selection over a grid overlay, then activate the
//! window that should snap to it.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
pub mod ui;
