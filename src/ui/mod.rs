//! UI module for the egui-based user interface.

pub mod screens;
pub mod theme;

pub use screens::Screen;
