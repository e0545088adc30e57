//! Windowed wireframe preview of the rig

pub mod canvas;
pub mod input;
pub mod preview;
pub mod surface;

pub use canvas::{Canvas, Color, DrawOp};
pub use input::ScrollCommand;
pub use preview::Preview;
pub use surface::SurfaceRenderer;
