use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::scroll::ScrollProgress;

/// Pixels scrolled per wheel notch or arrow key press
pub const LINE_HEIGHT: f32 = 40.0;

/// Scroll request decoded from a window event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    /// Relative move in pixels, positive = forward
    By(f32),
    /// Relative move in viewports
    Pages(f32),
    /// Absolute normalized position
    ToOffset(f32),
}

impl ScrollCommand {
    pub fn apply(self, scroll: &mut ScrollProgress) {
        match self {
            Self::By(pixels) => scroll.scroll_by(pixels),
            Self::Pages(pages) => scroll.scroll_pages(pages),
            Self::ToOffset(offset) => scroll.scroll_to_offset(offset),
        }
    }

    /// Wheel rotation toward the user scrolls forward
    pub fn from_wheel(delta: MouseScrollDelta) -> Option<Self> {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        };
        (pixels != 0.0).then_some(Self::By(pixels))
    }

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::By(LINE_HEIGHT)),
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::By(-LINE_HEIGHT)),
            KeyCode::PageDown | KeyCode::Space => Some(Self::Pages(1.0)),
            KeyCode::PageUp => Some(Self::Pages(-1.0)),
            KeyCode::Home => Some(Self::ToOffset(0.0)),
            KeyCode::End => Some(Self::ToOffset(1.0)),
            _ => None,
        }
    }

    /// Decode a window event; key releases are ignored
    pub fn from_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::MouseWheel { delta, .. } => Self::from_wheel(*delta),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(key) => Self::from_key(key),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            _ => None,
        }
    }
}
