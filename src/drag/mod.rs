//! Free-floating stickers that can be dragged with mouse or touch.
//!
//! Each sticker has its own [`DragController`]. The [`DragBoard`] broadcasts
//! move and release events to every controller, and each one decides for
//! itself whether the event concerns it.

use egui::emath::Rot2;
use egui::{CursorIcon, Pos2, Rect, Vec2};

mod board;
mod controller;
mod sticker;

pub use board::DragBoard;
pub use controller::{DragController, DragState};
pub use sticker::Sticker;

/// Visual transform of a sticker relative to where it was placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset from the original position
    pub translation: Vec2,
    /// Scale factor around the sticker center (1.0 = original size)
    pub scale: f32,
    /// Clockwise rotation around the sticker center, in radians
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Where `rect` ends up before rotation: scaled around its center, then translated
    pub fn apply_to_rect(&self, rect: Rect) -> Rect {
        Rect::from_center_size(rect.center() + self.translation, rect.size() * self.scale)
    }

    /// Corners of the fully transformed `rect`, clockwise from the top left
    pub fn corners(&self, rect: Rect) -> [Pos2; 4] {
        let placed = self.apply_to_rect(rect);
        let center = placed.center();
        let rot = Rot2::from_angle(self.rotation);
        [
            placed.left_top(),
            placed.right_top(),
            placed.right_bottom(),
            placed.left_bottom(),
        ]
        .map(|corner| center + rot * (corner - center))
    }

    /// Hit test against the fully transformed `rect`
    pub fn contains(&self, rect: Rect, pos: Pos2) -> bool {
        let placed = self.apply_to_rect(rect);
        let center = placed.center();
        let local = Rot2::from_angle(-self.rotation) * (pos - center);
        placed.contains(center + local)
    }
}

/// Anything whose on-screen offset can be driven by a drag
pub trait Transformable {
    /// The last committed translation, regardless of scale or other components
    fn translation(&self) -> Vec2;

    fn set_translation(&mut self, translation: Vec2);

    /// Cursor hint shown while the pointer is over the element
    fn set_cursor(&mut self, cursor: CursorIcon);
}
