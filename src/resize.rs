use egui::Vec2;

use crate::surface::Surface;

/// Keeps the trail and ink surfaces sized to the viewport.
///
/// Resizing a surface wipes it, so every viewport size change also erases
/// the trail and any ink drawing. That is expected.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    last_size: Option<[usize; 2]>,
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_size(&self) -> Option<[usize; 2]> {
        self.last_size
    }

    /// Resizes both surfaces to `viewport`, clearing them.
    pub fn apply(&mut self, viewport: Vec2, trail: &mut dyn Surface, ink: &mut dyn Surface) {
        let size = to_pixels(viewport);
        log::debug!("Resizing overlay surfaces to {}x{}", size[0], size[1]);
        trail.resize(size);
        ink.resize(size);
        self.last_size = Some(size);
    }

    /// Applies on the first call and whenever the viewport size changed.
    ///
    /// Returns whether the surfaces were resized.
    pub fn observe(&mut self, viewport: Vec2, trail: &mut dyn Surface, ink: &mut dyn Surface) -> bool {
        if self.last_size == Some(to_pixels(viewport)) {
            return false;
        }
        self.apply(viewport, trail, ink);
        true
    }
}

fn to_pixels(viewport: Vec2) -> [usize; 2] {
    [viewport.x.max(0.0).round() as usize, viewport.y.max(0.0).round() as usize]
}
