use egui::Pos2;

use crate::surface::{LineStyle, RasterSurface, Surface};

/// Whether a stroke is in progress, and where its path cursor is
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InkState {
    #[default]
    Idle,
    Drawing { last: Pos2 },
}

/// Freehand drawing layer.
///
/// Segments are rasterized onto the surface as they arrive, so the surface
/// content is the drawing; nothing else is kept.
pub struct InkCanvas<S: Surface = RasterSurface> {
    surface: S,
    style: LineStyle,
    state: InkState,
}

impl<S: Surface> InkCanvas<S> {
    pub fn new(surface: S, style: LineStyle) -> Self {
        Self {
            surface,
            style,
            state: InkState::Idle,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> InkState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, InkState::Drawing { .. })
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Begins a new stroke at `pos`, leaving a dot so single clicks show up.
    pub fn start(&mut self, pos: Pos2) {
        self.surface.stroke_line(pos, pos, &self.style);
        self.state = InkState::Drawing { last: pos };
    }

    /// Extends the current stroke to `pos`. Ignored while idle.
    pub fn draw(&mut self, pos: Pos2) {
        if let InkState::Drawing { last } = self.state {
            self.surface.stroke_line(last, pos, &self.style);
            self.state = InkState::Drawing { last: pos };
        }
    }

    pub fn end(&mut self) {
        self.state = InkState::Idle;
    }

    /// Wipes the whole layer. Does not interrupt a stroke in progress.
    pub fn clear(&mut self) {
        log::debug!("Clearing ink layer");
        self.surface.clear();
    }
}
