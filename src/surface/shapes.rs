use egui::{Color32, Pos2, Rect, Shape, Stroke};

use super::{LineCap, LineStyle, Surface};

/// Surface that records egui shapes instead of pixels.
///
/// Used for layers that are redrawn from scratch every frame; the recorded
/// shapes are handed to an [`egui::Painter`] by the renderer.
#[derive(Debug, Default)]
pub struct ShapeSurface {
    size: [usize; 2],
    shapes: Vec<Shape>,
}

impl ShapeSurface {
    pub fn new(size: [usize; 2]) -> Self {
        Self {
            size,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn paint(&self, painter: &egui::Painter) {
        painter.extend(self.shapes.iter().cloned());
    }
}

impl Surface for ShapeSurface {
    fn size(&self) -> [usize; 2] {
        self.size
    }

    fn resize(&mut self, size: [usize; 2]) {
        self.size = size;
        self.shapes.clear();
    }

    /// Drops every shape that reaches into `rect`. Shapes can't be partially erased.
    fn clear_rect(&mut self, rect: Rect) {
        self.shapes
            .retain(|shape| !shape.visual_bounding_rect().intersects(rect));
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        self.shapes.push(Shape::circle_filled(center, radius, color));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let half = style.width / 2.0;
        if half <= 0.0 {
            return;
        }

        if from == to {
            // A zero-length segment is only visible through its caps
            match style.cap {
                LineCap::Butt => {}
                LineCap::Round => self.shapes.push(Shape::circle_filled(from, half, style.color)),
                LineCap::Square => self.shapes.push(Shape::rect_filled(
                    Rect::from_center_size(from, egui::Vec2::splat(style.width)),
                    0.0,
                    style.color,
                )),
            }
            return;
        }

        self.shapes.push(Shape::line_segment(
            [from, to],
            Stroke::new(style.width, style.color),
        ));
        if style.cap == LineCap::Round {
            self.shapes.push(Shape::circle_filled(from, half, style.color));
            self.shapes.push(Shape::circle_filled(to, half, style.color));
        }
    }

    fn is_blank(&self) -> bool {
        self.shapes.is_empty()
    }
}
