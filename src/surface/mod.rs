//! Rendering surfaces the overlay layers draw on.
//!
//! A [`Surface`] is the small drawing API both the particle trail and the ink
//! layer need: resize (which wipes the pixels), clearing, filled circles and
//! stroked segments. Two implementations exist:
//! - [`RasterSurface`] keeps a persistent pixel buffer, used for ink.
//! - [`ShapeSurface`] records egui shapes, used for per-frame layers like the trail.

use egui::{Color32, Pos2, Rect, vec2};

mod raster;
mod shapes;

pub use raster::RasterSurface;
pub use shapes::ShapeSurface;

/// How the ends of a stroked segment are finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Returns true if `p` lies inside a segment of half-width `half` ending in this cap.
    pub fn covers(self, p: Pos2, from: Pos2, to: Pos2, half: f32) -> bool {
        let seg = to - from;
        let len_sq = seg.length_sq();
        if len_sq <= f32::EPSILON {
            return match self {
                LineCap::Butt => false,
                LineCap::Round => p.distance(from) <= half,
                LineCap::Square => (p.x - from.x).abs() <= half && (p.y - from.y).abs() <= half,
            };
        }

        let len = len_sq.sqrt();
        let dir = seg / len;
        let rel = p - from;
        let along = rel.dot(dir);
        let across = (rel.x * dir.y - rel.y * dir.x).abs();

        match self {
            LineCap::Butt => (0.0..=len).contains(&along) && across <= half,
            LineCap::Square => (-half..=len + half).contains(&along) && across <= half,
            LineCap::Round => {
                let nearest = dir * along.clamp(0.0, len);
                (rel - nearest).length() <= half
            }
        }
    }
}

/// Style used to stroke a single segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: LineCap,
}

impl LineStyle {
    pub fn new(color: Color32, width: f32, cap: LineCap) -> Self {
        Self { color, width, cap }
    }

    /// Area a segment with this style can touch
    pub fn bounds(&self, from: Pos2, to: Pos2) -> Rect {
        Rect::from_two_pos(from, to).expand(self.width / 2.0 + 1.0)
    }
}

/// Drawing target for one overlay layer.
///
/// Sizes are in viewport points; a resize always clears the content.
pub trait Surface {
    fn size(&self) -> [usize; 2];

    /// Changes the backing size. Clears all content, even if the size is unchanged.
    fn resize(&mut self, size: [usize; 2]);

    fn clear_rect(&mut self, rect: Rect);

    fn clear(&mut self) {
        let [w, h] = self.size();
        self.clear_rect(Rect::from_min_size(Pos2::ZERO, vec2(w as f32, h as f32)));
    }

    /// Draws a filled circle. A non-positive radius draws nothing.
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle);

    fn is_blank(&self) -> bool;
}
