use std::ops::Range;

use egui::{Color32, ColorImage, Pos2, Rect};

use super::{LineStyle, Surface};

/// Persistent pixel buffer with source-over blending.
///
/// Every mutation bumps [`RasterSurface::version`] so the texture uploaded from
/// it can be refreshed only when something changed.
pub struct RasterSurface {
    image: ColorImage,
    version: u64,
}

impl RasterSurface {
    pub fn new(size: [usize; 2]) -> Self {
        Self {
            image: ColorImage::new(size, Color32::TRANSPARENT),
            version: 0,
        }
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Color at pixel `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        let [w, h] = self.image.size;
        if x >= w || y >= h {
            return None;
        }
        Some(self.image.pixels[y * w + x])
    }

    /// Pixel index ranges whose centers may fall inside `rect`, clamped to the buffer
    fn pixel_span(&self, rect: Rect) -> (Range<usize>, Range<usize>) {
        let [w, h] = self.image.size;
        let clamp = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        let xs = clamp(rect.min.x.floor(), w)..clamp(rect.max.x.ceil() + 1.0, w);
        let ys = clamp(rect.min.y.floor(), h)..clamp(rect.max.y.ceil() + 1.0, h);
        (xs, ys)
    }

    fn paint_where(&mut self, rect: Rect, color: Color32, inside: impl Fn(Pos2) -> bool) {
        let (xs, ys) = self.pixel_span(rect);
        let w = self.image.size[0];
        let mut touched = false;
        for y in ys {
            for x in xs.clone() {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(center) {
                    let idx = y * w + x;
                    self.image.pixels[idx] = blend(self.image.pixels[idx], color);
                    touched = true;
                }
            }
        }
        if touched {
            self.version += 1;
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> [usize; 2] {
        self.image.size
    }

    fn resize(&mut self, size: [usize; 2]) {
        self.image = ColorImage::new(size, Color32::TRANSPARENT);
        self.version += 1;
    }

    fn clear_rect(&mut self, rect: Rect) {
        let (xs, ys) = self.pixel_span(rect);
        let w = self.image.size[0];
        for y in ys {
            for x in xs.clone() {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if rect.contains(center) {
                    self.image.pixels[y * w + x] = Color32::TRANSPARENT;
                }
            }
        }
        self.version += 1;
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        let rect = Rect::from_center_size(center, egui::Vec2::splat(radius * 2.0));
        self.paint_where(rect, color, |p| p.distance_sq(center) <= radius * radius);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let half = style.width / 2.0;
        if half <= 0.0 {
            return;
        }
        let cap = style.cap;
        self.paint_where(style.bounds(from, to), style.color, |p| {
            cap.covers(p, from, to, half)
        });
    }

    fn is_blank(&self) -> bool {
        self.image.pixels.iter().all(|p| *p == Color32::TRANSPARENT)
    }
}

/// Source-over blend of premultiplied colors
fn blend(dst: Color32, src: Color32) -> Color32 {
    let inv = 255 - src.a() as u32;
    let mix = |s: u8, d: u8| (s as u32 + (d as u32 * inv + 127) / 255).min(255) as u8;
    Color32::from_rgba_premultiplied(
        mix(src.r(), dst.r()),
        mix(src.g(), dst.g()),
        mix(src.b(), dst.b()),
        mix(src.a(), dst.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LineCap;
    use egui::pos2;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = RasterSurface::new([20, 10]);
        assert!(surface.is_blank());
        assert_eq!(surface.size(), [20, 10]);
        assert_eq!(surface.pixel(20, 0), None);
    }

    #[test]
    fn test_fill_circle_paints_center_only() {
        let mut surface = RasterSurface::new([20, 20]);
        surface.fill_circle(pos2(10.0, 10.0), 3.0, Color32::RED);
        assert_eq!(surface.pixel(10, 10), Some(Color32::RED));
        assert_eq!(surface.pixel(0, 0), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_non_positive_radius_draws_nothing() {
        let mut surface = RasterSurface::new([20, 20]);
        surface.fill_circle(pos2(10.0, 10.0), 0.0, Color32::RED);
        surface.fill_circle(pos2(10.0, 10.0), -2.0, Color32::RED);
        assert!(surface.is_blank());
        assert_eq!(surface.version(), 0);
    }

    #[test]
    fn test_drawing_off_surface_is_clipped() {
        let mut surface = RasterSurface::new([10, 10]);
        let style = LineStyle::new(Color32::BLACK, 3.0, LineCap::Round);
        surface.stroke_line(pos2(-50.0, -50.0), pos2(-20.0, -20.0), &style);
        surface.fill_circle(pos2(100.0, 100.0), 5.0, Color32::BLACK);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_resize_clears_content() {
        let mut surface = RasterSurface::new([20, 20]);
        surface.fill_circle(pos2(5.0, 5.0), 3.0, Color32::RED);
        assert!(!surface.is_blank());
        surface.resize([20, 20]);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_half_transparent_blend() {
        let half_gray = Color32::from_rgba_unmultiplied(150, 150, 150, 128);
        let mixed = blend(Color32::TRANSPARENT, half_gray);
        assert_eq!(mixed, half_gray);

        let over_white = blend(Color32::WHITE, half_gray);
        assert_eq!(over_white.a(), 255);
        assert!(over_white.r() > 150 && over_white.r() < 255);
    }
}
