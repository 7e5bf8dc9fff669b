// src/renderer.rs
use eframe::egui::emath::Rot2;
use eframe::egui::epaint::TextShape;
use eframe::egui::{self, Color32, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions};

use crate::drag::Sticker;
use crate::overlay::Overlay;

const STICKER_FILL: Color32 = Color32::from_rgb(0xff, 0xea, 0xa7);
const STICKER_GRABBED_FILL: Color32 = Color32::from_rgb(0xff, 0xdd, 0x7a);
const STICKER_OUTLINE: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const STICKER_ROUNDING: f32 = 8.0;

/// Paints the overlay layers: ink, then stickers, then the trail on top.
pub struct Renderer {
    ctx: egui::Context,
    ink_texture: Option<TextureHandle>,
    /// Ink surface version the texture was last uploaded from
    uploaded_version: Option<u64>,
}

impl Renderer {
    /// Creates a new renderer bound to the app's egui context
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_context(cc.egui_ctx.clone())
    }

    pub fn with_context(ctx: egui::Context) -> Self {
        Self {
            ctx,
            ink_texture: None,
            uploaded_version: None,
        }
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): Background-layer painter covering the viewport
    ///     overlay (Overlay): The state to draw
    pub fn render(&mut self, painter: &egui::Painter, overlay: &mut Overlay) {
        let rect = painter.clip_rect();
        painter.rect_filled(rect, 0.0, self.ctx.style().visuals.panel_fill);

        self.paint_ink(painter, overlay);
        self.paint_stickers(painter, overlay);
        overlay.trail_surface().paint(painter);
    }

    fn paint_ink(&mut self, painter: &egui::Painter, overlay: &Overlay) {
        let surface = overlay.ink().surface();
        let [w, h] = surface.image().size;
        if w == 0 || h == 0 {
            return;
        }

        if self.uploaded_version != Some(surface.version()) {
            let image = surface.image().clone();
            match &mut self.ink_texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.ink_texture =
                        Some(self.ctx.load_texture("ink_layer", image, TextureOptions::LINEAR));
                }
            }
            self.uploaded_version = Some(surface.version());
        }

        if let Some(texture) = &self.ink_texture {
            let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(w as f32, h as f32));
            let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    fn paint_stickers(&mut self, painter: &egui::Painter, overlay: &mut Overlay) {
        let hover = self.ctx.pointer_hover_pos();

        for sticker in overlay.board().stickers() {
            let grabbed = overlay.board().is_dragging(sticker.id());
            paint_sticker(painter, sticker, grabbed);
        }

        let hovered_rect = hover.and_then(|pos| overlay.board().hit_test(pos)).map(Sticker::rect);
        if let Some(rect) = hovered_rect {
            overlay.effects_mut().tilt.hover(rect, hover);
        }

        let cursor_source = overlay
            .board()
            .stickers()
            .find(|s| overlay.board().is_dragging(s.id()))
            .or_else(|| hover.and_then(|pos| overlay.board().hit_test(pos)));
        if let Some(sticker) = cursor_source {
            self.ctx.set_cursor_icon(sticker.cursor());
        }
    }
}

fn paint_sticker(painter: &egui::Painter, sticker: &Sticker, grabbed: bool) {
    let transform = sticker.transform();
    let fill = if grabbed { STICKER_GRABBED_FILL } else { STICKER_FILL };
    let outline = Stroke::new(2.0, STICKER_OUTLINE);

    if transform.rotation == 0.0 {
        painter.rect(sticker.rect(), STICKER_ROUNDING, fill, outline);
    } else {
        painter.add(Shape::convex_polygon(sticker.corners().to_vec(), fill, outline));
    }

    let galley = painter.layout_no_wrap(
        sticker.label().to_owned(),
        egui::FontId::proportional(18.0 * transform.scale),
        STICKER_OUTLINE,
    );
    // Text rotates around its top left corner; offset it so the label stays centered
    let half = galley.size() / 2.0;
    let top_left = sticker.rect().center() - Rot2::from_angle(transform.rotation) * half;
    painter.add(TextShape::new(top_left, galley, STICKER_OUTLINE).with_angle(transform.rotation));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::input::{InputEvent, PointerSource};

    fn painter(ctx: &egui::Context) -> egui::Painter {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(200.0, 200.0));
        egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect)
    }

    #[test]
    fn test_render_uploads_ink_once_per_change() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::with_context(ctx.clone());
        let mut overlay = Overlay::from_config(OverlayConfig::default()).unwrap();
        overlay.on_viewport(egui::vec2(200.0, 200.0));

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = painter(ctx);
            renderer.render(&painter, &mut overlay);
            let first = renderer.uploaded_version;
            assert!(first.is_some());

            renderer.render(&painter, &mut overlay);
            assert_eq!(renderer.uploaded_version, first);

            overlay.handle_event(&InputEvent::PointerDown(PointerSource::Mouse(egui::pos2(5.0, 5.0))));
            renderer.render(&painter, &mut overlay);
            assert_ne!(renderer.uploaded_version, first);
        });
    }

    #[test]
    fn test_render_skips_unsized_ink() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::with_context(ctx.clone());
        let mut overlay = Overlay::from_config(OverlayConfig::default()).unwrap();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            renderer.render(&painter(ctx), &mut overlay);
        });
        assert!(renderer.ink_texture.is_none());
    }

    #[test]
    fn test_render_rotated_stickers() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::with_context(ctx.clone());
        let mut config = OverlayConfig::default();
        config.stickers = vec![
            crate::config::StickerConfig::new("flat", egui::pos2(10.0, 10.0)),
            crate::config::StickerConfig::new("tilted", egui::pos2(60.0, 100.0)).with_rotation(15.0),
        ];
        let mut overlay = Overlay::from_config(config).unwrap();
        overlay.on_viewport(egui::vec2(200.0, 200.0));

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            renderer.render(&painter(ctx), &mut overlay);
        });
        let tilted = overlay.board().stickers().nth(1).unwrap();
        assert!(tilted.transform().rotation > 0.0);
    }
}
