use crate::overlay::Overlay;
use egui;

/// Floating toolbar in the top right corner
pub fn toolbar(overlay: &mut Overlay, ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("overlay_toolbar"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Clear ink").clicked() {
                        log::info!("Ink cleared from toolbar");
                        overlay.clear_ink();
                    }

                    // Only offered when a confetti backend was found at startup
                    if overlay.effects().confetti.is_available() && ui.button("🎉").clicked() {
                        let screen = ctx.screen_rect();
                        let origin = egui::pos2(
                            screen.center().x,
                            screen.top() + screen.height() * 0.8,
                        );
                        overlay.celebrate(origin);
                    }

                    let mut running = overlay.frame_loop().is_running();
                    if ui.checkbox(&mut running, "Trail").changed() {
                        if running {
                            overlay.frame_loop_mut().start();
                        } else {
                            overlay.frame_loop_mut().stop();
                        }
                    }
                });

                ui.separator();

                let trail = overlay.trail();
                ui.horizontal(|ui| {
                    ui.label(format!("Particles: {}", trail.len()));
                    ui.label(format!("Evicted: {}", trail.evicted()));
                });
                ui.label(format!("Frames: {}", overlay.frame_loop().frames()));
            });
        });
}
