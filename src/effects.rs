//! Optional visual effects.
//!
//! Each effect is a capability trait. [`Effects::detect`] picks an
//! implementation once at startup; when a capability is disabled or has no
//! backend, a [`Noop`] stands in so callers never check for presence.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EffectsConfig;
use crate::surface::Surface;

/// Celebration burst of colored particles
pub trait Confetti {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn burst(&mut self, origin: Pos2);

    /// Advances and draws the burst. Returns true while anything is still visible.
    fn paint(&mut self, surface: &mut dyn Surface) -> bool;
}

/// Tilt of an element toward the pointer hovering it
pub trait Tilt {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn hover(&mut self, target: Rect, pointer: Option<Pos2>);
}

/// Hand-drawn style highlight around an element
pub trait Annotation {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn highlight(&mut self, target: Rect);
}

/// Stand-in for any capability that isn't available
#[derive(Debug, Default, Clone, Copy)]
pub struct Noop;

impl Confetti for Noop {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn burst(&mut self, _origin: Pos2) {}

    fn paint(&mut self, _surface: &mut dyn Surface) -> bool {
        false
    }
}

impl Tilt for Noop {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn hover(&mut self, _target: Rect, _pointer: Option<Pos2>) {}
}

impl Annotation for Noop {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn highlight(&mut self, _target: Rect) {}
}

const CONFETTI_PALETTE: [Color32; 5] = [
    Color32::from_rgb(0xff, 0x76, 0x75),
    Color32::from_rgb(0x00, 0xb8, 0x94),
    Color32::from_rgb(0xff, 0xea, 0xa7),
    Color32::from_rgb(0x74, 0xb9, 0xff),
    Color32::from_rgb(0xa2, 0x9b, 0xfe),
];
const CONFETTI_GRAVITY: f32 = 0.15;
const CONFETTI_FADE: f32 = 0.015;

#[derive(Debug, Clone)]
struct ConfettiPiece {
    pos: Pos2,
    velocity: Vec2,
    size: f32,
    color: Color32,
    life: f32,
}

/// Built-in confetti: pieces fly up and out, fall, and fade.
pub struct ConfettiBurst {
    pieces: Vec<ConfettiPiece>,
    per_burst: usize,
    rng: StdRng,
}

impl ConfettiBurst {
    pub fn new(per_burst: usize) -> Self {
        Self::with_rng(per_burst, StdRng::from_entropy())
    }

    pub fn with_seed(per_burst: usize, seed: u64) -> Self {
        Self::with_rng(per_burst, StdRng::seed_from_u64(seed))
    }

    fn with_rng(per_burst: usize, rng: StdRng) -> Self {
        Self {
            pieces: Vec::new(),
            per_burst,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Confetti for ConfettiBurst {
    fn name(&self) -> &'static str {
        "confetti"
    }

    fn burst(&mut self, origin: Pos2) {
        for _ in 0..self.per_burst {
            let angle = self.rng.gen_range(-std::f32::consts::PI..0.0);
            let speed: f32 = self.rng.gen_range(2.0..9.0);
            let color = CONFETTI_PALETTE[self.rng.gen_range(0..CONFETTI_PALETTE.len())];
            self.pieces.push(ConfettiPiece {
                pos: origin,
                velocity: Vec2::angled(angle) * speed,
                size: self.rng.gen_range(2.0..5.0),
                color,
                life: 1.0,
            });
        }
    }

    fn paint(&mut self, surface: &mut dyn Surface) -> bool {
        for piece in &mut self.pieces {
            piece.pos += piece.velocity;
            piece.velocity.y += CONFETTI_GRAVITY;
            piece.life -= CONFETTI_FADE;
            if piece.life > 0.0 {
                surface.fill_circle(piece.pos, piece.size, piece.color.gamma_multiply(piece.life));
            }
        }
        self.pieces.retain(|p| p.life > 0.0);
        !self.pieces.is_empty()
    }
}

/// The effect implementations chosen at startup
pub struct Effects {
    pub confetti: Box<dyn Confetti>,
    pub tilt: Box<dyn Tilt>,
    pub annotation: Box<dyn Annotation>,
}

impl Default for Effects {
    fn default() -> Self {
        Self::none()
    }
}

impl Effects {
    /// Every capability disabled
    pub fn none() -> Self {
        Self {
            confetti: Box::new(Noop),
            tilt: Box::new(Noop),
            annotation: Box::new(Noop),
        }
    }

    pub fn detect(config: &EffectsConfig) -> Self {
        let mut effects = Self::none();

        if config.is_enabled("confetti") {
            effects.confetti = Box::new(ConfettiBurst::new(config.confetti_particles));
        }
        // No backend ships for these; they stay no-ops even when requested.
        for name in ["tilt", "annotation"] {
            if config.is_enabled(name) {
                log::debug!("Effect '{name}' requested but unavailable, using no-op");
            }
        }
        for name in &config.enabled {
            if !["confetti", "tilt", "annotation"].contains(&name.to_ascii_lowercase().as_str()) {
                log::debug!("Unknown effect '{name}' ignored");
            }
        }

        log::info!("Available effects: {:?}", effects.available());
        effects
    }

    pub fn available(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.confetti.is_available() {
            names.push(self.confetti.name());
        }
        if self.tilt.is_available() {
            names.push(self.tilt.name());
        }
        if self.annotation.is_available() {
            names.push(self.annotation.name());
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ShapeSurface;
    use egui::pos2;

    #[test]
    fn test_disabled_capabilities_are_noops() {
        let config = EffectsConfig {
            enabled: Vec::new(),
            ..EffectsConfig::default()
        };
        let mut effects = Effects::detect(&config);
        assert!(effects.available().is_empty());

        let mut surface = ShapeSurface::new([100, 100]);
        effects.confetti.burst(pos2(50.0, 50.0));
        assert!(!effects.confetti.paint(&mut surface));
        assert!(surface.is_blank());
    }

    #[test]
    fn test_unavailable_capabilities_fall_back() {
        let config = EffectsConfig {
            enabled: vec!["tilt".into(), "annotation".into(), "sparkles".into()],
            ..EffectsConfig::default()
        };
        let mut effects = Effects::detect(&config);
        assert!(effects.available().is_empty());
        effects.tilt.hover(Rect::EVERYTHING, None);
        effects.annotation.highlight(Rect::EVERYTHING);
    }

    #[test]
    fn test_confetti_detected() {
        let effects = Effects::detect(&EffectsConfig::default());
        assert_eq!(effects.available(), vec!["confetti"]);
    }

    #[test]
    fn test_confetti_burst_fades_out() {
        let mut confetti = ConfettiBurst::with_seed(20, 5);
        let mut surface = ShapeSurface::new([400, 400]);
        confetti.burst(pos2(200.0, 300.0));
        assert_eq!(confetti.len(), 20);

        assert!(confetti.paint(&mut surface));
        assert_eq!(surface.shapes().len(), 20);

        let mut frames = 1;
        while confetti.paint(&mut surface) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(confetti.is_empty());
    }
}
