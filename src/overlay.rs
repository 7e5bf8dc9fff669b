use egui::{Pos2, Vec2};

use crate::config::OverlayConfig;
use crate::drag::DragBoard;
use crate::effects::Effects;
use crate::error::{OverlayError, OverlayResult};
use crate::frame_loop::FrameLoop;
use crate::ink::InkCanvas;
use crate::input::InputEvent;
use crate::resize::ResizeCoordinator;
use crate::surface::{RasterSurface, ShapeSurface};
use crate::trail::ParticleTrail;

/// Collects the pieces an [`Overlay`] is made of.
///
/// Both surfaces are required; building without one fails right away rather
/// than on the first pointer event.
#[derive(Default)]
pub struct OverlayBuilder {
    config: OverlayConfig,
    trail_surface: Option<ShapeSurface>,
    ink_surface: Option<RasterSurface>,
    effects: Option<Effects>,
    seed: Option<u64>,
}

impl OverlayBuilder {
    pub fn config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn trail_surface(mut self, surface: ShapeSurface) -> Self {
        self.trail_surface = Some(surface);
        self
    }

    pub fn ink_surface(mut self, surface: RasterSurface) -> Self {
        self.ink_surface = Some(surface);
        self
    }

    /// Overrides effect detection
    pub fn effects(mut self, effects: Effects) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Makes particle sampling deterministic
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> OverlayResult<Overlay> {
        self.config.validate()?;
        let trail_surface = self
            .trail_surface
            .ok_or(OverlayError::MissingResource("trail surface"))?;
        let ink_surface = self
            .ink_surface
            .ok_or(OverlayError::MissingResource("ink surface"))?;

        let trail = match self.seed {
            Some(seed) => ParticleTrail::with_seed(self.config.trail.clone(), seed)?,
            None => ParticleTrail::new(self.config.trail.clone())?,
        };
        let effects = self
            .effects
            .unwrap_or_else(|| Effects::detect(&self.config.effects));

        let mut frame_loop = FrameLoop::new();
        frame_loop.start();

        log::info!(
            "Overlay ready with {} stickers, particle cap {}",
            self.config.stickers.len(),
            self.config.trail.max_particles
        );

        Ok(Overlay {
            trail,
            trail_surface,
            frame_loop,
            ink: InkCanvas::new(ink_surface, self.config.ink.style()),
            board: DragBoard::from_config(&self.config.stickers),
            resize: ResizeCoordinator::new(),
            effects,
        })
    }
}

/// Everything pointer-reactive on the page, independent of any window.
///
/// Each layer owns its own state; events are routed here and fanned out.
pub struct Overlay {
    trail: ParticleTrail,
    trail_surface: ShapeSurface,
    frame_loop: FrameLoop,
    ink: InkCanvas<RasterSurface>,
    board: DragBoard,
    resize: ResizeCoordinator,
    effects: Effects,
}

impl Overlay {
    pub fn builder() -> OverlayBuilder {
        OverlayBuilder::default()
    }

    /// Overlay with fresh, empty surfaces. They get sized on the first viewport update.
    pub fn from_config(config: OverlayConfig) -> OverlayResult<Self> {
        Self::builder()
            .config(config)
            .trail_surface(ShapeSurface::new([0, 0]))
            .ink_surface(RasterSurface::new([0, 0]))
            .build()
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(_) => {
                let Some(pos) = event.position() else {
                    return;
                };
                if let Some(id) = self.board.pointer_down(pos) {
                    if let Some(sticker) = self.board.sticker(id) {
                        self.effects.annotation.highlight(sticker.rect());
                    }
                } else {
                    self.ink.start(pos);
                }
            }
            InputEvent::PointerMove(_) => {
                let Some(pos) = event.position() else {
                    return;
                };
                self.trail.spawn(pos);
                if !self.board.pointer_move(pos) {
                    self.ink.draw(pos);
                }
            }
            InputEvent::PointerUp | InputEvent::PointerGone => {
                self.board.pointer_up();
                self.ink.end();
            }
        }
    }

    /// Keeps both surfaces at the viewport size. Returns true if they were resized (and wiped).
    pub fn on_viewport(&mut self, size: Vec2) -> bool {
        self.resize
            .observe(size, &mut self.trail_surface, self.ink.surface_mut())
    }

    /// Forces a resize, as a window resize event would
    pub fn resize(&mut self, size: Vec2) {
        self.resize
            .apply(size, &mut self.trail_surface, self.ink.surface_mut());
    }

    /// Runs one frame of the trail (and any effect in flight).
    ///
    /// Returns whether another frame should be scheduled.
    pub fn step_frame(&mut self) -> bool {
        if !self.frame_loop.step(&mut self.trail, &mut self.trail_surface) {
            return false;
        }
        self.effects.confetti.paint(&mut self.trail_surface);
        true
    }

    pub fn clear_ink(&mut self) {
        self.ink.clear();
    }

    /// Fires the confetti effect, if there is one
    pub fn celebrate(&mut self, origin: Pos2) {
        self.effects.confetti.burst(origin);
    }

    pub fn trail(&self) -> &ParticleTrail {
        &self.trail
    }

    pub fn trail_surface(&self) -> &ShapeSurface {
        &self.trail_surface
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn frame_loop_mut(&mut self) -> &mut FrameLoop {
        &mut self.frame_loop
    }

    pub fn ink(&self) -> &InkCanvas<RasterSurface> {
        &self.ink
    }

    pub fn board(&self) -> &DragBoard {
        &self.board
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut Effects {
        &mut self.effects
    }
}
