use crate::config::OverlayConfig;
use crate::error::OverlayResult;
use crate::input::{InputEvent, InputHandler};
use crate::overlay::Overlay;
use crate::panels;
use crate::renderer::Renderer;

pub struct OverlayApp {
    /// Persisted across restarts; drawings and particles are not.
    config: OverlayConfig,
    overlay: Overlay,
    renderer: Renderer,
    input: InputHandler,
}

impl OverlayApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> OverlayResult<Self> {
        let config = Self::initial_config(cc.storage);
        let overlay = Overlay::from_config(config.clone())?;

        Ok(Self {
            config,
            overlay,
            renderer: Renderer::new(cc),
            input: InputHandler::new(),
        })
    }

    /// Config file from the environment first, then the stored config, then defaults.
    fn initial_config(storage: Option<&dyn eframe::Storage>) -> OverlayConfig {
        match OverlayConfig::from_env() {
            Some(Ok(config)) => return config,
            Some(Err(err)) => log::warn!("Ignoring config file: {err}"),
            None => {}
        }

        let stored = storage.and_then(|s| eframe::get_value::<OverlayConfig>(s, eframe::APP_KEY));
        match stored {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    log::warn!("Stored config rejected, using defaults: {err}");
                    OverlayConfig::default()
                }
            },
            None => OverlayConfig::default(),
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Drops presses that land on egui widgets, so clicking the toolbar doesn't draw.
    fn filter_ui_presses(ctx: &egui::Context, events: Vec<InputEvent>) -> Vec<InputEvent> {
        if !ctx.is_pointer_over_area() {
            return events;
        }
        events
            .into_iter()
            .filter(|e| !matches!(e, InputEvent::PointerDown(_)))
            .collect()
    }
}

impl eframe::App for OverlayApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.overlay.on_viewport(ctx.screen_rect().size()) {
            log::debug!("Viewport changed, overlay layers wiped");
        }

        let events = self.input.process_input(ctx);
        let events = Self::filter_ui_presses(ctx, events);
        self.overlay.handle_events(&events);

        if self.overlay.step_frame() {
            ctx.request_repaint();
        }

        let painter = ctx.layer_painter(egui::LayerId::background());
        self.renderer.render(&painter, &mut self.overlay);

        panels::toolbar(&mut self.overlay, ctx);
    }
}
