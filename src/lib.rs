#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod drag;
pub mod effects;
pub mod error;
pub mod frame_loop;
pub mod ink;
pub mod input;
pub mod overlay;
pub mod panels;
pub mod renderer;
pub mod resize;
pub mod surface;
pub mod trail;

pub use app::OverlayApp;
pub use config::OverlayConfig;
pub use drag::{DragBoard, DragController, Sticker};
pub use error::{OverlayError, OverlayResult};
pub use frame_loop::{CancelHandle, FrameLoop};
pub use ink::InkCanvas;
pub use input::{InputEvent, InputHandler, PointerSource};
pub use overlay::Overlay;
pub use renderer::Renderer;
pub use resize::ResizeCoordinator;
pub use surface::{RasterSurface, ShapeSurface, Surface};
pub use trail::{Particle, ParticleTrail};
