use egui::{CursorIcon, Pos2, Rect, Vec2};
use uuid::Uuid;

use super::{Transform, Transformable};
use crate::config::StickerConfig;

/// A labelled element floating over the page
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: Uuid,
    label: String,
    /// Where the sticker was placed, before any transform
    base_rect: Rect,
    transform: Transform,
    cursor: CursorIcon,
}

impl Sticker {
    pub fn new(label: &str, base_rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.to_string(),
            base_rect,
            transform: Transform::default(),
            cursor: CursorIcon::Grab,
        }
    }

    pub fn from_config(config: &StickerConfig) -> Self {
        Self::new(
            &config.label,
            Rect::from_min_size(config.position(), config.size()),
        )
        .with_transform(Transform {
            scale: config.scale,
            rotation: config.rotation.to_radians(),
            ..Transform::identity()
        })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Current on-screen rectangle, ignoring rotation
    pub fn rect(&self) -> Rect {
        self.transform.apply_to_rect(self.base_rect)
    }

    /// Current on-screen outline
    pub fn corners(&self) -> [Pos2; 4] {
        self.transform.corners(self.base_rect)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.transform.contains(self.base_rect, pos)
    }
}

impl Transformable for Sticker {
    fn translation(&self) -> Vec2 {
        self.transform.translation
    }

    fn set_translation(&mut self, translation: Vec2) {
        self.transform.translation = translation;
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }
}
