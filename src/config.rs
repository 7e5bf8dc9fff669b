use std::path::Path;

use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};
use crate::surface::{LineCap, LineStyle};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "POINTER_OVERLAY_CONFIG";

/// Tuning for the cursor trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Live particle cap; the oldest particles are evicted beyond it
    pub max_particles: usize,
    pub life_decay: f32,
    pub size_decay: f32,
    /// Size only decays while above this value
    pub size_floor: f32,
    /// Velocity components are sampled from `[-max_speed, max_speed)`
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: [u8; 3],
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_particles: 600,
            life_decay: 0.05,
            size_decay: 0.1,
            size_floor: 0.2,
            max_speed: 1.5,
            min_size: 1.0,
            max_size: 6.0,
            color: [150, 150, 150],
        }
    }
}

impl TrailConfig {
    /// Rejects values particle sampling cannot handle.
    ///
    /// Sampling ranges must have a finite width, so infinite or huge
    /// speeds and sizes are refused as well as non-positive ones.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.max_particles == 0 {
            return Err(invalid("trail.max_particles must be at least 1"));
        }
        if !positive(self.life_decay) {
            return Err(invalid("trail.life_decay must be positive"));
        }
        if !finite_non_negative(self.size_decay)
            || !self.size_floor.is_finite()
            || self.size_floor < self.size_decay
        {
            return Err(invalid(
                "trail.size_floor must be at least trail.size_decay so sizes stay positive",
            ));
        }
        if !positive(self.max_speed) || !(2.0 * self.max_speed).is_finite() {
            return Err(invalid("trail.max_speed must be positive and finite"));
        }
        if !positive(self.min_size)
            || !positive(self.max_size)
            || self.max_size <= self.min_size
            || !(self.max_size - self.min_size).is_finite()
        {
            return Err(invalid("trail sizes need 0 < min_size < max_size"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkConfig {
    pub color: [u8; 3],
    pub width: f32,
    pub cap: LineCap,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            color: [0x33, 0x33, 0x33],
            width: 3.0,
            cap: LineCap::Round,
        }
    }
}

impl InkConfig {
    pub fn style(&self) -> LineStyle {
        let [r, g, b] = self.color;
        LineStyle::new(Color32::from_rgb(r, g, b), self.width, self.cap)
    }
}

/// A draggable sticker placed on the page at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerConfig {
    pub label: String,
    pub position: [f32; 2],
    #[serde(default = "StickerConfig::default_size")]
    pub size: [f32; 2],
    /// Clockwise tilt in degrees
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "StickerConfig::default_scale")]
    pub scale: f32,
}

impl StickerConfig {
    fn default_size() -> [f32; 2] {
        [96.0, 48.0]
    }

    fn default_scale() -> f32 {
        1.0
    }

    pub fn new(label: &str, position: Pos2) -> Self {
        Self {
            label: label.to_owned(),
            position: [position.x, position.y],
            size: Self::default_size(),
            rotation: 0.0,
            scale: Self::default_scale(),
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.position[0], self.position[1])
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size[0], self.size[1])
    }
}

/// Optional visual effects to look for at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Capability names, e.g. "confetti", "tilt", "annotation"
    pub enabled: Vec<String>,
    pub confetti_particles: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["confetti".to_owned()],
            confetti_particles: 150,
        }
    }
}

impl EffectsConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Everything the overlay can be tuned with.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub trail: TrailConfig,
    pub ink: InkConfig,
    pub stickers: Vec<StickerConfig>,
    pub effects: EffectsConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            trail: TrailConfig::default(),
            ink: InkConfig::default(),
            stickers: vec![
                StickerConfig::new("Hello!", Pos2::new(120.0, 140.0)).with_rotation(-4.0),
                StickerConfig::new("Rust", Pos2::new(320.0, 220.0))
                    .with_rotation(3.0)
                    .with_scale(1.2),
                StickerConfig::new("Drag me", Pos2::new(520.0, 160.0)),
            ],
            effects: EffectsConfig::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> OverlayResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        log::info!("Loading overlay config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], if set
    pub fn from_env() -> Option<OverlayResult<Self>> {
        std::env::var_os(CONFIG_ENV_VAR).map(Self::load)
    }

    pub fn to_json_string(&self) -> OverlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> OverlayResult<()> {
        self.trail.validate()?;
        if !positive(self.ink.width) {
            return Err(invalid("ink.width must be positive"));
        }
        for sticker in &self.stickers {
            if sticker.size.iter().any(|s| !positive(*s)) || !positive(sticker.scale) {
                return Err(OverlayError::InvalidConfig(format!(
                    "sticker '{}' needs a positive size and scale",
                    sticker.label
                )));
            }
            if !sticker.rotation.is_finite() || sticker.position.iter().any(|p| !p.is_finite()) {
                return Err(OverlayError::InvalidConfig(format!(
                    "sticker '{}' has a non-finite position or rotation",
                    sticker.label
                )));
            }
        }
        Ok(())
    }
}

/// Strictly positive and finite
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn finite_non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn invalid(msg: &str) -> OverlayError {
    OverlayError::InvalidConfig(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = OverlayConfig::from_json_str(r#"{ "trail": { "max_particles": 42 } }"#).unwrap();
        assert_eq!(config.trail.max_particles, 42);
        assert_eq!(config.trail.life_decay, 0.05);
        assert_eq!(config.ink, InkConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = OverlayConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(OverlayConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_cap() {
        let err = OverlayConfig::from_json_str(r#"{ "trail": { "max_particles": 0 } }"#).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_size_floor_below_decay() {
        let mut config = OverlayConfig::default();
        config.trail.size_floor = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_speed() {
        // 1e39 does not fit in an f32 and deserializes as infinity
        let err = OverlayConfig::from_json_str(r#"{ "trail": { "max_speed": 1e39 } }"#).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));

        let mut config = OverlayConfig::default();
        config.trail.max_speed = 2e38;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut config = OverlayConfig::default();
        config.trail.max_size = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.trail.min_size = -3e38;
        config.trail.max_size = 3e38;
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.trail.life_decay = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.ink.width = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sticker_transform_fields_default() {
        let config = OverlayConfig::from_json_str(
            r#"{ "stickers": [{ "label": "x", "position": [1, 2] }] }"#,
        )
        .unwrap();
        assert_eq!(config.stickers[0].rotation, 0.0);
        assert_eq!(config.stickers[0].scale, 1.0);

        let err = OverlayConfig::from_json_str(
            r#"{ "stickers": [{ "label": "x", "position": [1, 2], "scale": 0 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = OverlayConfig::from_json_str("{ trail: ").unwrap_err();
        assert!(matches!(err, OverlayError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OverlayConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, OverlayError::ConfigIo(_)));
    }

    #[test]
    fn test_effect_names_are_case_insensitive() {
        let effects = EffectsConfig::default();
        assert!(effects.is_enabled("Confetti"));
        assert!(!effects.is_enabled("tilt"));
    }
}
