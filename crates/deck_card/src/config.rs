//! Card configuration (card.toml)
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [style]
//! corner_radius = 12.0
//! shadow_color = 0x404040
//!
//! [motion]
//! dismiss_threshold = 80.0
//!
//! [screen]
//! width = 414.0
//! height = 896.0
//! ```

use std::fs;
use std::path::Path;

use deck_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level card configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardConfig {
    pub style: StyleConfig,
    pub motion: MotionConfig,
    pub screen: ScreenConfig,
}

impl CardConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: CardConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the card cannot work with
    pub fn validate(&self) -> Result<()> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("screen.detail_width_percent", self.screen.detail_width_percent)?;
        if self.screen.detail_height_inset >= self.screen.height {
            return Err(invalid(
                "screen.detail_height_inset",
                "must be smaller than the screen height",
            ));
        }

        let m = &self.motion;
        non_negative("motion.expand_delay", m.expand_delay)?;
        non_negative("motion.expand_duration", m.expand_duration)?;
        non_negative("motion.bounce_duration", m.bounce_duration)?;
        non_negative("motion.press_duration", m.press_duration)?;
        non_negative("motion.snap_back_duration", m.snap_back_duration)?;
        non_negative("motion.hide_duration", m.hide_duration)?;
        non_negative("motion.tap_slop", m.tap_slop)?;
        positive("motion.press_scale", m.press_scale)?;
        positive("motion.dismiss_threshold", m.dismiss_threshold)?;
        positive("motion.min_release_speed", m.min_release_speed)?;
        if m.min_release_speed > m.max_release_speed {
            return Err(invalid(
                "motion.max_release_speed",
                "must not be below motion.min_release_speed",
            ));
        }

        let s = &self.style;
        non_negative("style.shadow_blur", s.shadow_blur)?;
        non_negative("style.corner_radius", s.corner_radius)?;
        if !(0.0..=1.0).contains(&s.shadow_opacity) {
            return Err(invalid("style.shadow_opacity", "must be within 0.0..=1.0"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {value}")))
    }
}

/// Opaque `0xRRGGBB` color as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct HexColor(pub u32);

impl From<HexColor> for Color {
    fn from(hex: HexColor) -> Self {
        Color::from_hex(hex.0)
    }
}

/// Visual styling of the compact card
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub shadow_blur: f32,
    pub shadow_opacity: f32,
    pub shadow_color: HexColor,
    pub corner_radius: f32,
    /// Name or path of the background image, resolved by the renderer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub text_color: HexColor,
    pub background_color: HexColor,
    /// Content inset as a percentage of the image width
    pub content_inset: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            shadow_blur: 14.0,
            shadow_opacity: 0.6,
            shadow_color: HexColor(0x808080),
            corner_radius: 20.0,
            background_image: None,
            text_color: HexColor(0x000000),
            background_color: HexColor(0xFFFFFF),
            content_inset: 6.0,
        }
    }
}

/// Timings and thresholds of the presentation (seconds, logical units)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Delay before the expand animations start
    pub expand_delay: f32,
    /// Scale animation of a tap-driven expansion
    pub expand_duration: f32,
    /// Bounce (and bounce relax) animation of a tap-driven expansion
    pub bounce_duration: f32,
    /// Press-down accent
    pub press_duration: f32,
    pub press_scale: f32,
    /// Bounce intensity used for tap-driven expansion
    pub tap_bounce_intensity: f32,
    /// Drag displacement below the rest origin that commits a dismissal
    pub dismiss_threshold: f32,
    pub min_release_speed: f32,
    pub max_release_speed: f32,
    /// Snap back to the rest origin after momentum scrolling ends
    pub snap_back_duration: f32,
    /// Collapse pace when no release velocity is available
    pub hide_duration: f32,
    /// Touch movement that turns a press into a non-tap
    pub tap_slop: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            expand_delay: 0.1,
            expand_duration: 0.3,
            bounce_duration: 0.2,
            press_duration: 0.2,
            press_scale: 0.95,
            tap_bounce_intensity: 4.0,
            dismiss_threshold: 60.0,
            min_release_speed: 2.0,
            max_release_speed: 4.0,
            snap_back_duration: 0.1,
            hide_duration: 0.4,
            tap_slop: 8.0,
        }
    }
}

/// Screen geometry the expanded card is laid out against
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// Expanded width as a percentage of the screen width
    pub detail_width_percent: f32,
    /// Expanded height is the screen height minus this inset
    pub detail_height_inset: f32,
    /// Expanded center sits this far below the screen center
    pub detail_center_offset_y: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 375.0,
            height: 667.0,
            detail_width_percent: 85.0,
            detail_height_inset: 20.0,
            detail_center_offset_y: 40.0,
        }
    }
}
