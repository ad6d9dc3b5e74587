//! Scenario definition for headless card runs.

use anyhow::{Context, Result};
use deck_card::CardState;
use deck_core::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A card frame as written in scenario files
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FrameSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 140.0,
        }
    }
}

impl From<FrameSpec> for Rect {
    fn from(spec: FrameSpec) -> Self {
        Rect::new(spec.x, spec.y, spec.width, spec.height)
    }
}

impl From<Rect> for FrameSpec {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Sequence of gesture and assertion steps against one card.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Original (collapsed) frame of the card
    #[serde(default)]
    pub card: FrameSpec,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Failed to parse scenario")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("In scenario {}", path.display()))
    }
}

fn default_tolerance() -> f32 {
    0.001
}

/// One scenario step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    TouchDown {
        x: f32,
        y: f32,
    },
    TouchMove {
        x: f32,
        y: f32,
    },
    TouchUp {
        x: f32,
        y: f32,
    },
    TouchCancel,
    /// Content region scroll offset during a drag
    Scroll {
        offset_y: f32,
    },
    /// Finger lifted from the content region
    Release {
        velocity_y: f32,
    },
    /// Momentum scrolling ended
    Decelerated,
    Tick {
        frames: u32,
    },
    /// Tick until no animation is running
    Settle,
    AssertState {
        state: CardState,
    },
    AssertPresented {
        value: bool,
    },
    AssertFrame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

impl ScenarioStep {
    /// Name of the step as written in scenario files
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioStep::TouchDown { .. } => "touch_down",
            ScenarioStep::TouchMove { .. } => "touch_move",
            ScenarioStep::TouchUp { .. } => "touch_up",
            ScenarioStep::TouchCancel => "touch_cancel",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Release { .. } => "release",
            ScenarioStep::Decelerated => "decelerated",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Settle => "settle",
            ScenarioStep::AssertState { .. } => "assert_state",
            ScenarioStep::AssertPresented { .. } => "assert_presented",
            ScenarioStep::AssertFrame { .. } => "assert_frame",
        }
    }

    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertState { .. }
                | ScenarioStep::AssertPresented { .. }
                | ScenarioStep::AssertFrame { .. }
        )
    }
}
