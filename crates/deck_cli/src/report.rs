//! Report output model for scenario runs.

use anyhow::Result;
use deck_card::CardState;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;

use crate::scenario::FrameSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// A run of identical consecutive notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub notification: String,
    pub count: usize,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: f64,
    pub final_state: CardState,
    pub presented: bool,
    pub frame: FrameSpec,
    pub trace: Vec<TraceEntry>,
}

impl RunReport {
    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Human-readable summary: trace, final geometry, verdict
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Notifications:");
        if self.trace.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for entry in &self.trace {
            if entry.count > 1 {
                let _ = writeln!(out, "  {} x{}", entry.notification, entry.count);
            } else {
                let _ = writeln!(out, "  {}", entry.notification);
            }
        }
        let _ = writeln!(
            out,
            "Final: {} (presented: {}) frame ({}, {}, {}, {})",
            self.final_state.name(),
            self.presented,
            self.frame.x,
            self.frame.y,
            self.frame.width,
            self.frame.height
        );
        let _ = writeln!(
            out,
            "Elapsed: {} frames, {:.1} ms",
            self.elapsed_frames, self.elapsed_ms
        );
        match (&self.status, self.failed_step_index, &self.message) {
            (ReportStatus::Failed, Some(index), Some(message)) => {
                let _ = writeln!(
                    out,
                    "FAILED at step {index} ({}): {message}",
                    self.assertion.as_deref().unwrap_or("step")
                );
            }
            (ReportStatus::Failed, ..) => {
                let _ = writeln!(out, "FAILED");
            }
            (ReportStatus::Passed, ..) => {
                let _ = writeln!(out, "PASSED");
            }
        }
        out
    }
}
