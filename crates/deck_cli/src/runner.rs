//! Scenario runner that drives a headless card.

use anyhow::{bail, Result};
use deck_card::{Card, CardConfig, NotificationLog};
use deck_core::{InputEvent, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

use crate::report::{ReportStatus, RunReport, TraceEntry};
use crate::scenario::{FrameSpec, Scenario, ScenarioStep};

/// Upper bound for a single `settle` step
pub const MAX_SETTLE_FRAMES: usize = 10_000;

/// Runtime knobs for a scenario run
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Simulated frame interval in milliseconds
    pub frame_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { frame_ms: 16 }
    }
}

impl RunConfig {
    fn frame_dt(&self) -> f32 {
        self.frame_ms as f32 / 1000.0
    }
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: RunReport },
    Failed { report: RunReport },
}

impl RunOutcome {
    pub fn report(&self) -> &RunReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

struct Failure {
    step_index: usize,
    assertion: &'static str,
    message: String,
}

/// A card plus the bookkeeping of one run
struct Session {
    card: Card,
    log: Rc<RefCell<NotificationLog>>,
    config: RunConfig,
    elapsed_frames: u64,
}

impl Session {
    fn tick(&mut self, frames: u64) {
        let dt = self.config.frame_dt();
        for _ in 0..frames {
            self.card.tick(dt);
        }
        self.elapsed_frames += frames;
    }

    fn settle(&mut self, step_index: usize) -> Result<()> {
        let dt = self.config.frame_dt();
        let frames = self.card.run_until_idle(dt, MAX_SETTLE_FRAMES);
        self.elapsed_frames += frames as u64;
        if self.card.is_animating() {
            bail!(
                "step {step_index}: animations still running after {MAX_SETTLE_FRAMES} frames"
            );
        }
        Ok(())
    }

    fn report(&self, failure: Option<Failure>) -> RunReport {
        let trace = self
            .log
            .borrow()
            .runs()
            .into_iter()
            .map(|(notification, count)| TraceEntry {
                notification: notification.name().to_string(),
                count,
            })
            .collect();
        let (status, failed_step_index, assertion, message) = match failure {
            Some(failure) => (
                ReportStatus::Failed,
                Some(failure.step_index),
                Some(failure.assertion.to_string()),
                Some(failure.message),
            ),
            None => (ReportStatus::Passed, None, None, None),
        };
        RunReport {
            status,
            failed_step_index,
            assertion,
            message,
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_frames as f64 * self.config.frame_ms as f64,
            final_state: self.card.state(),
            presented: self.card.is_detail_presented(),
            frame: self.card.frame().into(),
            trace,
        }
    }
}

/// Execute scenario JSON with the default card configuration.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, CardConfig::default(), RunConfig::default())
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &Scenario,
    card_config: CardConfig,
    run_config: RunConfig,
) -> Result<RunOutcome> {
    if run_config.frame_ms == 0 {
        bail!("frame interval must be at least 1 ms");
    }

    let mut card = Card::new(scenario.card.into(), card_config);
    let log = Rc::new(RefCell::new(NotificationLog::new()));
    card.set_observer(&log);
    let mut session = Session {
        card,
        log,
        config: run_config,
        elapsed_frames: 0,
    };

    tracing::info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "running scenario"
    );

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, kind = step.kind(), "step");
        if let Some(failure) = run_step(&mut session, step_index, step)? {
            tracing::info!(step_index, message = %failure.message, "assertion failed");
            return Ok(RunOutcome::Failed {
                report: session.report(Some(failure)),
            });
        }
    }

    Ok(RunOutcome::Passed {
        report: session.report(None),
    })
}

fn run_step(
    session: &mut Session,
    step_index: usize,
    step: &ScenarioStep,
) -> Result<Option<Failure>> {
    let card = &mut session.card;
    match *step {
        ScenarioStep::TouchDown { x, y } => {
            card.handle_input(InputEvent::TouchDown {
                location: Point::new(x, y),
            });
        }
        ScenarioStep::TouchMove { x, y } => {
            card.handle_input(InputEvent::TouchMoved {
                location: Point::new(x, y),
            });
        }
        ScenarioStep::TouchUp { x, y } => {
            card.handle_input(InputEvent::TouchUp {
                location: Point::new(x, y),
            });
        }
        ScenarioStep::TouchCancel => {
            card.handle_input(InputEvent::TouchCancelled);
        }
        ScenarioStep::Scroll { offset_y } => {
            card.handle_input(InputEvent::ScrollChanged { offset_y });
        }
        ScenarioStep::Release { velocity_y } => {
            card.handle_input(InputEvent::DragReleased {
                velocity: Point::new(0.0, velocity_y),
            });
        }
        ScenarioStep::Decelerated => {
            card.handle_input(InputEvent::DecelerationEnded);
        }
        ScenarioStep::Tick { frames } => session.tick(u64::from(frames)),
        ScenarioStep::Settle => session.settle(step_index)?,
        ScenarioStep::AssertState { state } => {
            let actual = card.state();
            if actual != state {
                return Ok(Some(Failure {
                    step_index,
                    assertion: "assert_state",
                    message: format!(
                        "expected state {}, found {}",
                        state.name(),
                        actual.name()
                    ),
                }));
            }
        }
        ScenarioStep::AssertPresented { value } => {
            let actual = card.is_detail_presented();
            if actual != value {
                return Ok(Some(Failure {
                    step_index,
                    assertion: "assert_presented",
                    message: format!("expected presented = {value}, found {actual}"),
                }));
            }
        }
        ScenarioStep::AssertFrame {
            x,
            y,
            width,
            height,
            tolerance,
        } => {
            let expected = Rect::new(x, y, width, height);
            let actual = card.frame();
            if !frames_match(expected, actual, tolerance) {
                let actual = FrameSpec::from(actual);
                return Ok(Some(Failure {
                    step_index,
                    assertion: "assert_frame",
                    message: format!(
                        "expected frame ({x}, {y}, {width}, {height}), found ({}, {}, {}, {})",
                        actual.x, actual.y, actual.width, actual.height
                    ),
                }));
            }
        }
    }
    Ok(None)
}

fn frames_match(expected: Rect, actual: Rect, tolerance: f32) -> bool {
    let close = |a: f32, b: f32| (a - b).abs() <= tolerance;
    close(expected.x(), actual.x())
        && close(expected.y(), actual.y())
        && close(expected.width(), actual.width())
        && close(expected.height(), actual.height())
}
