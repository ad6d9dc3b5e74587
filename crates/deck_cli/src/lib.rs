//! Deck CLI library
//!
//! Headless scenario runs: a JSON script of touches, scroll drags, frame
//! ticks and assertions played against a single card.

pub mod report;
pub mod runner;
pub mod scenario;

pub use report::{ReportStatus, RunReport, TraceEntry};
pub use runner::{run_loaded_scenario, run_scenario, RunConfig, RunOutcome, MAX_SETTLE_FRAMES};
pub use scenario::{FrameSpec, Scenario, ScenarioStep};
