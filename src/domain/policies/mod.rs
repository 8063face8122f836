//! Domain Policies
//!
//! Build rules that depend only on the environment.

mod step_plan;

pub use step_plan::{Step, StepPlan};
