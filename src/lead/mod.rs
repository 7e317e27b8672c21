//! Lead capture — the contact fields collected from a visitor and the
//! scripted step sequence that fills them in.

pub mod model;
pub mod steps;

pub use model::{Lead, LeadField};
pub use steps::{CaptureStep, StepOutcome, advance};
