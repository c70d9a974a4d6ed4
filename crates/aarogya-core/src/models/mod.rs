//! Domain models for the symptom matcher.

mod diagnosis;
mod rule;
mod state;

pub use diagnosis::*;
pub use rule::*;
pub use state::*;
