//! Trading signals service module.
//!
//! Indicator calculations plus the rule modules that turn the latest
//! indicator readings into named signals.

pub mod indicators;
pub mod mean_reversion;
pub mod regime;
pub mod rules;
pub mod sectors;
pub mod trend;
pub mod vix;

pub use rules::{Rule, RuleChain};

/// Round to a fixed number of decimals for display.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
