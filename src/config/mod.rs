//! Orchestration configuration
//!
//! This module contains the tunables that govern the duty cycle:
//! - Settle and timeout durations for each awake state
//! - The periodic report ceiling and the motion debounce window
//! - Motion sensor sensitivity

/// Duty-cycle tunables
pub mod tracker;

pub use tracker::TrackerConfig;
