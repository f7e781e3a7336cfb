//! Power-cycle orchestration for a battery-powered location tracker
//!
//! This crate implements the duty-cycle state machine of a field device
//! that wakes on motion or on a timer, acquires a position fix, publishes
//! a status report and returns to a low-power sleep. The hardware itself
//! (motion sensor, position receiver, battery gauge, network uplink,
//! sleep controller) is reached only through narrow traits, so the core
//! can run on real hardware or against mocks.
//!
//! # Features
//! - Non-blocking poll loop; the hardware suspend in the sleeping state
//!   is the single blocking point
//! - Guaranteed periodic report even with no motion (ceiling timer)
//! - Motion debounce: a report triggered too soon after the previous one
//!   is suppressed for a single timer-only sleep episode
//! - All timeout guards use monotonic time only
//! - No unsafe code, no allocation
//!
//! # Example
//! ```ignore
//! use asset_tracker::{config::TrackerConfig, tracker::Tracker};
//!
//! // Bring up the board-specific services (clock, GNSS, accelerometer,
//! // fuel gauge, modem, sleep controller), then hand them to the core.
//! let mut tracker = Tracker::new(
//!     clock, gnss, accel, gauge, modem, sleep,
//!     TrackerConfig::default(),
//! );
//!
//! loop {
//!     // One scheduling tick: drains position decoding, evaluates the
//!     // current state's guards, and blocks only while sleeping.
//!     tracker.tick();
//! }
//! ```

#![warn(missing_docs)]
#![no_std]

/// Orchestration tunables
pub mod config;

/// Collaborator service contracts and concrete drivers
pub mod services;

/// Duty-cycle state machine
pub mod tracker;
