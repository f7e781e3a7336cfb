//! Collaborator services
//!
//! The orchestration core reaches every peripheral through the narrow
//! contracts in [`traits`]: the clock, the position receiver, the motion
//! sensor, the battery gauge, the network uplink and the sleep
//! controller. One concrete driver ships with the crate; everything else
//! is board-specific and supplied by the integrator.

/// Service contracts
pub mod traits;

/// LIS3DH accelerometer driver
pub mod lis3dh;

pub use lis3dh::Lis3dh;
pub use traits::{
    Clock, Connectivity, MotionSensor, PositionSource, PowerTelemetry, SleepController,
    Visibility, WakeEdge,
};
