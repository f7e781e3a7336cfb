use core::fmt::Write;

use heapless::String;

/// Event channel the status report is published on
pub const STATUS_CHANNEL: &str = "loc";
/// Maximum age before the network may drop an undelivered report
pub const STATUS_TTL_SECS: u32 = 60;
/// Capacity of the encoded report buffer
pub const STATUS_CAPACITY: usize = 64;

/// One status report, sampled at the moment of construction
///
/// Every field is read from its owning service when the report is built;
/// nothing is cached across scheduling ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    /// Whether the preceding wake was caused by motion
    pub woke_from_motion: bool,
    /// Cell voltage in volts
    pub cell_voltage: f32,
    /// State of charge as a fraction
    pub state_of_charge: f32,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl StatusReport {
    /// Encode as the comma-separated wire payload
    ///
    /// Format: `wokeFromMotion,cellVoltage(2dp),stateOfCharge(2dp),
    /// latitude(6dp),longitude(6dp)`. Voltage and charge keep the
    /// two-decimal rounding of the original wire format while the
    /// coordinates carry six decimals; the asymmetry is part of the
    /// external contract.
    pub fn encode(&self) -> String<STATUS_CAPACITY> {
        let mut out = String::new();
        // Worst case is well inside STATUS_CAPACITY, so the write cannot
        // overflow the buffer
        let _ = write!(
            out,
            "{},{:.2},{:.2},{:.6},{:.6}",
            self.woke_from_motion as u8,
            self.cell_voltage,
            self.state_of_charge,
            self.latitude,
            self.longitude,
        );
        out
    }
}
