/// Interrupt edge a wake source fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeEdge {
    /// Wake when the line goes high
    Rising,
    /// Wake when the line goes low
    Falling,
}

/// Visibility of a published event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    /// Deliverable only to the device owner's account
    Private,
    /// Deliverable to any subscriber
    Public,
}

/// Time source
///
/// Timeout guards use only [`millis`](Clock::millis); wall-clock time is
/// used solely to space reports, since it can jump on resynchronization.
pub trait Clock {
    /// Monotonic milliseconds since boot
    fn millis(&self) -> u64;

    /// Wall-clock seconds since the Unix epoch
    fn epoch_seconds(&self) -> u64;
}

/// Asynchronous position receiver
///
/// The receiver decodes incoming position data continuously; the core
/// drains that work once per scheduling tick regardless of state.
pub trait PositionSource {
    /// Drain pending decode work; must be cheap when there is none
    fn process(&mut self);

    /// Whether a valid fix is currently known
    fn has_fix(&self) -> bool;

    /// Latitude of the current fix in degrees
    fn latitude(&self) -> f64;

    /// Longitude of the current fix in degrees
    fn longitude(&self) -> f64;
}

/// Interrupt-driven motion detector
pub trait MotionSensor {
    /// Error type for sensor configuration
    type Error;

    /// Configure low-power wake-on-motion at the given threshold
    /// (1 = most sensitive)
    fn configure(&mut self, threshold: u8) -> Result<(), Self::Error>;

    /// Let the sensor settle before a sleep episode
    fn calibrate(&mut self, settle_ms: u32);

    /// Route the motion interrupt to the wake line on the given edge
    fn arm_wake_interrupt(&mut self, edge: WakeEdge);

    /// Read whether the motion interrupt fired, clearing it
    fn read_and_clear_interrupt(&mut self) -> bool;
}

/// Battery gauge
pub trait PowerTelemetry {
    /// Instantaneous cell voltage in volts
    fn cell_voltage(&self) -> f32;

    /// State of charge as a fraction (0.0 - 1.0)
    fn state_of_charge(&self) -> f32;
}

/// Network uplink
pub trait Connectivity {
    /// Whether the uplink is currently connected
    fn is_connected(&self) -> bool;

    /// Publish a payload on a named channel
    ///
    /// Returns `true` when the message was accepted for transmission;
    /// acceptance is not a delivery confirmation.
    fn publish(
        &mut self,
        channel: &str,
        payload: &str,
        max_age_secs: u32,
        visibility: Visibility,
    ) -> bool;
}

/// Hardware suspend
pub trait SleepController {
    /// Suspend execution until the armed wake edge fires or the timeout
    /// elapses, whichever comes first
    ///
    /// Blocking; with `wake_edge` of `None` only the timeout ends the
    /// suspend. Power draw while suspended is negligible.
    fn suspend(&mut self, wake_edge: Option<WakeEdge>, timeout_secs: u32);
}
