/// Duty-cycle configuration
///
/// Every timing guard and policy constant of the orchestration core lives
/// here. The defaults suit a vehicle-mounted tracker reporting at least
/// hourly; all fields are compile-time constants in a typical build but
/// can be tuned per deployment.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Time to let the board settle after motion-sensor setup before the
    /// first fix attempt, in milliseconds
    pub boot_settle_ms: u32,
    /// Maximum time to wait for a valid position fix, in milliseconds
    pub fix_timeout_ms: u32,
    /// Maximum time to wait for connectivity while holding a fix to
    /// publish, in milliseconds
    pub publish_timeout_ms: u32,
    /// Time to stay awake after a publish so the transport can flush,
    /// in milliseconds
    pub publish_settle_ms: u32,
    /// Ceiling on any motion-armed sleep episode: a report is produced at
    /// least this often even with no motion, in seconds
    pub report_interval_secs: u32,
    /// Debounce window: a motion wake closer than this to the previous
    /// report is suppressed, in seconds
    pub movement_publish_delay_secs: u64,
    /// Duration of a suppressed (timer-only) sleep episode, in minutes
    pub suppressed_sleep_minutes: u32,
    /// Motion interrupt threshold; 1 is the most sensitive setting
    pub motion_threshold: u8,
    /// Settling time given to the motion sensor before each sleep
    /// episode, in milliseconds
    pub calibrate_settle_ms: u32,
    /// Spacing of the waiting-for-connectivity diagnostic, in milliseconds
    pub waiting_log_interval_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            boot_settle_ms: 5_000,
            fix_timeout_ms: 120_000,
            publish_timeout_ms: 60_000,
            publish_settle_ms: 5_000,
            report_interval_secs: 3_600,
            movement_publish_delay_secs: 240,
            suppressed_sleep_minutes: 5,
            motion_threshold: 1,
            calibrate_settle_ms: 100,
            waiting_log_interval_ms: 10_000,
        }
    }
}

impl TrackerConfig {
    /// Duration of a suppressed sleep episode in seconds
    pub fn suppressed_sleep_secs(&self) -> u32 {
        self.suppressed_sleep_minutes * 60
    }
}
