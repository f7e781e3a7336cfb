use super::sleep::WakeReason;

/// Duty-cycle accounting
///
/// Advisory counters kept by the state machine: cumulative awake and
/// asleep time plus per-event counts. Never consulted by the transition
/// logic.
#[derive(Debug, Clone, Default)]
pub struct DutyCycleStats {
    awake_ms: u64,
    asleep_ms: u64,
    publish_count: u32,
    fix_timeout_count: u32,
    motion_wake_count: u32,
    timer_wake_count: u32,
    suppressed_episode_count: u32,
}

impl DutyCycleStats {
    /// Create zeroed stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add awake time
    pub fn record_awake(&mut self, duration_ms: u64) {
        self.awake_ms = self.awake_ms.saturating_add(duration_ms);
    }

    /// Add asleep time
    pub fn record_asleep(&mut self, duration_ms: u64) {
        self.asleep_ms = self.asleep_ms.saturating_add(duration_ms);
    }

    /// Record an accepted publish attempt
    pub fn record_publish(&mut self) {
        self.publish_count = self.publish_count.saturating_add(1);
    }

    /// Record a fix attempt that timed out
    pub fn record_fix_timeout(&mut self) {
        self.fix_timeout_count = self.fix_timeout_count.saturating_add(1);
    }

    /// Record the reason a sleep episode ended
    pub fn record_wake(&mut self, reason: WakeReason) {
        match reason {
            WakeReason::Motion => {
                self.motion_wake_count = self.motion_wake_count.saturating_add(1)
            }
            WakeReason::Timer => self.timer_wake_count = self.timer_wake_count.saturating_add(1),
        }
    }

    /// Record a completed timer-only (suppressed) episode
    pub fn record_suppressed_episode(&mut self) {
        self.suppressed_episode_count = self.suppressed_episode_count.saturating_add(1);
    }

    /// Total time spent awake in milliseconds
    pub fn awake_ms(&self) -> u64 {
        self.awake_ms
    }

    /// Total time spent asleep in milliseconds
    pub fn asleep_ms(&self) -> u64 {
        self.asleep_ms
    }

    /// Accepted publish attempts
    pub fn publish_count(&self) -> u32 {
        self.publish_count
    }

    /// Fix attempts that timed out
    pub fn fix_timeout_count(&self) -> u32 {
        self.fix_timeout_count
    }

    /// Wakes caused by the motion interrupt
    pub fn motion_wake_count(&self) -> u32 {
        self.motion_wake_count
    }

    /// Wakes caused by a timer
    pub fn timer_wake_count(&self) -> u32 {
        self.timer_wake_count
    }

    /// Completed suppressed episodes
    pub fn suppressed_episode_count(&self) -> u32 {
        self.suppressed_episode_count
    }

    /// Fraction of total time spent awake, as a percentage
    pub fn duty_cycle(&self) -> f32 {
        let total = self.awake_ms + self.asleep_ms;
        if total == 0 {
            return 0.0;
        }
        (self.awake_ms as f32 / total as f32) * 100.0
    }
}
