//! Duty-cycle state machine
//!
//! This module contains the orchestration core of the tracker:
//! - [`TrackerState`]: the seven states of the power cycle
//! - [`Tracker`]: owns the collaborator services and all mutable context,
//!   and advances one transition per [`tick`](Tracker::tick)
//! - [`sleep`]: sleep-policy selection and wake classification
//! - [`payload`]: the published status report
//! - [`stats`]: advisory duty-cycle accounting
//!
//! The loop is cooperative and single-threaded. Every tick first drains
//! pending position decoding, then evaluates the current state's guards.
//! All timeout guards compare monotonic milliseconds against the time the
//! state was entered; wall-clock time is used only to space reports. The
//! sole blocking operation is the hardware suspend performed while in
//! [`TrackerState::Sleeping`].

/// Status report construction
pub mod payload;

/// Sleep policy and wake classification
pub mod sleep;

/// Duty-cycle accounting
pub mod stats;

pub use payload::{StatusReport, STATUS_CHANNEL, STATUS_TTL_SECS};
pub use sleep::{classify_wake, select_sleep_policy, SleepPolicy, WakeDisposition, WakeReason};
pub use stats::DutyCycleStats;

use crate::config::TrackerConfig;
use crate::services::traits::{
    Clock, Connectivity, MotionSensor, PositionSource, PowerTelemetry, SleepController,
    Visibility, WakeEdge,
};

/// States of the power cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerState {
    /// Waiting for the uplink to connect after boot
    AwaitingConnectivity,
    /// Configuring the motion sensor for wake-on-motion
    Resetting,
    /// Letting the board settle before the first fix attempt
    AwaitingBoot,
    /// Waiting for a valid position fix
    AwaitingFix,
    /// Holding a fix, waiting for a publish opportunity
    Publishing,
    /// Letting the transport flush after a publish
    AwaitingPublishSettle,
    /// Suspended; wakes on motion or on the periodic timer
    Sleeping,
}

/// The orchestration core
///
/// Owns the six collaborator services and every piece of mutable context.
/// Context lives only in volatile memory and is rebuilt on reboot. Drive
/// it by calling [`tick`](Tracker::tick) from the scheduler loop; every
/// state except [`TrackerState::Sleeping`] returns without blocking.
pub struct Tracker<C, P, M, B, N, S>
where
    C: Clock,
    P: PositionSource,
    M: MotionSensor,
    B: PowerTelemetry,
    N: Connectivity,
    S: SleepController,
{
    clock: C,
    position: P,
    motion: M,
    power: B,
    net: N,
    sleep: S,
    config: TrackerConfig,
    /// Current state
    state: TrackerState,
    /// Monotonic ms at the last transition; basis of all timeout guards
    state_entered_at: u64,
    /// Outcome of the most recent wake classification
    woke_from_motion: bool,
    /// When set, the next sleep episode is timer-only, once
    suppress_motion_wake: bool,
    /// Whether wake-on-motion configuration succeeded this boot
    motion_ready: bool,
    /// Epoch seconds of the last accepted publish; 0 = never
    last_publish_at: u64,
    /// Monotonic ms when the current fix attempt started
    fix_started_at: u64,
    /// Whether a fix attempt is running
    fix_in_progress: bool,
    /// Monotonic ms of the last waiting-for-connectivity diagnostic
    last_waiting_log_at: u64,
    /// Monotonic ms when the current awake span began
    awake_since: u64,
    stats: DutyCycleStats,
}

impl<C, P, M, B, N, S> Tracker<C, P, M, B, N, S>
where
    C: Clock,
    P: PositionSource,
    M: MotionSensor,
    B: PowerTelemetry,
    N: Connectivity,
    S: SleepController,
{
    /// Create the core at boot
    ///
    /// Starts in [`TrackerState::AwaitingConnectivity`] with the fix
    /// attempt flagged as started, matching a receiver that begins
    /// searching as soon as it is powered.
    pub fn new(
        clock: C,
        position: P,
        motion: M,
        power: B,
        net: N,
        sleep: S,
        config: TrackerConfig,
    ) -> Self {
        let now = clock.millis();
        Self {
            clock,
            position,
            motion,
            power,
            net,
            sleep,
            config,
            state: TrackerState::AwaitingConnectivity,
            state_entered_at: now,
            woke_from_motion: false,
            suppress_motion_wake: false,
            motion_ready: false,
            last_publish_at: 0,
            fix_started_at: now,
            fix_in_progress: true,
            last_waiting_log_at: 0,
            awake_since: now,
            stats: DutyCycleStats::new(),
        }
    }

    /// Run one scheduling tick
    ///
    /// Drains position decoding, then evaluates the current state's
    /// guards and performs at most one transition. Blocks only while
    /// sleeping; every other state returns promptly so decode and
    /// diagnostic work can be serviced between ticks. Returns the state
    /// after the tick.
    pub fn tick(&mut self) -> TrackerState {
        self.position.process();

        match self.state {
            TrackerState::AwaitingConnectivity => self.await_connectivity(),
            TrackerState::Resetting => self.reset_motion_sensor(),
            TrackerState::AwaitingBoot => self.await_boot(),
            TrackerState::AwaitingFix => self.await_fix(),
            TrackerState::Publishing => self.publish_report(),
            TrackerState::AwaitingPublishSettle => self.await_publish_settle(),
            TrackerState::Sleeping => self.sleep_cycle(),
        }

        self.state
    }

    /// Current state
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// The configuration in use
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Duty-cycle accounting so far
    pub fn stats(&self) -> &DutyCycleStats {
        &self.stats
    }

    /// Whether the most recent wake was caused by motion
    pub fn woke_from_motion(&self) -> bool {
        self.woke_from_motion
    }

    /// Whether the next sleep episode ignores motion
    pub fn is_motion_suppressed(&self) -> bool {
        self.suppress_motion_wake
    }

    /// Whether wake-on-motion configuration succeeded this boot
    pub fn motion_ready(&self) -> bool {
        self.motion_ready
    }

    /// Epoch seconds of the last accepted publish; 0 = never
    pub fn last_publish_at(&self) -> u64 {
        self.last_publish_at
    }

    /// How long the current fix attempt has been running, if one is
    pub fn fix_attempt_elapsed_ms(&self) -> Option<u64> {
        if self.fix_in_progress {
            Some(self.clock.millis().saturating_sub(self.fix_started_at))
        } else {
            None
        }
    }

    fn elapsed_in_state(&self) -> u64 {
        self.clock.millis().saturating_sub(self.state_entered_at)
    }

    fn transition(&mut self, next: TrackerState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("state {} -> {}", self.state, next);
        self.state = next;
        self.state_entered_at = self.clock.millis();
    }

    fn begin_fix_attempt(&mut self) {
        self.fix_in_progress = true;
        self.fix_started_at = self.clock.millis();
    }

    fn await_connectivity(&mut self) {
        if self.net.is_connected() {
            self.transition(TrackerState::Resetting);
            return;
        }

        let now = self.clock.millis();
        if now.saturating_sub(self.last_waiting_log_at)
            >= self.config.waiting_log_interval_ms as u64
        {
            self.last_waiting_log_at = now;
            #[cfg(feature = "defmt")]
            defmt::debug!("waiting for connectivity");
        }
    }

    fn reset_motion_sensor(&mut self) {
        match self.motion.configure(self.config.motion_threshold) {
            Ok(()) => {
                self.motion_ready = true;
                self.transition(TrackerState::AwaitingBoot);
            }
            Err(_) => {
                // Degrade to timer-only wake for the rest of this boot
                // cycle; configuration is not retried until reboot
                #[cfg(feature = "defmt")]
                defmt::warn!("motion sensor configuration failed");
                self.transition(TrackerState::Sleeping);
            }
        }
    }

    fn await_boot(&mut self) {
        if self.elapsed_in_state() >= self.config.boot_settle_ms as u64 {
            self.begin_fix_attempt();
            self.transition(TrackerState::AwaitingFix);
        }
    }

    fn await_fix(&mut self) {
        if self.position.has_fix() {
            self.fix_in_progress = false;
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "fix acquired after {} ms",
                self.clock.millis().saturating_sub(self.fix_started_at)
            );
            self.transition(TrackerState::Publishing);
        } else if self.elapsed_in_state() >= self.config.fix_timeout_ms as u64 {
            self.fix_in_progress = false;
            self.stats.record_fix_timeout();
            #[cfg(feature = "defmt")]
            defmt::warn!("no fix within {} ms", self.config.fix_timeout_ms);
            self.transition(TrackerState::Sleeping);
        }
    }

    fn publish_report(&mut self) {
        if self.net.is_connected() {
            let report = StatusReport {
                woke_from_motion: self.woke_from_motion,
                cell_voltage: self.power.cell_voltage(),
                state_of_charge: self.power.state_of_charge(),
                latitude: self.position.latitude(),
                longitude: self.position.longitude(),
            };
            let encoded = report.encode();

            if self
                .net
                .publish(STATUS_CHANNEL, &encoded, STATUS_TTL_SECS, Visibility::Private)
            {
                self.last_publish_at = self.clock.epoch_seconds();
                self.stats.record_publish();
                self.transition(TrackerState::AwaitingPublishSettle);
                return;
            }
            // A rejected attempt falls through to the same timeout guard
            // as a missing connection
        }

        if self.elapsed_in_state() >= self.config.publish_timeout_ms as u64 {
            self.transition(TrackerState::Sleeping);
        }
    }

    fn await_publish_settle(&mut self) {
        if self.elapsed_in_state() >= self.config.publish_settle_ms as u64 {
            self.transition(TrackerState::Sleeping);
        }
    }

    /// One full sleep episode: the only blocking path in the machine
    fn sleep_cycle(&mut self) {
        self.motion.calibrate(self.config.calibrate_settle_ms);

        let policy =
            select_sleep_policy(self.suppress_motion_wake, self.motion_ready, &self.config);
        let before = self.clock.millis();
        self.stats
            .record_awake(before.saturating_sub(self.awake_since));

        match policy {
            SleepPolicy::TimerOnly { duration_secs } => {
                self.sleep.suspend(None, duration_secs);
                // The flag buys exactly one episode
                if self.suppress_motion_wake {
                    self.suppress_motion_wake = false;
                    self.stats.record_suppressed_episode();
                }
            }
            SleepPolicy::MotionOrTimer { ceiling_secs } => {
                self.motion.arm_wake_interrupt(WakeEdge::Rising);
                self.sleep.suspend(Some(WakeEdge::Rising), ceiling_secs);
            }
        }

        let now = self.clock.millis();
        self.stats.record_asleep(now.saturating_sub(before));
        self.awake_since = now;

        // The interrupt latches in the sensor even when it was not armed
        // as a wake source, so classification runs after every episode
        self.woke_from_motion = self.motion.read_and_clear_interrupt();
        let reason = if self.woke_from_motion {
            WakeReason::Motion
        } else {
            WakeReason::Timer
        };
        self.stats.record_wake(reason);

        let since_publish = self
            .clock
            .epoch_seconds()
            .saturating_sub(self.last_publish_at);
        match classify_wake(reason, since_publish, self.config.movement_publish_delay_secs) {
            WakeDisposition::BeginFixAttempt => {
                self.suppress_motion_wake = false;
                self.begin_fix_attempt();
                self.transition(TrackerState::AwaitingFix);
            }
            WakeDisposition::SuppressAndResleep => {
                self.suppress_motion_wake = true;
                // Self-loop: the next tick starts another episode under
                // the timer-only policy
                self.transition(TrackerState::Sleeping);
            }
        }
    }
}
