use crate::config::TrackerConfig;

/// Policy governing a single sleep episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepPolicy {
    /// Wake on a motion interrupt or after the ceiling, whichever fires
    /// first; the ceiling is the periodic-report guarantee
    MotionOrTimer {
        /// Maximum episode length in seconds
        ceiling_secs: u32,
    },
    /// Wake only on the timer; used to enforce the debounce window after
    /// a suppressed motion wake
    TimerOnly {
        /// Episode length in seconds
        duration_secs: u32,
    },
}

/// Why a sleep episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeReason {
    /// The motion interrupt fired
    Motion,
    /// The episode ran to its timer
    Timer,
}

/// What to do after a sleep episode ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeDisposition {
    /// Start a fix attempt and work toward a report
    BeginFixAttempt,
    /// Motion recurred too soon after the last report; sleep again under
    /// the timer-only policy
    SuppressAndResleep,
}

/// Select the policy for the next sleep episode
///
/// A set suppression flag buys exactly one timer-only episode; the caller
/// clears the flag once that episode has run. A machine whose motion
/// sensor failed configuration sleeps timer-only at the report interval,
/// preserving the periodic-report guarantee without a motion wake source.
pub fn select_sleep_policy(
    suppress_motion_wake: bool,
    motion_ready: bool,
    config: &TrackerConfig,
) -> SleepPolicy {
    if suppress_motion_wake {
        SleepPolicy::TimerOnly {
            duration_secs: config.suppressed_sleep_secs(),
        }
    } else if !motion_ready {
        SleepPolicy::TimerOnly {
            duration_secs: config.report_interval_secs,
        }
    } else {
        SleepPolicy::MotionOrTimer {
            ceiling_secs: config.report_interval_secs,
        }
    }
}

/// Classify a wake against the debounce window
///
/// A timer wake always proceeds to a fix attempt. A motion wake proceeds
/// only when strictly more than `debounce_secs` have passed since the
/// last report; otherwise it is suppressed.
pub fn classify_wake(
    reason: WakeReason,
    since_publish_secs: u64,
    debounce_secs: u64,
) -> WakeDisposition {
    match reason {
        WakeReason::Timer => WakeDisposition::BeginFixAttempt,
        WakeReason::Motion if since_publish_secs > debounce_secs => {
            WakeDisposition::BeginFixAttempt
        }
        WakeReason::Motion => WakeDisposition::SuppressAndResleep,
    }
}
