#![allow(dead_code)]

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use asset_tracker::config::TrackerConfig;
use asset_tracker::services::{
    Clock, Connectivity, MotionSensor, PositionSource, PowerTelemetry, SleepController,
    Visibility, WakeEdge,
};
use asset_tracker::tracker::Tracker;

/// Scripted outcome of one suspend call
#[derive(Debug, Clone, Copy)]
pub struct WakeEvent {
    /// Seconds that pass before the suspend returns
    pub after_secs: u64,
    /// Whether motion latched the interrupt during the episode
    pub motion: bool,
}

/// Shared fake hardware environment
#[derive(Debug)]
pub struct Env {
    pub now_ms: u64,
    pub epoch_secs: u64,
    pub connected: bool,
    pub has_fix: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub cell_voltage: f32,
    pub state_of_charge: f32,
    pub interrupt_latched: bool,
    pub configure_ok: bool,
    pub publish_accepted: bool,
    pub decode_calls: u32,
    pub calibrate_calls: u32,
    pub configured_thresholds: Vec<u8>,
    pub armed_edges: Vec<WakeEdge>,
    /// Accepted publishes: (channel, payload, max age, visibility)
    pub published: Vec<(String, String, u32, Visibility)>,
    /// Every publish call, accepted or not
    pub publish_attempts: u32,
    /// Every suspend call: (armed wake edge, timeout seconds)
    pub suspends: Vec<(Option<WakeEdge>, u32)>,
    /// Outcomes for upcoming suspends; an unscripted suspend runs to its
    /// full timeout with no motion
    pub wake_script: VecDeque<WakeEvent>,
}

impl Env {
    fn new() -> Self {
        Self {
            now_ms: 0,
            epoch_secs: 1_600_000_000,
            connected: false,
            has_fix: false,
            latitude: 0.0,
            longitude: 0.0,
            cell_voltage: 3.80,
            state_of_charge: 0.50,
            interrupt_latched: false,
            configure_ok: true,
            publish_accepted: true,
            decode_calls: 0,
            calibrate_calls: 0,
            configured_thresholds: Vec::new(),
            armed_edges: Vec::new(),
            published: Vec::new(),
            publish_attempts: 0,
            suspends: Vec::new(),
            wake_script: VecDeque::new(),
        }
    }

    fn advance_secs(&mut self, secs: u64) {
        self.now_ms += secs * 1_000;
        self.epoch_secs += secs;
    }
}

/// Handle on the shared environment; cloned into every fake service
#[derive(Clone)]
pub struct FakeBus(Rc<RefCell<Env>>);

impl FakeBus {
    pub fn new() -> Self {
        FakeBus(Rc::new(RefCell::new(Env::new())))
    }

    pub fn env(&self) -> Ref<'_, Env> {
        self.0.borrow()
    }

    pub fn env_mut(&self) -> RefMut<'_, Env> {
        self.0.borrow_mut()
    }

    /// Advance monotonic and wall time together
    pub fn advance_ms(&self, ms: u64) {
        let mut env = self.env_mut();
        env.now_ms += ms;
        env.epoch_secs += ms / 1_000;
    }

    /// Jump the wall clock only, as after a time resynchronization
    pub fn jump_epoch(&self, secs: u64) {
        self.env_mut().epoch_secs += secs;
    }

    pub fn script_wake(&self, event: WakeEvent) {
        self.env_mut().wake_script.push_back(event);
    }
}

pub struct FakeClock(pub FakeBus);

impl Clock for FakeClock {
    fn millis(&self) -> u64 {
        self.0.env().now_ms
    }

    fn epoch_seconds(&self) -> u64 {
        self.0.env().epoch_secs
    }
}

pub struct FakePosition(pub FakeBus);

impl PositionSource for FakePosition {
    fn process(&mut self) {
        self.0.env_mut().decode_calls += 1;
    }

    fn has_fix(&self) -> bool {
        self.0.env().has_fix
    }

    fn latitude(&self) -> f64 {
        self.0.env().latitude
    }

    fn longitude(&self) -> f64 {
        self.0.env().longitude
    }
}

/// Mock motion sensor error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockMotionError;

pub struct FakeMotion(pub FakeBus);

impl MotionSensor for FakeMotion {
    type Error = MockMotionError;

    fn configure(&mut self, threshold: u8) -> Result<(), Self::Error> {
        let mut env = self.0.env_mut();
        env.configured_thresholds.push(threshold);
        if env.configure_ok {
            Ok(())
        } else {
            Err(MockMotionError)
        }
    }

    fn calibrate(&mut self, _settle_ms: u32) {
        self.0.env_mut().calibrate_calls += 1;
    }

    fn arm_wake_interrupt(&mut self, edge: WakeEdge) {
        self.0.env_mut().armed_edges.push(edge);
    }

    fn read_and_clear_interrupt(&mut self) -> bool {
        let mut env = self.0.env_mut();
        let latched = env.interrupt_latched;
        env.interrupt_latched = false;
        latched
    }
}

pub struct FakePower(pub FakeBus);

impl PowerTelemetry for FakePower {
    fn cell_voltage(&self) -> f32 {
        self.0.env().cell_voltage
    }

    fn state_of_charge(&self) -> f32 {
        self.0.env().state_of_charge
    }
}

pub struct FakeNet(pub FakeBus);

impl Connectivity for FakeNet {
    fn is_connected(&self) -> bool {
        self.0.env().connected
    }

    fn publish(
        &mut self,
        channel: &str,
        payload: &str,
        max_age_secs: u32,
        visibility: Visibility,
    ) -> bool {
        let mut env = self.0.env_mut();
        env.publish_attempts += 1;
        if env.publish_accepted {
            env.published
                .push((channel.into(), payload.into(), max_age_secs, visibility));
            true
        } else {
            false
        }
    }
}

pub struct FakeSleep(pub FakeBus);

impl SleepController for FakeSleep {
    fn suspend(&mut self, wake_edge: Option<WakeEdge>, timeout_secs: u32) {
        let mut env = self.0.env_mut();
        env.suspends.push((wake_edge, timeout_secs));
        match env.wake_script.pop_front() {
            Some(event) => {
                env.advance_secs(event.after_secs);
                if event.motion {
                    env.interrupt_latched = true;
                }
            }
            None => env.advance_secs(timeout_secs as u64),
        }
    }
}

pub type FakeTracker =
    Tracker<FakeClock, FakePosition, FakeMotion, FakePower, FakeNet, FakeSleep>;

/// Build a tracker wired to a fresh fake environment
pub fn tracker_with(config: TrackerConfig) -> (FakeBus, FakeTracker) {
    let bus = FakeBus::new();
    let tracker = Tracker::new(
        FakeClock(bus.clone()),
        FakePosition(bus.clone()),
        FakeMotion(bus.clone()),
        FakePower(bus.clone()),
        FakeNet(bus.clone()),
        FakeSleep(bus.clone()),
        config,
    );
    (bus, tracker)
}
