//! Shared test helpers: recording hook handlers and a scripted estimator.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use flightmod_plugin::clock::Clock;
use flightmod_plugin::estimator::AttitudeEstimator;
use flightmod_plugin::ffi::abi::{AccelSample, AhrsState, GyroSample};
use flightmod_plugin::math::{Location, Matrix3, Vector3};

/// One observed handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Start { module: &'static str, time_us: u64 },
    Complete { module: &'static str, time_us: u64 },
    Ahrs { module: &'static str, addr: usize, state: AhrsState },
    Gyro { module: &'static str, addr: usize, sample: GyroSample },
    Accel { module: &'static str, addr: usize, sample: AccelSample },
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(call: Call) {
    CALLS.with(|calls| calls.borrow_mut().push(call));
}

/// Drains the calls observed on this thread.
pub fn take_calls() -> Vec<Call> {
    CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
}

pub unsafe extern "C" fn a_setup_start(time_us: u64) {
    record(Call::Start { module: "a", time_us });
}

pub unsafe extern "C" fn b_setup_start(time_us: u64) {
    record(Call::Start { module: "b", time_us });
}

pub unsafe extern "C" fn c_setup_start(time_us: u64) {
    record(Call::Start { module: "c", time_us });
}

pub unsafe extern "C" fn a_setup_complete(time_us: u64) {
    record(Call::Complete { module: "a", time_us });
}

pub unsafe extern "C" fn a_ahrs_update(state: *const AhrsState) {
    let state_ref = unsafe { &*state };
    record(Call::Ahrs { module: "a", addr: state as usize, state: *state_ref });
}

pub unsafe extern "C" fn b_ahrs_update(state: *const AhrsState) {
    let state_ref = unsafe { &*state };
    record(Call::Ahrs { module: "b", addr: state as usize, state: *state_ref });
}

pub unsafe extern "C" fn a_gyro_sample(sample: *const GyroSample) {
    let sample_ref = unsafe { &*sample };
    record(Call::Gyro { module: "a", addr: sample as usize, sample: *sample_ref });
}

pub unsafe extern "C" fn b_gyro_sample(sample: *const GyroSample) {
    let sample_ref = unsafe { &*sample };
    record(Call::Gyro { module: "b", addr: sample as usize, sample: *sample_ref });
}

pub unsafe extern "C" fn a_accel_sample(sample: *const AccelSample) {
    let sample_ref = unsafe { &*sample };
    record(Call::Accel { module: "a", addr: sample as usize, sample: *sample_ref });
}

/// Clock returning a fixed time and counting reads.
#[derive(Debug)]
pub struct FixedClock {
    pub now: u64,
    pub reads: AtomicU64,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self {
            now,
            reads: AtomicU64::new(0),
        }
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for FixedClock {
    fn micros64(&self) -> u64 {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.now
    }
}

/// Estimator returning scripted values and counting every read.
#[derive(Debug, Default)]
pub struct ScriptedEstimator {
    pub initialised: bool,
    pub healthy: bool,
    pub rotation: Matrix3,
    pub eulers: Vector3,
    pub origin: Option<Location>,
    pub position: Option<Location>,
    pub relative: Option<Vector3>,
    pub gyro: Vector3,
    pub accel_ef: Vector3,
    pub reads: Cell<usize>,
}

impl ScriptedEstimator {
    fn read(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl AttitudeEstimator for ScriptedEstimator {
    fn initialised(&self) -> bool {
        self.read();
        self.initialised
    }

    fn healthy(&self) -> bool {
        self.read();
        self.healthy
    }

    fn rotation_body_to_ned(&self) -> Matrix3 {
        self.read();
        self.rotation
    }

    fn euler_angles(&self) -> Vector3 {
        self.read();
        self.eulers
    }

    fn origin(&self) -> Option<Location> {
        self.read();
        self.origin
    }

    fn position(&self) -> Option<Location> {
        self.read();
        self.position
    }

    fn relative_position_ned(&self) -> Option<Vector3> {
        self.read();
        self.relative
    }

    fn gyro(&self) -> Vector3 {
        self.read();
        self.gyro
    }

    fn accel_ef(&self) -> Vector3 {
        self.read();
        self.accel_ef
    }
}

/// Creates an empty file named `name` in `dir`.
pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").expect("write");
}
