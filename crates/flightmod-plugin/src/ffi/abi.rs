//! C ABI shared between the host and external modules.
//!
//! Every snapshot is `#[repr(C)]` and carries a `structure_version` as its
//! first field. The version must be bumped whenever a layout changes, and
//! only additive, order-preserving changes keep already-built modules
//! binary compatible.

use serde::Serialize;

/// Current layout version of [`AhrsState`].
pub const AHRS_STATE_VERSION: u32 = 1;

/// Current layout version of [`GyroSample`].
pub const GYRO_SAMPLE_VERSION: u32 = 1;

/// Current layout version of [`AccelSample`].
pub const ACCEL_SAMPLE_VERSION: u32 = 1;

/// A snapshot type with a fixed structure version.
pub trait Versioned {
    /// Layout version this build of the host produces.
    const STRUCTURE_VERSION: u32;

    /// Version tag carried by this value.
    fn structure_version(&self) -> u32;

    /// Whether this value has the layout this build understands.
    fn is_current(&self) -> bool {
        self.structure_version() == Self::STRUCTURE_VERSION
    }
}

/// Health of the attitude estimate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AhrsStatus {
    /// The estimator has not finished initialising.
    #[default]
    Initialising = 0,
    /// Initialised but reporting unhealthy.
    Unhealthy = 1,
    /// Initialised and healthy.
    Healthy = 2,
}

/// Map origin of the navigation frame.
///
/// Only meaningful when `initialised` is true; otherwise all fields are zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OriginState {
    pub initialised: bool,
    /// Latitude in 1e-7 degrees.
    pub latitude: i32,
    /// Longitude in 1e-7 degrees.
    pub longitude: i32,
    /// Altitude in metres.
    pub altitude: f32,
}

/// Current vehicle position.
///
/// Only meaningful when `available` is true; otherwise all fields are zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionState {
    pub available: bool,
    /// Latitude in 1e-7 degrees.
    pub latitude: i32,
    /// Longitude in 1e-7 degrees.
    pub longitude: i32,
    /// Altitude in metres.
    pub altitude: f32,
}

/// Snapshot passed to `hook_AHRS_update`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AhrsState {
    pub structure_version: u32,
    /// Host monotonic time in microseconds.
    pub time_us: u64,
    pub status: AhrsStatus,
    /// Body-to-NED rotation as `[w, x, y, z]`.
    pub quat: [f32; 4],
    /// Roll, pitch, yaw in radians.
    pub eulers: [f32; 3],
    pub origin: OriginState,
    pub position: PositionState,
    /// NED offset from the origin in metres, zero when unknown.
    pub relative_position: [f32; 3],
    /// Corrected body rates in rad/s.
    pub gyro_rate: [f32; 3],
    /// Earth-frame acceleration in m/s/s.
    pub accel_ef: [f32; 3],
}

impl Versioned for AhrsState {
    const STRUCTURE_VERSION: u32 = AHRS_STATE_VERSION;

    fn structure_version(&self) -> u32 {
        self.structure_version
    }
}

/// Snapshot passed to `hook_gyro_sample`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GyroSample {
    pub structure_version: u32,
    /// IMU instance that produced the sample.
    pub instance: u8,
    /// Sample period in seconds.
    pub delta_time: f32,
    pub time_us: u64,
    /// Raw rates in rad/s.
    pub gyro: [f32; 3],
}

impl Versioned for GyroSample {
    const STRUCTURE_VERSION: u32 = GYRO_SAMPLE_VERSION;

    fn structure_version(&self) -> u32 {
        self.structure_version
    }
}

/// Snapshot passed to `hook_accel_sample`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccelSample {
    pub structure_version: u32,
    /// IMU instance that produced the sample.
    pub instance: u8,
    /// Sample period in seconds.
    pub delta_time: f32,
    pub time_us: u64,
    /// Raw acceleration in m/s/s.
    pub accel: [f32; 3],
}

impl Versioned for AccelSample {
    const STRUCTURE_VERSION: u32 = ACCEL_SAMPLE_VERSION;

    fn structure_version(&self) -> u32 {
        self.structure_version
    }
}

/// Signature of `hook_setup_start` and `hook_setup_complete`.
pub type TimestampHookFn = unsafe extern "C" fn(time_us: u64);

/// Signature of `hook_AHRS_update`.
pub type AhrsUpdateHookFn = unsafe extern "C" fn(state: *const AhrsState);

/// Signature of `hook_gyro_sample`.
pub type GyroSampleHookFn = unsafe extern "C" fn(state: *const GyroSample);

/// Signature of `hook_accel_sample`.
pub type AccelSampleHookFn = unsafe extern "C" fn(state: *const AccelSample);
