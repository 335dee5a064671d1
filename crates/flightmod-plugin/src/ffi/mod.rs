//! C ABI definitions shared with external modules.

pub mod abi;
pub mod safety;

pub use abi::{
    ACCEL_SAMPLE_VERSION, AHRS_STATE_VERSION, AccelSample, AccelSampleHookFn, AhrsState,
    AhrsStatus, AhrsUpdateHookFn, GYRO_SAMPLE_VERSION, GyroSample, GyroSampleHookFn, OriginState,
    PositionState, TimestampHookFn, Versioned,
};
pub use safety::snapshot_ref;
