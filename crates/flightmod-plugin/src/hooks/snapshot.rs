//! Snapshot builders, one per hook kind that carries data.

use crate::estimator::AttitudeEstimator;
use crate::ffi::abi::{
    ACCEL_SAMPLE_VERSION, AHRS_STATE_VERSION, AccelSample, AhrsState, AhrsStatus,
    GYRO_SAMPLE_VERSION, GyroSample, OriginState, PositionState,
};
use crate::math::{Location, Quaternion, Vector3};

/// Builds the AHRS snapshot from the current estimator state.
///
/// Optional quantities the estimator cannot provide stay zeroed with their
/// validity flag cleared.
pub fn ahrs_state(estimator: &dyn AttitudeEstimator, time_us: u64) -> AhrsState {
    let mut state = AhrsState {
        structure_version: AHRS_STATE_VERSION,
        time_us,
        ..Default::default()
    };

    state.status = if !estimator.initialised() {
        AhrsStatus::Initialising
    } else if estimator.healthy() {
        AhrsStatus::Healthy
    } else {
        AhrsStatus::Unhealthy
    };

    state.quat = Quaternion::from_rotation_matrix(&estimator.rotation_body_to_ned()).to_array();
    state.eulers = estimator.euler_angles().to_array();

    if let Some(loc) = estimator.origin() {
        state.origin = origin_state(&loc);
    }

    if let Some(loc) = estimator.position() {
        state.position = position_state(&loc);
    }

    if let Some(pos) = estimator.relative_position_ned() {
        state.relative_position = pos.to_array();
    }

    state.gyro_rate = estimator.gyro().to_array();
    state.accel_ef = estimator.accel_ef().to_array();

    state
}

/// Builds a raw gyroscope sample snapshot.
pub fn gyro_sample(instance: u8, delta_time: f32, gyro: Vector3, time_us: u64) -> GyroSample {
    GyroSample {
        structure_version: GYRO_SAMPLE_VERSION,
        instance,
        delta_time,
        time_us,
        gyro: gyro.to_array(),
    }
}

/// Builds a raw accelerometer sample snapshot.
pub fn accel_sample(instance: u8, delta_time: f32, accel: Vector3, time_us: u64) -> AccelSample {
    AccelSample {
        structure_version: ACCEL_SAMPLE_VERSION,
        instance,
        delta_time,
        time_us,
        accel: accel.to_array(),
    }
}

fn origin_state(loc: &Location) -> OriginState {
    OriginState {
        initialised: true,
        latitude: loc.lat,
        longitude: loc.lng,
        altitude: loc.altitude_m(),
    }
}

fn position_state(loc: &Location) -> PositionState {
    PositionState {
        available: true,
        latitude: loc.lat,
        longitude: loc.lng,
        altitude: loc.altitude_m(),
    }
}
