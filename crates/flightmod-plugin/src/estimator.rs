//! Read-only view of the attitude and navigation estimator.

use crate::math::{Location, Matrix3, Vector3};

/// What the dispatcher reads from the estimator to build an AHRS snapshot.
///
/// Implemented by the flight-control host. Optional quantities return
/// `None` until the estimator can provide them.
pub trait AttitudeEstimator {
    /// Whether the estimator has finished initialising.
    fn initialised(&self) -> bool;

    /// Whether the estimate is currently considered healthy.
    fn healthy(&self) -> bool;

    /// Rotation from body frame to NED.
    fn rotation_body_to_ned(&self) -> Matrix3;

    /// Roll, pitch, yaw in radians.
    fn euler_angles(&self) -> Vector3;

    /// Origin of the local navigation frame.
    fn origin(&self) -> Option<Location>;

    /// Current vehicle position.
    fn position(&self) -> Option<Location>;

    /// Position relative to the origin, NED metres.
    fn relative_position_ned(&self) -> Option<Vector3>;

    /// Corrected body rates, rad/s.
    fn gyro(&self) -> Vector3;

    /// Earth-frame acceleration, m/s/s.
    fn accel_ef(&self) -> Vector3;
}
