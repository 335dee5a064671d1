//! Prelude for convenient imports.

pub use crate::clock::{Clock, MonotonicClock};
pub use crate::estimator::AttitudeEstimator;
pub use crate::ffi::abi::{
    AccelSample, AhrsState, AhrsStatus, GyroSample, OriginState, PositionState, Versioned,
};
pub use crate::hooks::definitions::{HookFn, HookKind};
pub use crate::hooks::dispatcher::HookDispatcher;
pub use crate::loader::{LibraryLoader, ModuleLoader, StaticModuleLoader};
pub use crate::manager::{ModuleHost, ModuleManager};
pub use crate::math::{Location, Matrix3, Quaternion, Vector3};
