//! # flightmod-plugin-sdk
//!
//! SDK for building external hook modules.
//!
//! A module is a `cdylib` that exports one or more of the well-known hook
//! symbols. [`export_hook!`] generates those exports with the signatures the
//! host expects.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flightmod_plugin_sdk::prelude::*;
//!
//! fn on_ahrs(state: &AhrsState) {
//!     if state.status == AhrsStatus::Healthy && state.origin.initialised {
//!         // ...
//!     }
//! }
//!
//! flightmod_plugin_sdk::export_hook!(ahrs_update => on_ahrs);
//! ```

pub mod macros;

/// Prelude for convenient imports.
pub mod prelude {
    pub use flightmod_plugin::ffi::abi::{
        ACCEL_SAMPLE_VERSION, AHRS_STATE_VERSION, AccelSample, AhrsState, AhrsStatus,
        GYRO_SAMPLE_VERSION, GyroSample, OriginState, PositionState, Versioned,
    };
    pub use flightmod_plugin::ffi::safety::snapshot_ref;
    pub use flightmod_plugin::hooks::definitions::HookKind;
}
