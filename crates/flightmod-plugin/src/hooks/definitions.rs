//! Hook kinds and the typed handler entries registered for them.

use serde::{Deserialize, Serialize};

use crate::ffi::abi::{
    ACCEL_SAMPLE_VERSION, AHRS_STATE_VERSION, AccelSampleHookFn, AhrsUpdateHookFn,
    GYRO_SAMPLE_VERSION, GyroSampleHookFn, TimestampHookFn,
};

/// Closed set of events an external module may handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Fired when vehicle setup begins.
    SetupStart,
    /// Fired when vehicle setup has finished.
    SetupComplete,
    /// Fired after each attitude estimate update.
    AhrsUpdate,
    /// Fired for each raw gyroscope sample.
    GyroSample,
    /// Fired for each raw accelerometer sample.
    AccelSample,
}

impl HookKind {
    /// Number of hook kinds.
    pub const COUNT: usize = 5;

    /// Every hook kind, in registry order.
    pub const ALL: [HookKind; Self::COUNT] = [
        Self::SetupStart,
        Self::SetupComplete,
        Self::AhrsUpdate,
        Self::GyroSample,
        Self::AccelSample,
    ];

    /// Exported symbol name a module uses to implement this kind.
    pub fn symbol_name(self) -> &'static str {
        match self {
            Self::SetupStart => "hook_setup_start",
            Self::SetupComplete => "hook_setup_complete",
            Self::AhrsUpdate => "hook_AHRS_update",
            Self::GyroSample => "hook_gyro_sample",
            Self::AccelSample => "hook_accel_sample",
        }
    }

    /// Looks a kind up by its exact, case-sensitive symbol name.
    pub fn from_symbol(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol_name() == name)
    }

    /// Position of this kind in the registry.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Structure version of the snapshot passed to this kind's handlers,
    /// or `None` for timestamp-only kinds.
    pub fn snapshot_version(self) -> Option<u32> {
        match self {
            Self::SetupStart | Self::SetupComplete => None,
            Self::AhrsUpdate => Some(AHRS_STATE_VERSION),
            Self::GyroSample => Some(GYRO_SAMPLE_VERSION),
            Self::AccelSample => Some(ACCEL_SAMPLE_VERSION),
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol_name())
    }
}

/// One module's handler for one hook kind.
///
/// Each variant carries the only signature its kind accepts, so an entry can
/// never be invoked with the wrong argument type.
#[derive(Debug, Clone, Copy)]
pub enum HookFn {
    SetupStart(TimestampHookFn),
    SetupComplete(TimestampHookFn),
    AhrsUpdate(AhrsUpdateHookFn),
    GyroSample(GyroSampleHookFn),
    AccelSample(AccelSampleHookFn),
}

impl HookFn {
    /// The kind this handler is registered under.
    pub fn kind(&self) -> HookKind {
        match self {
            Self::SetupStart(_) => HookKind::SetupStart,
            Self::SetupComplete(_) => HookKind::SetupComplete,
            Self::AhrsUpdate(_) => HookKind::AhrsUpdate,
            Self::GyroSample(_) => HookKind::GyroSample,
            Self::AccelSample(_) => HookKind::AccelSample,
        }
    }

    /// Code address of the handler.
    pub fn address(&self) -> usize {
        match *self {
            Self::SetupStart(f) | Self::SetupComplete(f) => f as usize,
            Self::AhrsUpdate(f) => f as usize,
            Self::GyroSample(f) => f as usize,
            Self::AccelSample(f) => f as usize,
        }
    }
}
