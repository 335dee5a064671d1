//! Convenience macros for module development.

/// Exports a hook entry point with the exact symbol name and signature the
/// host resolves.
///
/// Timestamp kinds (`setup_start`, `setup_complete`) take a handler
/// `fn(u64)`. Snapshot kinds (`ahrs_update`, `gyro_sample`, `accel_sample`)
/// take a handler `fn(&Snapshot)`; the generated entry point declines null
/// pointers and snapshot layouts this build does not understand.
///
/// # Example
/// ```rust,ignore
/// use flightmod_plugin_sdk::prelude::*;
///
/// fn on_gyro(sample: &GyroSample) {
///     // ...
/// }
///
/// flightmod_plugin_sdk::export_hook!(gyro_sample => on_gyro);
/// ```
#[macro_export]
macro_rules! export_hook {
    (setup_start => $handler:path) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn hook_setup_start(time_us: u64) {
            $handler(time_us)
        }
    };
    (setup_complete => $handler:path) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn hook_setup_complete(time_us: u64) {
            $handler(time_us)
        }
    };
    (ahrs_update => $handler:path) => {
        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub unsafe extern "C" fn hook_AHRS_update(state: *const $crate::prelude::AhrsState) {
            // SAFETY: the host passes a pointer valid for the duration of the call.
            if let Some(state) = unsafe { $crate::prelude::snapshot_ref(state) } {
                $handler(state)
            }
        }
    };
    (gyro_sample => $handler:path) => {
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn hook_gyro_sample(sample: *const $crate::prelude::GyroSample) {
            // SAFETY: the host passes a pointer valid for the duration of the call.
            if let Some(sample) = unsafe { $crate::prelude::snapshot_ref(sample) } {
                $handler(sample)
            }
        }
    };
    (accel_sample => $handler:path) => {
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn hook_accel_sample(sample: *const $crate::prelude::AccelSample) {
            // SAFETY: the host passes a pointer valid for the duration of the call.
            if let Some(sample) = unsafe { $crate::prelude::snapshot_ref(sample) } {
                $handler(sample)
            }
        }
    };
}
