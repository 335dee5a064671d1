//! FFI safety wrappers for the module side of the ABI.

use super::abi::Versioned;

/// Borrows a snapshot handed across the ABI.
///
/// Returns `None` for a null pointer or for a layout version other than the
/// one this build understands, so a module built against an older or newer
/// host declines the call instead of misreading fields.
///
/// # Safety
///
/// A non-null `ptr` must point to a readable value whose leading
/// `structure_version` field is initialised, and the value must outlive `'a`.
pub unsafe fn snapshot_ref<'a, T: Versioned>(ptr: *const T) -> Option<&'a T> {
    // SAFETY: the caller guarantees `ptr` is null or valid for `'a`.
    let snapshot = unsafe { ptr.as_ref() }?;
    snapshot.is_current().then_some(snapshot)
}
