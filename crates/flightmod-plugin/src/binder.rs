//! Module binder: opens one candidate and registers the hooks it exports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use flightmod_core::error::AppError;

use crate::hooks::definitions::HookKind;
use crate::hooks::registry::RegistryBuilder;
use crate::loader::{LoadedModule, ModuleLoader};

/// A module that contributed at least one hook.
///
/// Holds the module handle; registered handlers point into the module, so
/// it must stay alive for as long as the registry is used.
#[derive(Debug)]
pub struct BoundModule {
    /// Path the module was opened from.
    pub path: PathBuf,
    /// Hook kinds the module implements, in registry order.
    pub hooks: Vec<HookKind>,
    /// Open module handle.
    _handle: Box<dyn LoadedModule>,
}

/// Result of binding one candidate.
#[derive(Debug)]
pub enum BindOutcome {
    /// The module exported at least one hook and is retained.
    Bound(BoundModule),
    /// The module exported no hook and its handle was released.
    NoHooks,
    /// The file could not be opened as a module.
    OpenFailed {
        /// Loader error.
        error: AppError,
    },
}

/// Binds candidate files to hook registrations.
#[derive(Debug, Clone)]
pub struct ModuleBinder {
    /// Loader used to open candidates.
    loader: Arc<dyn ModuleLoader>,
}

impl ModuleBinder {
    /// Creates a binder using the given loader.
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self { loader }
    }

    /// Opens `path` and registers every hook it exports into `registry`.
    ///
    /// Failing to open the file is logged and reported in the outcome; it is
    /// never fatal to the scan.
    pub fn bind(&self, path: &Path, registry: &mut RegistryBuilder) -> BindOutcome {
        let handle = match self.loader.open(path) {
            Ok(handle) => handle,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to open module");
                return BindOutcome::OpenFailed { error };
            }
        };

        let mut hooks = Vec::new();
        for kind in HookKind::ALL {
            if let Some(hook) = handle.resolve(kind) {
                registry.register(hook);
                hooks.push(kind);
            }
        }

        if hooks.is_empty() {
            debug!(path = %path.display(), "Module exports no hooks, releasing");
            return BindOutcome::NoHooks;
        }

        BindOutcome::Bound(BoundModule {
            path: path.to_path_buf(),
            hooks,
            _handle: handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::definitions::HookFn;
    use crate::loader::StaticModuleLoader;

    unsafe extern "C" fn on_start(_time_us: u64) {}
    unsafe extern "C" fn on_complete(_time_us: u64) {
        std::hint::black_box(1);
    }

    fn binder(loader: StaticModuleLoader) -> (ModuleBinder, Arc<StaticModuleLoader>) {
        let loader = Arc::new(loader);
        (ModuleBinder::new(loader.clone()), loader)
    }

    #[test]
    fn test_open_failure_is_reported_not_fatal() {
        let (binder, _) = binder(StaticModuleLoader::new());
        let mut registry = RegistryBuilder::new();

        let outcome = binder.bind(Path::new("/m/broken.so"), &mut registry);
        assert!(matches!(outcome, BindOutcome::OpenFailed { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_module_without_hooks_is_released() {
        let (binder, loader) = binder(StaticModuleLoader::new().with_module("/m/empty.so", vec![]));
        let mut registry = RegistryBuilder::new();

        let outcome = binder.bind(Path::new("/m/empty.so"), &mut registry);
        assert!(matches!(outcome, BindOutcome::NoHooks));
        assert!(registry.is_empty());
        assert_eq!(loader.opened(), 1);
        assert_eq!(loader.live_handles(), 0);
    }

    #[test]
    fn test_each_exported_kind_gets_its_own_entry() {
        let (binder, loader) = binder(StaticModuleLoader::new().with_module(
            "/m/setup.so",
            vec![HookFn::SetupComplete(on_complete), HookFn::SetupStart(on_start)],
        ));
        let mut registry = RegistryBuilder::new();

        let outcome = binder.bind(Path::new("/m/setup.so"), &mut registry);
        let BindOutcome::Bound(module) = outcome else {
            panic!("module should bind");
        };
        assert_eq!(module.hooks, vec![HookKind::SetupStart, HookKind::SetupComplete]);
        assert_eq!(module.path, PathBuf::from("/m/setup.so"));
        assert_eq!(registry.len(HookKind::SetupStart), 1);
        assert_eq!(registry.len(HookKind::SetupComplete), 1);
        assert_eq!(loader.live_handles(), 1);

        drop(module);
        assert_eq!(loader.live_handles(), 0);
    }
}
