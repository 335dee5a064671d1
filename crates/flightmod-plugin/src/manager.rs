//! Module manager: runs the bind phase and hands over a frozen host.
//!
//! [`ModuleManager`] is the only type that can add registrations. Calling
//! [`ModuleManager::finish`] consumes it and yields a [`ModuleHost`] whose
//! registry is immutable, so every dispatch happens after binding has
//! completed.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use flightmod_core::config::modules::ModuleConfig;
use flightmod_core::error::AppError;
use flightmod_core::result::AppResult;

use crate::binder::{BindOutcome, BoundModule, ModuleBinder};
use crate::clock::{Clock, MonotonicClock};
use crate::discovery::discover_modules;
use crate::hooks::definitions::HookKind;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::RegistryBuilder;
use crate::loader::{LibraryLoader, ModuleLoader};

/// Summary of a bind phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindReport {
    /// Directories scanned, in scan order.
    pub directories: Vec<String>,
    /// Number of candidate files examined.
    pub candidates: usize,
    /// Modules retained, with the hook symbols each exports.
    pub bound: Vec<BoundModuleReport>,
    /// Modules opened but released because they export no hook.
    pub no_hooks: Vec<String>,
    /// Candidates that failed to open.
    pub failures: Vec<BindFailure>,
    /// Hook symbol → number of registered handlers.
    pub handlers: BTreeMap<String, usize>,
}

/// One retained module in a [`BindReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BoundModuleReport {
    pub path: String,
    pub hooks: Vec<String>,
}

/// One candidate that could not be opened.
#[derive(Debug, Clone, Serialize)]
pub struct BindFailure {
    pub path: String,
    pub error: String,
}

/// Bind-phase state: discovers and binds modules.
#[derive(Debug)]
pub struct ModuleManager {
    /// Binder wrapping the module loader.
    binder: ModuleBinder,
    /// Registrations collected so far.
    registry: RegistryBuilder,
    /// Modules retained so far, in bind order.
    modules: Vec<BoundModule>,
    /// Running summary.
    report: BindReport,
    /// Clock handed to the dispatcher.
    clock: Arc<dyn Clock>,
}

impl ModuleManager {
    /// Creates a manager that opens modules with `loader`.
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            binder: ModuleBinder::new(loader),
            registry: RegistryBuilder::new(),
            modules: Vec::new(),
            report: BindReport::default(),
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Replaces the clock used to stamp snapshots.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Binds every candidate in `dir` whose name ends in `extension`.
    ///
    /// Returns the number of modules retained from this directory.
    pub fn scan_directory(&mut self, dir: &Path, extension: &str) -> usize {
        self.report.directories.push(dir.display().to_string());

        let before = self.modules.len();
        for path in discover_modules(dir, extension) {
            self.bind_path(&path);
        }
        self.modules.len() - before
    }

    /// Binds a single candidate. Returns whether the module was retained.
    pub fn bind_path(&mut self, path: &Path) -> bool {
        self.report.candidates += 1;

        match self.binder.bind(path, &mut self.registry) {
            BindOutcome::Bound(module) => {
                info!(
                    path = %module.path.display(),
                    hooks = ?module.hooks.iter().map(|k| k.symbol_name()).collect::<Vec<_>>(),
                    "Module bound"
                );
                self.report.bound.push(BoundModuleReport {
                    path: module.path.display().to_string(),
                    hooks: module
                        .hooks
                        .iter()
                        .map(|kind| kind.symbol_name().to_string())
                        .collect(),
                });
                self.modules.push(module);
                true
            }
            BindOutcome::NoHooks => {
                self.report.no_hooks.push(path.display().to_string());
                false
            }
            BindOutcome::OpenFailed { error } => {
                self.report.failures.push(BindFailure {
                    path: path.display().to_string(),
                    error: error.to_string(),
                });
                false
            }
        }
    }

    /// Ends the bind phase and returns the dispatch-ready host.
    pub fn finish(self) -> ModuleHost {
        let registry = self.registry.freeze();
        let mut report = self.report;

        report.handlers = HookKind::ALL
            .into_iter()
            .map(|kind| (kind.symbol_name().to_string(), registry.len(kind)))
            .collect();

        info!(
            candidates = report.candidates,
            bound = report.bound.len(),
            failed = report.failures.len(),
            handlers = registry.total(),
            "Module bind phase complete"
        );

        ModuleHost {
            dispatcher: HookDispatcher::with_clock(registry, self.clock),
            modules: self.modules,
            report,
        }
    }
}

/// Dispatch-phase state: frozen registry plus the modules it points into.
#[derive(Debug)]
pub struct ModuleHost {
    /// Declared before `modules` so handlers are dropped before the code
    /// they point into is unmapped.
    dispatcher: HookDispatcher,
    /// Retained module handles.
    modules: Vec<BoundModule>,
    /// Bind phase summary.
    report: BindReport,
}

impl ModuleHost {
    /// Runs the bind phase described by `config` with the shared-library loader.
    pub fn init(config: &ModuleConfig) -> Self {
        Self::init_with_loader(config, Arc::new(LibraryLoader::new()))
    }

    /// Runs the bind phase described by `config` with an explicit loader.
    pub fn init_with_loader(config: &ModuleConfig, loader: Arc<dyn ModuleLoader>) -> Self {
        let mut manager = ModuleManager::new(loader);
        if config.enabled {
            manager.scan_directory(&config.directory_path(), &config.extension);
        } else {
            info!("External modules disabled");
        }
        manager.finish()
    }

    /// A host with no modules; every dispatch is a no-op.
    pub fn empty() -> Self {
        ModuleManager::new(Arc::new(LibraryLoader::new())).finish()
    }

    /// Returns the hook dispatcher for firing hooks.
    pub fn dispatcher(&self) -> &HookDispatcher {
        &self.dispatcher
    }

    /// Retained modules, in bind order.
    pub fn modules(&self) -> &[BoundModule] {
        &self.modules
    }

    /// Summary of the bind phase.
    pub fn report(&self) -> &BindReport {
        &self.report
    }
}

static GLOBAL_HOST: OnceLock<ModuleHost> = OnceLock::new();

/// Installs `host` as the process-wide module host.
///
/// Can succeed only once per process; modules are never unloaded.
pub fn install(host: ModuleHost) -> AppResult<&'static ModuleHost> {
    if GLOBAL_HOST.set(host).is_err() {
        warn!("Module host already installed, ignoring second host");
        return Err(AppError::conflict("Module host already installed"));
    }
    GLOBAL_HOST
        .get()
        .ok_or_else(|| AppError::internal("Module host missing after install"))
}

/// The process-wide module host, if one has been installed.
pub fn global() -> Option<&'static ModuleHost> {
    GLOBAL_HOST.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::definitions::HookFn;
    use crate::loader::StaticModuleLoader;

    unsafe extern "C" fn on_start(_time_us: u64) {}

    #[test]
    fn test_disabled_config_binds_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("a.so"), b"").expect("write");
        let loader = Arc::new(
            StaticModuleLoader::new()
                .with_module(temp.path().join("a.so"), vec![HookFn::SetupStart(on_start)]),
        );
        let config = ModuleConfig {
            enabled: false,
            directory: temp.path().display().to_string(),
            ..Default::default()
        };

        let host = ModuleHost::init_with_loader(&config, loader.clone());
        assert!(host.modules().is_empty());
        assert_eq!(loader.opened(), 0);
        assert_eq!(host.report().candidates, 0);
    }

    #[test]
    fn test_report_lists_every_scanned_directory() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        std::fs::write(first.path().join("a.so"), b"").expect("write");
        std::fs::write(second.path().join("b.so"), b"").expect("write");

        let mut manager = ModuleManager::new(Arc::new(
            StaticModuleLoader::new()
                .with_module(first.path().join("a.so"), vec![HookFn::SetupStart(on_start)])
                .with_module(second.path().join("b.so"), vec![HookFn::SetupStart(on_start)]),
        ));
        assert_eq!(manager.scan_directory(first.path(), ".so"), 1);
        assert_eq!(manager.scan_directory(second.path(), ".so"), 1);

        let host = manager.finish();
        assert_eq!(
            host.report().directories,
            vec![
                first.path().display().to_string(),
                second.path().display().to_string(),
            ]
        );
        assert_eq!(host.report().candidates, 2);
        assert_eq!(host.report().handlers["hook_setup_start"], 2);
    }

    #[test]
    fn test_report_counts_outcomes() {
        let mut manager = ModuleManager::new(Arc::new(
            StaticModuleLoader::new()
                .with_module("/m/a.so", vec![HookFn::SetupStart(on_start)])
                .with_module("/m/empty.so", vec![]),
        ));
        assert!(manager.bind_path(Path::new("/m/a.so")));
        assert!(!manager.bind_path(Path::new("/m/empty.so")));
        assert!(!manager.bind_path(Path::new("/m/garbage.so")));

        let host = manager.finish();
        let report = host.report();
        assert_eq!(report.candidates, 3);
        assert_eq!(report.bound.len(), 1);
        assert_eq!(report.bound[0].hooks, vec!["hook_setup_start".to_string()]);
        assert_eq!(report.no_hooks, vec!["/m/empty.so".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("/m/garbage.so"));
        assert_eq!(report.handlers["hook_setup_start"], 1);
        assert_eq!(report.handlers["hook_AHRS_update"], 0);
    }

    #[test]
    fn test_empty_host_has_no_handlers() {
        let host = ModuleHost::empty();
        assert_eq!(host.dispatcher().registry().total(), 0);
        host.dispatcher().call_setup_start();
    }
}
