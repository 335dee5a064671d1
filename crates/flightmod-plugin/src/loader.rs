//! Module loaders: open candidate files and resolve typed hook symbols.
//!
//! [`LibraryLoader`] opens shared libraries with `libloading`.
//! [`StaticModuleLoader`] serves hook tables that are linked into the host
//! process, keyed by path, which is also how tests stand in for real modules.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use flightmod_core::error::{AppError, ErrorKind};
use flightmod_core::result::AppResult;

use crate::hooks::definitions::{HookFn, HookKind};

/// Opens candidate module files.
pub trait ModuleLoader: Send + Sync + std::fmt::Debug {
    /// Opens the module at `path`.
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>>;
}

/// An opened module. Dropping it releases the underlying handle.
pub trait LoadedModule: Send + Sync + std::fmt::Debug {
    /// Resolves the symbol for `kind` with that kind's signature.
    fn resolve(&self, kind: HookKind) -> Option<HookFn>;
}

/// Loads modules from shared libraries (.so / .dylib / .dll).
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryLoader;

impl LibraryLoader {
    /// Creates a new library loader.
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn open_library(path: &Path) -> Result<libloading::Library, libloading::Error> {
        use libloading::os::unix::{Library, RTLD_LOCAL, RTLD_NOW};

        // SAFETY: loading runs the module's initialisers; modules are trusted
        // by virtue of being placed in the configured directory.
        unsafe { Library::open(Some(path), RTLD_NOW | RTLD_LOCAL) }.map(Into::into)
    }

    #[cfg(not(unix))]
    fn open_library(path: &Path) -> Result<libloading::Library, libloading::Error> {
        // SAFETY: see the unix variant.
        unsafe { libloading::Library::new(path) }
    }
}

impl ModuleLoader for LibraryLoader {
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>> {
        let library = Self::open_library(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Plugin,
                format!(
                    "Failed to load module library '{}': {}",
                    path.display(),
                    error_chain(&e)
                ),
                e,
            )
        })?;

        Ok(Box::new(LibraryModule { library }))
    }
}

/// Joins an error with its sources, skipping text repeated by a wrapper.
///
/// On unix, libloading only displays "dlopen failed"; the `dlerror()`
/// reason is in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        current = e.source();
    }
    parts.join(": ")
}

/// A shared library kept mapped for as long as this value lives.
#[derive(Debug)]
pub struct LibraryModule {
    library: libloading::Library,
}

impl LibraryModule {
    /// Looks up `name` as a value of type `T`.
    ///
    /// # Safety
    ///
    /// `T` must be the real type of the exported symbol.
    unsafe fn symbol<T: Copy>(&self, name: &str) -> Option<T> {
        // SAFETY: forwarded to the caller.
        unsafe { self.library.get::<T>(name.as_bytes()) }
            .ok()
            .map(|symbol| *symbol)
    }
}

impl LoadedModule for LibraryModule {
    fn resolve(&self, kind: HookKind) -> Option<HookFn> {
        let name = kind.symbol_name();
        // SAFETY: each hook name is bound to exactly one signature by the
        // module ABI; a module exporting it with another signature is in
        // breach of that contract and cannot be detected here.
        unsafe {
            match kind {
                HookKind::SetupStart => self.symbol(name).map(HookFn::SetupStart),
                HookKind::SetupComplete => self.symbol(name).map(HookFn::SetupComplete),
                HookKind::AhrsUpdate => self.symbol(name).map(HookFn::AhrsUpdate),
                HookKind::GyroSample => self.symbol(name).map(HookFn::GyroSample),
                HookKind::AccelSample => self.symbol(name).map(HookFn::AccelSample),
            }
        }
    }
}

/// Serves in-process hook tables as if they were module files.
///
/// Paths that were never added fail to open, like a file that is not a
/// loadable module. The loader counts opens and live handles so callers can
/// check whether a bound module was retained or released.
#[derive(Debug, Default)]
pub struct StaticModuleLoader {
    /// Path → hooks that module exports.
    modules: HashMap<PathBuf, Vec<HookFn>>,
    /// Number of successful opens.
    opened: Arc<AtomicUsize>,
    /// Number of handles currently alive.
    live: Arc<AtomicUsize>,
}

impl StaticModuleLoader {
    /// Creates a loader with no modules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module at `path` exporting `hooks`.
    pub fn with_module(mut self, path: impl Into<PathBuf>, hooks: Vec<HookFn>) -> Self {
        self.modules.insert(path.into(), hooks);
        self
    }

    /// Number of successful opens so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of opened handles that have not been released.
    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>> {
        let hooks = self.modules.get(path).ok_or_else(|| {
            AppError::plugin(format!(
                "Failed to load module library '{}': not a loadable module",
                path.display()
            ))
        })?;

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(StaticModule {
            hooks: hooks.clone(),
            live: self.live.clone(),
        }))
    }
}

#[derive(Debug)]
struct StaticModule {
    hooks: Vec<HookFn>,
    live: Arc<AtomicUsize>,
}

impl LoadedModule for StaticModule {
    fn resolve(&self, kind: HookKind) -> Option<HookFn> {
        self.hooks.iter().copied().find(|hook| hook.kind() == kind)
    }
}

impl Drop for StaticModule {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
