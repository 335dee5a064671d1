//! Host lifecycle: bind report and the process-wide install slot.

mod common;

use std::sync::Arc;

use flightmod_core::error::ErrorKind;
use flightmod_plugin::manager;
use flightmod_plugin::prelude::*;

use common::{Call, a_setup_start, take_calls};

#[test]
fn test_bind_report_serializes() {
    let mut bind_phase = ModuleManager::new(Arc::new(
        StaticModuleLoader::new().with_module("/opt/modules/a.so", vec![HookFn::SetupStart(a_setup_start)]),
    ));
    bind_phase.bind_path(std::path::Path::new("/opt/modules/a.so"));
    bind_phase.bind_path(std::path::Path::new("/opt/modules/z.so"));
    let host = bind_phase.finish();

    let json = serde_json::to_value(host.report()).expect("serialize");
    assert_eq!(json["candidates"], 2);
    assert_eq!(json["bound"][0]["path"], "/opt/modules/a.so");
    assert_eq!(json["bound"][0]["hooks"][0], "hook_setup_start");
    assert_eq!(json["failures"][0]["path"], "/opt/modules/z.so");
    assert_eq!(json["handlers"]["hook_setup_start"], 1);
    assert_eq!(json["handlers"]["hook_gyro_sample"], 0);
}

#[test]
fn test_global_host_installs_once() {
    let mut bind_phase = ModuleManager::new(Arc::new(
        StaticModuleLoader::new().with_module("/g/a.so", vec![HookFn::SetupStart(a_setup_start)]),
    ));
    bind_phase.bind_path(std::path::Path::new("/g/a.so"));

    let installed = manager::install(bind_phase.finish()).expect("first install");
    assert_eq!(installed.modules().len(), 1);

    let again = manager::install(ModuleHost::empty()).expect_err("second install");
    assert_eq!(again.kind, ErrorKind::Conflict);

    let global = manager::global().expect("installed");
    take_calls();
    global.dispatcher().call_setup_start();
    assert!(matches!(take_calls().as_slice(), [Call::Start { module: "a", .. }]));
}
