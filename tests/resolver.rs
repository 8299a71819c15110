mod common;

use std::path::PathBuf;

use tempfile::tempdir;
use watchrun::build::Resolver;
use watchrun::config::{BuildTool, Config};
use watchrun::errors::BuildError;

#[tokio::test]
async fn resolve_joins_manifest_modules_onto_module_root() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("go.sum");
    std::fs::write(&manifest, "modA v1.0 abc123\nmodB v2.0 def456\n\n").unwrap();
    let script = common::write_script(dir.path(), "build.sh", "exit 0");
    let tool = common::scripted_tool(&script, &dir.path().join("main"), &manifest);

    let base = PathBuf::from("/deps");
    let resolver = Resolver::new(tool, base.clone());
    let deps = resolver.resolve(&PathBuf::from("main.go")).await.unwrap();

    assert_eq!(deps, vec![base.join("modA"), base.join("modB")]);
}

#[tokio::test]
async fn failing_build_is_a_build_failure() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("go.sum");
    std::fs::write(&manifest, "modA v1.0 abc123\n").unwrap();
    let script = common::write_script(dir.path(), "build.sh", "exit 1");
    let tool = common::scripted_tool(&script, &dir.path().join("main"), &manifest);

    let resolver = Resolver::new(tool, PathBuf::from("/deps"));
    let err = resolver.resolve(&PathBuf::from("main.go")).await.unwrap_err();

    assert!(matches!(err, BuildError::Failed { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_manifest_is_a_manifest_error() {
    let dir = tempdir().unwrap();
    let script = common::write_script(dir.path(), "build.sh", "exit 0");
    let tool = common::scripted_tool(&script, &dir.path().join("main"), &dir.path().join("no.sum"));

    let resolver = Resolver::new(tool, PathBuf::from("/deps"));
    let err = resolver.resolve(&PathBuf::from("main.go")).await.unwrap_err();

    assert!(matches!(err, BuildError::Manifest { .. }), "got {err:?}");
}

#[test]
fn missing_module_root_env_is_a_startup_fault() {
    let cfg = Config {
        root: PathBuf::from("."),
        recursive: true,
        entry: PathBuf::from("main.go"),
        build: BuildTool {
            module_root_env: "WATCHRUN_SURELY_UNSET_ENV_VAR".to_string(),
            ..BuildTool::default()
        },
    };

    let err = Resolver::from_config(&cfg).unwrap_err();
    assert!(matches!(err, BuildError::MissingModuleRoot(_)), "got {err:?}");
}
