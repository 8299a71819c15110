use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use watchrun::engine::RuntimeEvent;
use watchrun::errors::WatchError;
use watchrun::watch::build_watch_set;

#[tokio::test]
async fn non_recursive_root_registers_only_the_root() {
    let project = tempdir().unwrap();
    fs::create_dir(project.path().join("pkg")).unwrap();

    let dep = tempdir().unwrap();
    fs::create_dir(dep.path().join("nested")).unwrap();

    let (tx, _rx) = mpsc::channel::<RuntimeEvent>(8);
    let handle =
        build_watch_set(project.path(), &[dep.path().to_path_buf()], false, tx).unwrap();

    let root = project.path().canonicalize().unwrap();
    let dirs = handle.dirs();

    // Root alone for the project, dep tree in full.
    assert_eq!(dirs.len(), 3, "got {dirs:?}");
    assert!(dirs.contains(&root));
    assert!(!dirs.iter().any(|d| d.ends_with("pkg")));
    assert!(dirs.iter().any(|d| d == dep.path()));
    assert!(dirs.iter().any(|d| d.ends_with("nested")));
}

#[tokio::test]
async fn recursive_root_registers_the_whole_subtree() {
    let project = tempdir().unwrap();
    fs::create_dir_all(project.path().join("pkg").join("inner")).unwrap();

    let (tx, _rx) = mpsc::channel::<RuntimeEvent>(8);
    let handle = build_watch_set(project.path(), &[], true, tx).unwrap();

    let dirs = handle.dirs();
    assert_eq!(dirs.len(), 3, "got {dirs:?}");
    assert!(dirs.iter().any(|d| d.ends_with("pkg")));
    assert!(dirs.iter().any(|d| d.ends_with("inner")));
}

#[tokio::test]
async fn missing_dependency_directory_fails_the_whole_build() {
    let project = tempdir().unwrap();
    let gone = project.path().join("never-created");

    let (tx, _rx) = mpsc::channel::<RuntimeEvent>(8);
    let err = build_watch_set(project.path(), &[gone], true, tx).unwrap_err();

    assert!(matches!(err, WatchError::Walk { .. }), "got {err:?}");
}

#[tokio::test]
async fn file_writes_are_forwarded_as_source_changes() {
    let project = tempdir().unwrap();

    let (tx, mut rx) = mpsc::channel::<RuntimeEvent>(8);
    let _handle = build_watch_set(project.path(), &[], true, tx).unwrap();

    fs::write(project.path().join("main.go"), "package main\n").unwrap();

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .expect("channel closed");

    match event {
        RuntimeEvent::SourceChanged { path } => {
            assert!(path.ends_with("main.go"), "got {path:?}");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
