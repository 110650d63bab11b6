//! Library-level integration tests for the sync pipeline
//!
//! Exercise the full coordinator through the public API using local-host
//! repositories, which never touch git or the network.

use static_sync::config;
use static_sync::coordinator;
use static_sync::git::SystemGit;
use static_sync::sync::SyncAction;
use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn local_config(source: &Path) -> config::Config {
    config::parse(&format!(
        r#"
repos:
  {}:
    host: local
    file:
      /lib/widget.js: /vendor/widget.js
      /img/: /static/img/
"#,
        source.display()
    ))
    .unwrap()
}

#[test]
fn test_local_pipeline_distributes_files_and_directories() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("shared");
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    write(&source.join("lib/widget.js"), "var widget = 1;\n");
    write(&source.join("img/logo.png"), "png-bytes");
    write(&source.join("img/.DS_Store"), "junk");

    let cfg = local_config(&source);
    let git = SystemGit::default();
    let report = coordinator::sync_all(&cfg, &project, &git, &[]).unwrap();

    assert!(report.all_succeeded());
    let summary = report.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.action, SyncAction::LocalOnly);
    assert_eq!(summary.stats.copied, 2);

    assert_eq!(
        fs::read_to_string(project.join("vendor/widget.js")).unwrap(),
        "var widget = 1;\n"
    );
    assert!(project.join("static/img/logo.png").exists());
    assert!(!project.join("static/img/.DS_Store").exists());
}

#[test]
fn test_rerun_is_idempotent_and_quiet() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("shared");
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    write(&source.join("lib/widget.js"), "var widget = 1;\n");
    write(&source.join("img/logo.png"), "png-bytes");

    let cfg = local_config(&source);
    let git = SystemGit::default();

    coordinator::sync_all(&cfg, &project, &git, &[]).unwrap();
    let second = coordinator::sync_all(&cfg, &project, &git, &[]).unwrap();

    let summary = second.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.stats.copied, 0);
    assert_eq!(summary.stats.ignored, 0);
    assert_eq!(summary.stats.unchanged, 2);
}

#[test]
fn test_hand_edited_file_is_left_alone() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("shared");
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    write(&source.join("lib/widget.js"), "var widget = 1;\n");
    write(&source.join("img/logo.png"), "png-bytes");

    let cfg = local_config(&source);
    let git = SystemGit::default();
    coordinator::sync_all(&cfg, &project, &git, &[]).unwrap();

    // Edit the distributed file; its mtime moves past the source's.
    std::thread::sleep(std::time::Duration::from_millis(20));
    let edited = "var widget = 1;\n// local override\n";
    fs::write(project.join("vendor/widget.js"), edited).unwrap();

    let report = coordinator::sync_all(&cfg, &project, &git, &[]).unwrap();
    let summary = report.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.stats.ignored, 1);
    assert_eq!(
        fs::read_to_string(project.join("vendor/widget.js")).unwrap(),
        edited
    );
}

#[test]
fn test_allow_list_restricts_distribution() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("shared");
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    write(&source.join("lib/widget.js"), "js");
    write(&source.join("img/logo.png"), "png");

    let cfg = local_config(&source);
    let git = SystemGit::default();
    let report =
        coordinator::sync_all(&cfg, &project, &git, &["*.js".to_string()]).unwrap();

    let summary = report.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.stats.copied, 1);
    assert_eq!(summary.stats.filtered, 1);
    assert!(project.join("vendor/widget.js").exists());
    assert!(!project.join("static/img/logo.png").exists());
}
