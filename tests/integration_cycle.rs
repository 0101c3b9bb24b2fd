//! End-to-end tests wiring the config layer to the update cycle and the
//! launcher through the public API, with an in-memory release host.

use appup_cli::config::AppConfig;
use appup_cli::test_utils::{FakeHost, init_test_logging};
use appup_cli::updater::{ArtifactStore, CycleOutcome, UpdateCycle, VersionMarker, launch_detached};
use tempfile::TempDir;

fn config_in(temp: &TempDir) -> AppConfig {
    AppConfig {
        repo_owner: "acme".to_string(),
        repo_name: "widget".to_string(),
        asset_suffix: ".AppImage".to_string(),
        work_dir: Some(temp.path().join("bin")),
        artifact_name: None,
        ..AppConfig::default()
    }
}

fn cycle_for(config: &AppConfig, host: FakeHost) -> UpdateCycle<FakeHost> {
    init_test_logging();
    UpdateCycle::new(
        host,
        VersionMarker::new(config.marker_path().unwrap()),
        ArtifactStore::new(config.work_dir().unwrap(), config.artifact_path().unwrap()),
        &config.asset_suffix,
    )
}

#[tokio::test]
async fn config_paths_flow_through_the_cycle() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    let host = FakeHost::new("v1.0.0").with_asset("widget-v1.0.0.AppImage", b"widget bytes");
    let cycle = cycle_for(&config, host);

    let outcome = cycle.run().await.unwrap();
    assert_eq!(outcome, CycleOutcome::Updated { tag: "v1.0.0".to_string() });

    // Artifact name derives from repo_name + suffix.
    let artifact = temp.path().join("bin").join("widget.AppImage");
    assert_eq!(std::fs::read(&artifact).unwrap(), b"widget bytes");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("bin").join("version.txt")).unwrap(),
        "v1.0.0"
    );
}

#[tokio::test]
async fn second_run_skips_network_download() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);

    let host = FakeHost::new("v1.0.0").with_asset("widget-v1.0.0.AppImage", b"widget bytes");
    let cycle = cycle_for(&config, host);
    cycle.run().await.unwrap();
    cycle.run().await.unwrap();

    assert_eq!(cycle.host().query_count(), 2);
    assert_eq!(cycle.host().download_count(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn installed_artifact_can_be_launched() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);

    // A shell script stands in for the application binary.
    let host =
        FakeHost::new("v1.0.0").with_asset("widget-v1.0.0.AppImage", b"#!/bin/sh\nexit 0\n");
    let cycle = cycle_for(&config, host);
    cycle.run().await.unwrap();

    launch_detached(cycle.store().artifact_path()).unwrap();
}

#[tokio::test]
async fn launch_on_fresh_environment_without_install_fails() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);

    let err = launch_detached(&config.artifact_path().unwrap()).unwrap_err();
    assert!(err.to_string().contains("nothing to launch"));
}
