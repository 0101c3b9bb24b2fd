//! Scenario tests for the full update cycle, driven by an in-memory host.

use super::{ArtifactStore, CycleOutcome, UpdateCycle, VersionMarker};
use crate::constants::NO_VERSION;
use crate::core::AppupError;
use crate::test_utils::{FakeHost, init_test_logging};
use tempfile::TempDir;

fn cycle_in(temp: &TempDir, host: FakeHost) -> UpdateCycle<FakeHost> {
    init_test_logging();
    let work_dir = temp.path().join("bin");
    let marker = VersionMarker::new(work_dir.join("version.txt"));
    let store = ArtifactStore::new(&work_dir, work_dir.join("app.AppImage"));
    UpdateCycle::new(host, marker, store, ".AppImage")
}

async fn marker_content(temp: &TempDir) -> Option<String> {
    tokio::fs::read_to_string(temp.path().join("bin").join("version.txt"))
        .await
        .ok()
}

// Scenario A: fresh environment, no working directory, no marker.
#[tokio::test]
async fn fresh_environment_installs_latest() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v3.1.0").with_asset("app-v3.1.0.AppImage", b"binary-v3.1.0");
    let cycle = cycle_in(&temp, host);

    let outcome = cycle.run().await.unwrap();
    assert_eq!(
        outcome,
        CycleOutcome::Updated { tag: "v3.1.0".to_string() }
    );

    assert!(cycle.store().exists());
    assert_eq!(marker_content(&temp).await.as_deref(), Some("v3.1.0"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(cycle.store().artifact_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o775);
    }
}

// Scenario B: marker matches the latest tag.
#[tokio::test]
async fn up_to_date_performs_no_download() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v3.1.0").with_asset("app-v3.1.0.AppImage", b"binary");
    let cycle = cycle_in(&temp, host);

    // Prior run installed v3.1.0.
    cycle.run().await.unwrap();
    let artifact_mtime = std::fs::metadata(cycle.store().artifact_path())
        .unwrap()
        .modified()
        .unwrap();

    let outcome = cycle.run().await.unwrap();
    assert_eq!(
        outcome,
        CycleOutcome::UpToDate { tag: "v3.1.0".to_string() }
    );

    // Exactly one download across both runs, artifact untouched by the second.
    assert_eq!(cycle.host().download_count(), 1);
    assert_eq!(marker_content(&temp).await.as_deref(), Some("v3.1.0"));
    let mtime_after = std::fs::metadata(cycle.store().artifact_path())
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(artifact_mtime, mtime_after);
}

// Scenario C: release exists but no asset carries the expected suffix.
#[tokio::test]
async fn missing_asset_is_fatal_and_modifies_nothing() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v3.1.0").with_asset("app-v3.1.0.tar.gz", b"tarball");
    let cycle = cycle_in(&temp, host);

    let err = cycle.run().await.unwrap_err();
    match err.downcast_ref::<AppupError>() {
        Some(AppupError::AssetNotFound { tag, suffix }) => {
            assert_eq!(tag, "v3.1.0");
            assert_eq!(suffix, ".AppImage");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(!cycle.store().exists());
    assert_eq!(marker_content(&temp).await, None);
}

#[tokio::test]
async fn stale_version_triggers_update() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v3.2.0").with_asset("app-v3.2.0.AppImage", b"binary-v3.2.0");
    let cycle = cycle_in(&temp, host);

    // Simulate a prior install of an older release.
    VersionMarker::new(temp.path().join("bin").join("version.txt"))
        .write("v3.1.0")
        .await
        .unwrap();
    tokio::fs::write(temp.path().join("bin").join("app.AppImage"), b"binary-v3.1.0")
        .await
        .unwrap();

    let outcome = cycle.run().await.unwrap();
    assert_eq!(
        outcome,
        CycleOutcome::Updated { tag: "v3.2.0".to_string() }
    );
    assert_eq!(marker_content(&temp).await.as_deref(), Some("v3.2.0"));
    let content = tokio::fs::read(cycle.store().artifact_path()).await.unwrap();
    assert_eq!(content, b"binary-v3.2.0");
}

#[tokio::test]
async fn idempotent_across_repeated_runs() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v1.0.0").with_asset("app.AppImage", b"payload");
    let cycle = cycle_in(&temp, host);

    cycle.run().await.unwrap();
    let first = tokio::fs::read(cycle.store().artifact_path()).await.unwrap();
    let first_marker = marker_content(&temp).await;

    cycle.run().await.unwrap();
    let second = tokio::fs::read(cycle.store().artifact_path()).await.unwrap();
    let second_marker = marker_content(&temp).await;

    assert_eq!(first, second);
    assert_eq!(first_marker, second_marker);
}

#[tokio::test]
async fn force_reinstalls_matching_version() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v1.0.0").with_asset("app.AppImage", b"payload");
    let cycle = cycle_in(&temp, host).force(true);

    cycle.run().await.unwrap();
    let outcome = cycle.run().await.unwrap();

    // Forced: second run downloads again despite matching tags.
    assert_eq!(outcome, CycleOutcome::Updated { tag: "v1.0.0".to_string() });
    assert_eq!(cycle.host().download_count(), 2);
}

#[tokio::test]
async fn failed_download_leaves_partial_file_and_old_marker() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v2.0.0")
        .with_asset("app.AppImage", b"full payload bytes")
        .with_failing_downloads();
    let cycle = cycle_in(&temp, host);

    VersionMarker::new(temp.path().join("bin").join("version.txt"))
        .write("v1.0.0")
        .await
        .unwrap();

    let err = cycle.run().await.unwrap_err();
    assert!(err.to_string().contains("simulated stream interruption"));

    // Partial file is left in place; marker still records the old version.
    assert!(cycle.store().exists());
    assert_eq!(marker_content(&temp).await.as_deref(), Some("v1.0.0"));

    // A subsequent successful run repairs the state.
    let host = FakeHost::new("v2.0.0").with_asset("app.AppImage", b"full payload bytes");
    let cycle = cycle_in(&temp, host);
    cycle.run().await.unwrap();
    let content = tokio::fs::read(cycle.store().artifact_path()).await.unwrap();
    assert_eq!(content, b"full payload bytes");
    assert_eq!(marker_content(&temp).await.as_deref(), Some("v2.0.0"));
}

#[tokio::test]
async fn check_reports_current_and_latest() {
    let temp = TempDir::new().unwrap();
    let host = FakeHost::new("v2.0.0").with_asset("app.AppImage", b"payload");
    let cycle = cycle_in(&temp, host);

    let (current, latest) = cycle.check().await.unwrap();
    assert_eq!(current, NO_VERSION);
    assert_eq!(latest, "v2.0.0");

    // Check never downloads.
    assert_eq!(cycle.host().download_count(), 0);
    assert!(!cycle.store().exists());
}
