//! Content above the threshold goes to disk only with consent.

use crate::common::*;
use xzlog::engine::report::offload_prompt;
use xzlog::prelude::*;

fn small_viewer() -> Viewer {
    Viewer::builder().threshold_bytes(8).build().unwrap()
}

#[tokio::test]
async fn accepted_offload_writes_sibling_without_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let text = b"a log line that is longer than eight bytes\n";
    let path = write(dir.path(), "app.log.xz", &xz(text));
    let viewer = small_viewer();
    let display = Recorder::default();
    let consent = Scripted::new(&[Consent::Proceed]);

    let outcome = viewer.open(&path, &display, &consent).await.unwrap();

    let target = dir.path().join("app.log");
    assert_eq!(
        outcome,
        Outcome::Offloaded {
            path: target.clone(),
            bytes: text.len() as u64
        }
    );
    assert_eq!(std::fs::read(&target).unwrap(), text);
    assert_eq!(consent.kinds(), vec![PromptKind::Offload]);
    assert!(display.shown.lock().is_empty());
    assert_eq!(display.infos(), vec!["Decompressed to app.log".to_string()]);
    assert_eq!(viewer.registry().live_count(), 0);
}

#[tokio::test]
async fn offload_prompt_reports_size_in_mb() {
    let dir = tempfile::tempdir().unwrap();
    let text = vec![b'x'; 3 * 1024 * 1024];
    let path = write(dir.path(), "big.log.xz", &xz(&text));
    let viewer = Viewer::builder().threshold_bytes(1024).build().unwrap();
    let consent = Scripted::new(&[Consent::Cancel]);

    viewer
        .open(&path, &Recorder::default(), &consent)
        .await
        .unwrap();

    assert_eq!(
        consent.prompts.lock()[0].message,
        "File is 3MB. Decompress to disk instead of opening?"
    );
}

#[tokio::test]
async fn declined_offload_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.log.xz", &xz(b"0123456789abcdef"));
    let viewer = small_viewer();
    let display = Recorder::default();

    let outcome = viewer
        .open(&path, &display, &Scripted::new(&[Consent::Cancel]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Cancelled {
            reason: CancelReason::OffloadDeclined
        }
    );
    assert!(!dir.path().join("app.log").exists());
    assert!(display.shown.lock().is_empty());
    assert!(display.notices.lock().is_empty());
    assert_eq!(viewer.registry().live_count(), 0);
}

#[tokio::test]
async fn declined_overwrite_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.log.xz", &xz(b"fresh content, longer"));
    let existing = write(dir.path(), "app.log", b"hand edited notes");
    let viewer = small_viewer();
    let consent = Scripted::new(&[Consent::Proceed, Consent::Cancel]);

    let outcome = viewer
        .open(&path, &Recorder::default(), &consent)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Cancelled {
            reason: CancelReason::OverwriteDeclined
        }
    );
    assert_eq!(std::fs::read(&existing).unwrap(), b"hand edited notes");
    assert_eq!(consent.kinds(), vec![PromptKind::Offload, PromptKind::Overwrite]);
    assert_eq!(
        consent.prompts.lock()[1].message,
        "app.log already exists. Overwrite?"
    );
    assert_eq!(viewer.registry().live_count(), 0);
    // source and the untouched target only
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn accepted_overwrite_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.log.xz", &xz(b"fresh content, longer"));
    let existing = write(dir.path(), "app.log", b"stale");
    let consent = Scripted::new(&[Consent::Proceed, Consent::Proceed]);

    small_viewer()
        .open(&path, &Recorder::default(), &consent)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&existing).unwrap(), b"fresh content, longer");
}

#[tokio::test]
async fn container_offload_writes_tar_stream() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = tar(&[("a.log", b"first entry "), ("b.log", b"second entry")]);
    let path = write(dir.path(), "bundle.tar.xz", &xz(&bundle));
    let consent = Scripted::new(&[Consent::Proceed]);

    let outcome = small_viewer()
        .open(&path, &Recorder::default(), &consent)
        .await
        .unwrap();

    let target = dir.path().join("bundle.tar");
    assert_eq!(
        outcome,
        Outcome::Offloaded {
            path: target.clone(),
            bytes: bundle.len() as u64
        }
    );
    assert_eq!(std::fs::read(&target).unwrap(), bundle);
    // The prompt sizes the tar stream that was written, not the joined text
    assert_eq!(
        consent.prompts.lock()[0].message,
        offload_prompt(bundle.len() as u64)
    );
}

#[tokio::test]
async fn binding_stays_pending_while_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.log.xz", &xz(b"0123456789abcdef"));
    let viewer = small_viewer();
    let consent = Scripted::new(&[Consent::Cancel]).watching(viewer.registry(), &path);

    viewer
        .open(&path, &Recorder::default(), &consent)
        .await
        .unwrap();

    assert_eq!(*consent.seen_status.lock(), vec![BindingStatus::Pending]);
    assert_eq!(viewer.registry().status(&path), BindingStatus::Closed);
}
