//! Content at or below the threshold reaches the display surface.

use crate::common::*;
use xzlog::prelude::*;

#[tokio::test]
async fn single_stream_displayed_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let text = b"2024-01-01 INFO start\n2024-01-01 INFO stop\n";
    let path = write(dir.path(), "app.log.xz", &xz(text));
    let viewer = Viewer::new();
    let display = Recorder::default();
    let consent = Scripted::new(&[]);

    let outcome = viewer.open(&path, &display, &consent).await.unwrap();

    assert!(matches!(outcome, Outcome::Displayed { bytes, .. } if bytes == text.len() as u64));
    assert_eq!(display.texts(), vec![String::from_utf8(text.to_vec()).unwrap()]);
    assert!(consent.prompts.lock().is_empty());
    assert!(display.notices.lock().is_empty());
}

#[tokio::test]
async fn container_entries_concatenated_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = tar(&[("a.log", b"abc"), ("b.log", b"def")]);
    let path = write(dir.path(), "bundle.tar.xz", &xz(&bundle));
    let viewer = Viewer::new();
    let display = Recorder::default();

    let outcome = viewer
        .open(&path, &display, &Scripted::new(&[]))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Displayed { bytes: 6, .. }));
    assert_eq!(display.texts(), vec!["abcdef".to_string()]);
}

#[tokio::test]
async fn empty_container_displays_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "empty.tar.xz", &xz(&tar(&[])));
    let display = Recorder::default();

    let outcome = Viewer::new()
        .open(&path, &display, &Scripted::new(&[]))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Displayed { bytes: 0, .. }));
    assert_eq!(display.texts(), vec![String::new()]);
}

#[tokio::test]
async fn zstd_sources_decode() {
    let dir = tempfile::tempdir().unwrap();
    let single = write(dir.path(), "app.log.zst", &zst(b"zstd line\n"));
    let bundle = write(
        dir.path(),
        "bundle.tar.zst",
        &zst(&tar(&[("x", b"one "), ("y", b"two")])),
    );
    let viewer = Viewer::new();
    let display = Recorder::default();
    let consent = Scripted::new(&[]);

    viewer.open(&single, &display, &consent).await.unwrap();
    viewer.open(&bundle, &display, &consent).await.unwrap();

    assert_eq!(
        display.texts(),
        vec!["zstd line\n".to_string(), "one two".to_string()]
    );
}

#[tokio::test]
async fn threshold_equal_to_length_is_inline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "edge.log.xz", &xz(b"0123456789"));
    let viewer = Viewer::builder().threshold_bytes(10).build().unwrap();
    let display = Recorder::default();
    let consent = Scripted::new(&[Consent::Proceed]);

    let outcome = viewer.open(&path, &display, &consent).await.unwrap();

    assert!(matches!(outcome, Outcome::Displayed { bytes: 10, .. }));
    assert!(consent.prompts.lock().is_empty());
    assert!(!dir.path().join("edge.log").exists());
}

#[tokio::test]
async fn view_is_bound_to_source_and_closed_after() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.log.xz", &xz(b"x"));
    let viewer = Viewer::new();
    let display = Recorder::default();

    let outcome = viewer
        .open(&path, &display, &Scripted::new(&[]))
        .await
        .unwrap();

    let shown = display.shown.lock();
    let (binding, _) = &shown[0];
    assert_eq!(binding.source_path, path);
    assert_eq!(binding.status, BindingStatus::Open);
    assert_eq!(
        xzlog::source_path_for_view(&binding.view_uri).as_deref(),
        Some(path.as_path())
    );
    assert!(matches!(outcome, Outcome::Displayed { view_id, .. } if view_id == binding.view_id));
    assert_eq!(viewer.registry().status(&path), BindingStatus::Closed);
}

#[tokio::test]
async fn lossy_text_for_binary_entries() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = tar(&[("bin", &[0x66, 0xff, 0x6f][..]), ("txt", b"ok")]);
    let path = write(dir.path(), "mixed.tar.xz", &xz(&bundle));
    let display = Recorder::default();

    Viewer::new()
        .open(&path, &display, &Scripted::new(&[]))
        .await
        .unwrap();

    assert_eq!(display.texts(), vec!["f\u{fffd}ook".to_string()]);
}

#[tokio::test]
async fn pax_global_header_is_not_displayed() {
    let dir = tempfile::tempdir().unwrap();
    let mut builder = tar::Builder::new(Vec::new());
    let pax = b"52 comment=0123456789abcdef0123456789abcdef01234567\n";
    let mut header = tar::Header::new_ustar();
    header.set_entry_type(tar::EntryType::XGlobalHeader);
    header.set_size(pax.len() as u64);
    builder
        .append_data(&mut header, "pax_global_header", &pax[..])
        .unwrap();
    let mut header = tar::Header::new_gnu();
    header.set_size(5);
    builder
        .append_data(&mut header, "app.log", &b"hello"[..])
        .unwrap();
    let path = write(dir.path(), "b.tar.xz", &xz(&builder.into_inner().unwrap()));
    let display = Recorder::default();

    Viewer::new()
        .open(&path, &display, &Scripted::new(&[]))
        .await
        .unwrap();

    assert_eq!(display.texts(), vec!["hello".to_string()]);
    assert_eq!(Viewer::read_text(&path).unwrap(), "hello");
}
