mod common;

use common::{Call, FakeApi, TOKEN};
use mymedia::{
    http::ApiError,
    upload::{UploadDialog, UploadOutcome},
};

fn write_files(dir: &std::path::Path, names: &[&str]) -> Vec<std::path::PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, format!("audio {name}")).unwrap();
            path
        })
        .collect()
}

#[tokio::test]
async fn two_files_go_in_one_request() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new(vec![]);
    let mut dialog = UploadDialog::new();
    for path in write_files(dir.path(), &["one.mp3", "two.m4a"]) {
        dialog.add_file(path);
    }

    assert_eq!(dialog.submit(&api, TOKEN).await, UploadOutcome::Completed);
    assert_eq!(
        api.calls(),
        vec![Call::Upload {
            token: TOKEN.into(),
            names: vec!["one.mp3".into(), "two.m4a".into()],
        }]
    );
    assert!(dialog.files().is_empty());
    assert_eq!(dialog.error(), None);
}

#[tokio::test]
async fn nothing_selected_is_rejected_locally() {
    let api = FakeApi::new(vec![]);
    let mut dialog = UploadDialog::new();

    assert_eq!(dialog.submit(&api, TOKEN).await, UploadOutcome::Skipped);
    assert_eq!(dialog.error(), Some("Please select a file to upload."));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn rejected_upload_keeps_selection() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new(vec![]);
    let mut dialog = UploadDialog::new();
    for path in write_files(dir.path(), &["one.mp3"]) {
        dialog.add_file(path);
    }

    api.fail_next(ApiError::Status {
        status: 400,
        detail: Some("Unsupported file type".into()),
    });
    assert_eq!(dialog.submit(&api, TOKEN).await, UploadOutcome::Failed);
    assert_eq!(dialog.error(), Some("Unsupported file type"));
    assert_eq!(dialog.files().len(), 1);

    api.fail_next(ApiError::Network("reset".into()));
    dialog.submit(&api, TOKEN).await;
    assert_eq!(dialog.error(), Some("Failed to upload file"));
}

#[tokio::test]
async fn unreadable_file_fails_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeApi::new(vec![]);
    let mut dialog = UploadDialog::new();
    dialog.add_file(dir.path().join("gone.mp3"));

    assert_eq!(dialog.submit(&api, TOKEN).await, UploadOutcome::Failed);
    assert!(api.calls().is_empty());
    assert!(dialog.error().is_some_and(|e| e.contains("gone.mp3")));
}

#[test]
fn selection_is_deduplicated() {
    let mut dialog = UploadDialog::new();
    dialog.add_file("/music/a.mp3");
    dialog.add_file("/music/a.mp3");
    dialog.add_file("/music/b.mp3");
    assert_eq!(dialog.files().len(), 2);

    assert_eq!(
        dialog.remove_last().as_deref(),
        Some(std::path::Path::new("/music/b.mp3"))
    );
    assert_eq!(dialog.files().len(), 1);
}

#[test]
fn in_flight_upload_blocks_resubmit() {
    let mut dialog = UploadDialog::new();
    dialog.add_file("/music/a.mp3");

    assert!(dialog.begin_submit().is_some());
    assert!(dialog.is_loading());
    assert!(dialog.begin_submit().is_none());
    assert_eq!(dialog.finish_submit(Ok(())), UploadOutcome::Completed);
    assert!(!dialog.is_loading());
}
