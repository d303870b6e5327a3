// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tempfile::tempdir;

use crate::modules::database::manager::DatabaseManager;
use crate::modules::scheduler::model::{SendOutcome, SendStatus};
use crate::modules::scheduler::nativedb::store::NativeDbScheduleStore;
use crate::modules::scheduler::store::ScheduleStore;

#[tokio::test]
async fn scheduled_sends_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.db");

    let (pending, failed) = {
        let store = NativeDbScheduleStore::new(DatabaseManager::open_file(&path, None).unwrap());
        let pending = store
            .create(
                vec!["a@example.com".into(), "b@example.com".into()],
                "Persisted".into(),
                "<p>still here</p>".into(),
                4_102_444_800_000,
            )
            .await
            .unwrap();
        let failed = store
            .create(vec!["c@example.com".into()], "Gone wrong".into(), "".into(), 0)
            .await
            .unwrap();
        store
            .mark(failed, SendOutcome::Failed, Some("535 authentication rejected".into()))
            .await
            .unwrap();
        (pending, failed)
    };

    let store = NativeDbScheduleStore::new(DatabaseManager::open_file(&path, None).unwrap());
    let restored = store.get(pending).await.unwrap().unwrap();
    assert_eq!(restored.status, SendStatus::Pending);
    assert_eq!(restored.recipients, vec!["a@example.com", "b@example.com"]);
    assert_eq!(restored.deliver_at, 4_102_444_800_000);

    let restored = store.get(failed).await.unwrap().unwrap();
    assert_eq!(restored.status, SendStatus::Failed);
    assert_eq!(
        restored.last_error.as_deref(),
        Some("535 authentication rejected")
    );

    assert_eq!(store.fetch_due(4_102_444_800_000).await.unwrap().len(), 1);
}

#[test]
fn second_open_of_same_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.db");
    let _first = DatabaseManager::open_file(&path, Some(16 * 1024 * 1024)).unwrap();
    assert!(DatabaseManager::open_file(&path, None).is_err());
}
