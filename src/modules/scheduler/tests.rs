use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::database::manager::DatabaseManager;
use crate::modules::error::code::ErrorCode;
use crate::modules::scheduler::dispatcher::{DispatchReport, ScheduleDispatcher};
use crate::modules::scheduler::mock::FaultyStore;
use crate::modules::scheduler::model::{SendOutcome, SendStatus};
use crate::modules::scheduler::nativedb::store::NativeDbScheduleStore;
use crate::modules::scheduler::store::ScheduleStore;
use crate::modules::smtp::mock::RecordingTransport;

const NOW: i64 = 1_750_000_000_000;
const MINUTE: i64 = 60_000;

fn memory_store() -> NativeDbScheduleStore {
    NativeDbScheduleStore::new(DatabaseManager::in_memory().unwrap())
}

fn recipients(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn create_persists_pending_record() {
    let store = memory_store();
    let id = store
        .create(
            recipients(&["a@example.com", "b@example.com", "a@example.com"]),
            "Launch".into(),
            "<h1>Hi</h1>".into(),
            NOW + MINUTE,
        )
        .await
        .unwrap();

    let send = store.get(id).await.unwrap().unwrap();
    assert_eq!(send.id, id);
    assert_eq!(
        send.recipients,
        recipients(&["a@example.com", "b@example.com", "a@example.com"])
    );
    assert_eq!(send.subject, "Launch");
    assert_eq!(send.body, "<h1>Hi</h1>");
    assert_eq!(send.deliver_at, NOW + MINUTE);
    assert_eq!(send.status, SendStatus::Pending);
    assert!(send.last_error.is_none());
    assert_eq!(send.created_at, send.updated_at);
}

#[tokio::test]
async fn create_rejects_empty_recipients() {
    let store = memory_store();
    let err = store
        .create(vec![], "s".into(), "b".into(), NOW)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
    assert!(store.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let store = Arc::new(memory_store());
    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(
                    recipients(&["x@example.com"]),
                    format!("subject {i}"),
                    "body".into(),
                    NOW + MINUTE,
                )
                .await
                .unwrap()
        }));
    }
    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 16);
    assert_eq!(store.list(Some(SendStatus::Pending)).await.unwrap().len(), 16);
}

#[tokio::test]
async fn fetch_due_returns_pending_records_at_or_before_cutoff() {
    let store = memory_store();
    let past = store
        .create(recipients(&["a@example.com"]), "past".into(), "".into(), NOW - MINUTE)
        .await
        .unwrap();
    let exact = store
        .create(recipients(&["a@example.com"]), "exact".into(), "".into(), NOW)
        .await
        .unwrap();
    store
        .create(recipients(&["a@example.com"]), "future".into(), "".into(), NOW + 1)
        .await
        .unwrap();
    let done = store
        .create(recipients(&["a@example.com"]), "done".into(), "".into(), NOW - MINUTE)
        .await
        .unwrap();
    store.mark(done, SendOutcome::Sent, None).await.unwrap();

    let due: HashSet<u64> = store
        .fetch_due(NOW)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(due, HashSet::from([past, exact]));
}

#[tokio::test]
async fn fetch_due_on_empty_store_is_empty() {
    let store = memory_store();
    assert!(store.fetch_due(NOW).await.unwrap().is_empty());
}

#[tokio::test]
async fn mark_is_terminal_and_idempotent() {
    let store = memory_store();
    let id = store
        .create(recipients(&["a@example.com"]), "s".into(), "b".into(), NOW)
        .await
        .unwrap();

    store
        .mark(id, SendOutcome::Failed, Some("421 try later".into()))
        .await
        .unwrap();
    let failed = store.get(id).await.unwrap().unwrap();
    assert_eq!(failed.status, SendStatus::Failed);
    assert_eq!(failed.last_error.as_deref(), Some("421 try later"));

    store.mark(id, SendOutcome::Sent, None).await.unwrap();
    store
        .mark(id, SendOutcome::Failed, Some("other".into()))
        .await
        .unwrap();
    let after = store.get(id).await.unwrap().unwrap();
    assert_eq!(after, failed);
}

#[tokio::test]
async fn mark_unknown_id_is_not_found() {
    let store = memory_store();
    let err = store
        .mark(42, SendOutcome::Sent, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn list_filters_by_status_in_creation_order() {
    let store = memory_store();
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(
            store
                .create(recipients(&["a@example.com"]), format!("s{i}"), "".into(), NOW)
                .await
                .unwrap(),
        );
    }
    store.mark(ids[1], SendOutcome::Sent, None).await.unwrap();
    store
        .mark(ids[2], SendOutcome::Failed, Some("boom".into()))
        .await
        .unwrap();

    let all = store.list(None).await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let pending: Vec<u64> = store
        .list(Some(SendStatus::Pending))
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(pending.len(), 2);
    assert!(pending.contains(&ids[0]) && pending.contains(&ids[3]));

    let sent = store.list(Some(SendStatus::Sent)).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, ids[1]);

    let failed = store.list(Some(SendStatus::Failed)).await.unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].id, ids[2]);
}

#[tokio::test]
async fn get_unknown_id_is_none() {
    let store = memory_store();
    assert!(store.get(7).await.unwrap().is_none());
}

#[tokio::test]
async fn cycle_sends_due_records_and_leaves_future_ones() {
    let store = Arc::new(memory_store());
    let transport = Arc::new(RecordingTransport::default());
    let due = store
        .create(
            recipients(&["a@example.com", "b@example.com"]),
            "due".into(),
            "<p>due</p>".into(),
            NOW - MINUTE,
        )
        .await
        .unwrap();
    let later = store
        .create(recipients(&["c@example.com"]), "later".into(), "".into(), NOW + MINUTE)
        .await
        .unwrap();

    let dispatcher = ScheduleDispatcher::new(store.clone(), transport.clone());
    let report = dispatcher.run_cycle(NOW).await.unwrap();
    assert_eq!(
        report,
        DispatchReport {
            due: 1,
            sent: 1,
            failed: 0,
            mark_errors: 0
        }
    );

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].recipients, recipients(&["a@example.com", "b@example.com"]));
    assert_eq!(calls[0].subject, "due");
    assert_eq!(calls[0].body, "<p>due</p>");

    assert_eq!(store.get(due).await.unwrap().unwrap().status, SendStatus::Sent);
    assert_eq!(store.get(later).await.unwrap().unwrap().status, SendStatus::Pending);
}

#[tokio::test]
async fn sent_records_are_not_dispatched_again() {
    let store = Arc::new(memory_store());
    let transport = Arc::new(RecordingTransport::default());
    store
        .create(recipients(&["a@example.com"]), "once".into(), "".into(), NOW)
        .await
        .unwrap();

    let dispatcher = ScheduleDispatcher::new(store.clone(), transport.clone());
    dispatcher.run_cycle(NOW).await.unwrap();
    let second = dispatcher.run_cycle(NOW + MINUTE).await.unwrap();

    assert_eq!(second, DispatchReport::default());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn transport_failure_is_recorded_and_never_retried() {
    let store = Arc::new(memory_store());
    let transport = Arc::new(RecordingTransport::rejecting(&["bounce"]));
    let bad = store
        .create(recipients(&["a@example.com"]), "bounce".into(), "".into(), NOW)
        .await
        .unwrap();
    let good = store
        .create(recipients(&["b@example.com"]), "fine".into(), "".into(), NOW)
        .await
        .unwrap();

    let dispatcher = ScheduleDispatcher::new(store.clone(), transport.clone());
    let report = dispatcher.run_cycle(NOW).await.unwrap();
    assert_eq!(report.due, 2);
    assert_eq!(report.sent, 1);
    assert_eq!(report.failed, 1);

    let failed = store.get(bad).await.unwrap().unwrap();
    assert_eq!(failed.status, SendStatus::Failed);
    assert!(failed
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("mailbox unavailable")));
    assert_eq!(store.get(good).await.unwrap().unwrap().status, SendStatus::Sent);

    dispatcher.run_cycle(NOW + MINUTE).await.unwrap();
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn fetch_failure_skips_the_cycle() {
    let mut faulty = FaultyStore::new(memory_store());
    faulty.fail_fetch = true;
    let store = Arc::new(faulty);
    store
        .create(recipients(&["a@example.com"]), "s".into(), "".into(), NOW)
        .await
        .unwrap();
    let transport = Arc::new(RecordingTransport::default());

    let dispatcher = ScheduleDispatcher::new(store.clone(), transport.clone());
    let err = dispatcher.run_cycle(NOW).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageError);
    assert!(transport.calls().is_empty());
    assert_eq!(store.list(Some(SendStatus::Pending)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn mark_failure_does_not_abort_remaining_records() {
    let inner = memory_store();
    let stuck = inner
        .create(recipients(&["a@example.com"]), "one".into(), "".into(), NOW)
        .await
        .unwrap();
    let other = inner
        .create(recipients(&["b@example.com"]), "two".into(), "".into(), NOW)
        .await
        .unwrap();
    let mut faulty = FaultyStore::new(inner);
    faulty.fail_mark_for.insert(stuck);
    let store = Arc::new(faulty);
    let transport = Arc::new(RecordingTransport::default());

    let dispatcher = ScheduleDispatcher::new(store.clone(), transport.clone());
    let report = dispatcher.run_cycle(NOW).await.unwrap();
    assert_eq!(report.due, 2);
    assert_eq!(report.sent, 2);
    assert_eq!(report.mark_errors, 1);
    assert_eq!(transport.calls().len(), 2);
    assert_eq!(store.get(other).await.unwrap().unwrap().status, SendStatus::Sent);
    assert_eq!(store.get(stuck).await.unwrap().unwrap().status, SendStatus::Pending);
}

#[tokio::test]
async fn periodic_runs_never_overlap() {
    use crate::modules::scheduler::periodic::PeriodicTask;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    let runs = Arc::new(AtomicUsize::new(0));
    let in_flight = Arc::new(AtomicUsize::new(0));
    let max_in_flight = Arc::new(AtomicUsize::new(0));

    let handle = PeriodicTask::new("overlap-probe").start(
        {
            let runs = runs.clone();
            let in_flight = in_flight.clone();
            let max_in_flight = max_in_flight.clone();
            move || {
                let runs = runs.clone();
                let in_flight = in_flight.clone();
                let max_in_flight = max_in_flight.clone();
                async move {
                    let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_in_flight.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(25)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }
        },
        Duration::from_millis(5),
        true,
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    assert!(runs.load(Ordering::SeqCst) >= 2);
    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}
