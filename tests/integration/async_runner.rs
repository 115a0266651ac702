//! Non-blocking runs through the async runner

use crate::integration::test_utils::*;
use futures::StreamExt;
use tempfile::TempDir;
use veepiaci::progress::ProgressEvent;
use veepiaci::runner::AsyncRunner;
use veepiaci::verify::SharedObserver;
use veepiaci::VerifyError;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_delivers_events_then_result() {
    let dir = standard_directory();
    let mut run = AsyncRunner::new().start(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", DATA_MD5)]),
        dir.path(),
    );

    let mut events = Vec::new();
    while let Some(event) = run.next_event().await {
        events.push(event);
    }
    let result = run.wait().await.unwrap();

    assert!(result.success());
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].event_type(), "started");
    assert_eq!(events[3], ProgressEvent::Finished { result });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_observer_sees_every_event_before_handle_resolves() {
    let dir = standard_directory();
    let observer = SharedObserver::new(Vec::<ProgressEvent>::new());

    let handle = AsyncRunner::new().start_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5)]),
        dir.path(),
        observer.clone(),
    );
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.additional_files().to_vec(), vec!["data.dat".to_string()]);
    observer.with(|events| {
        let kinds: Vec<_> = events.iter().map(ProgressEvent::event_type).collect();
        assert_eq!(kinds, vec!["started", "file_checked", "finished"]);
    });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stream_ends_with_error_for_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let run = AsyncRunner::new().start(
        manifest(&[("empty.dat", EMPTY_MD5)]),
        temp_dir.path().join("nowhere"),
    );

    let items: Vec<_> = run.into_stream().collect().await;
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(VerifyError::RootUnavailable { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stream_yields_events_in_order() {
    let dir = standard_directory();
    let run = AsyncRunner::new().start(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", EMPTY_MD5)]),
        dir.path(),
    );

    let events: Vec<ProgressEvent> = run
        .into_stream()
        .map(|item| item.unwrap())
        .collect()
        .await;
    match events.last() {
        Some(ProgressEvent::Finished { result }) => {
            assert_eq!(result.mismatches().to_vec(), vec!["data.dat".to_string()]);
        }
        other => panic!("expected Finished last, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_runs_are_independent() {
    let good = standard_directory();
    let bad = standard_directory();
    let runner = AsyncRunner::new();

    let first = runner.start(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", DATA_MD5)]),
        good.path(),
    );
    let second = runner.start(manifest(&[("empty.dat", EMPTY_MD5)]), bad.path());

    let (first, second) = tokio::join!(first.wait(), second.wait());
    assert!(first.unwrap().success());
    assert!(!second.unwrap().success());
}
