//! Interception scopes across threads and `.await` points

use std::sync::{Arc, Mutex};

use weir::{argument, flow, scope, FlowExt};

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(log: &Log) -> impl Fn(&weir::Observation<'_>) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |obs| log.lock().unwrap().push(obs.param().to_string())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scope_survives_hops_between_workers() {
    let log: Log = Arc::default();

    let task_log = Arc::clone(&log);
    tokio::spawn(
        async move {
            let guard = scope::begin(recorder(&task_log));
            for i in 0..50 {
                tokio::task::yield_now().await;
                let _ = argument(i, "step").max(-1);
            }
            guard.release();
            assert_eq!(scope::depth(), 0);
        }
        .in_new_flow(),
    )
    .await
    .unwrap();

    assert_eq!(log.lock().unwrap().len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_flows_are_isolated() {
    let mut handles = Vec::new();
    let logs: Vec<Log> = (0..8).map(|_| Arc::default()).collect();

    for (i, log) in logs.iter().enumerate() {
        let log = Arc::clone(log);
        handles.push(tokio::spawn(
            async move {
                let guard = scope::begin(recorder(&log));
                for _ in 0..10 {
                    tokio::task::yield_now().await;
                    let _ = argument(0, format!("flow{i}")).min(1);
                }
                guard.release();
            }
            .in_new_flow(),
        ));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    for (i, log) in logs.iter().enumerate() {
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 10);
        assert!(log.iter().all(|param| *param == format!("flow{i}")));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawn_inherits_callers_scopes() {
    let log: Log = Arc::default();
    let guard = scope::begin(recorder(&log));

    flow::spawn(async {
        tokio::task::yield_now().await;
        let _ = argument("", "child").not_empty();
    })
    .await
    .unwrap();

    guard.release();
    assert_eq!(*log.lock().unwrap(), vec!["child"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn child_scopes_stay_in_child() {
    let parent_log: Log = Arc::default();
    let child_log: Log = Arc::default();
    let guard = scope::begin(recorder(&parent_log));

    let child = Arc::clone(&child_log);
    flow::spawn(async move {
        let inner = scope::begin_with(recorder(&child), false);
        tokio::task::yield_now().await;
        let _ = argument(0, "inner").min(1);
        inner.release();
    })
    .await
    .unwrap();

    assert_eq!(scope::depth(), 1);
    guard.release();

    assert!(parent_log.lock().unwrap().is_empty());
    assert_eq!(*child_log.lock().unwrap(), vec!["inner"]);
}

#[test]
fn plain_threads_do_not_share_stacks() {
    let log: Log = Arc::default();
    let guard = scope::begin(recorder(&log));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                let own = scope::begin(recorder(&log));
                let _ = argument(0, format!("thread{i}")).min(1);
                own.release();
                scope::depth()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 0);
    }
    guard.release();

    assert_eq!(log.lock().unwrap().len(), 4);
    assert_eq!(scope::depth(), 0);
}
