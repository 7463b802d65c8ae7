//! Log store behavior under load and across sinks.

use std::sync::Arc;
use std::thread;

use lpg_logstore::{ChannelSink, LogSink, LogStore, NewLogEntry, REDACTED};
use lpg_test_utils::sample_external;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn prop_never_exceeds_capacity(capacity in 1usize..50, pushes in 0usize..120) {
        let store = LogStore::new(capacity);
        for i in 0..pushes {
            store.push(NewLogEntry::new(format!("/{i}"), "GET"));
        }
        prop_assert_eq!(store.len(), pushes.min(capacity));
        if pushes > 0 {
            prop_assert_eq!(store.entries()[0].endpoint.clone(), format!("/{}", pushes - 1));
        }
    }

    #[test]
    fn prop_redaction_hides_any_token_field(prefix in "[a-z]{0,8}", secret in ".{0,20}") {
        let key = format!("{prefix}Token");
        let store = LogStore::default();
        let stored = store.push(NewLogEntry::new("/", "POST").with_request(json!({ key.clone(): secret })));
        prop_assert_eq!(&stored.request.unwrap()[&key], &json!(REDACTED));
    }
}

#[test]
fn concurrent_writers_respect_capacity() {
    let store = Arc::new(LogStore::new(64));
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    store.record(NewLogEntry::new(format!("/w{worker}/{i}"), "POST"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = store.entries();
    assert_eq!(entries.len(), 64);
    assert!(entries.iter().all(|e| e.endpoint.starts_with("/w")));
}

#[test]
fn pricing_response_is_stored_truncated() {
    let store = LogStore::default().with_truncate(true);
    let response = json!({"results": [sample_external(), sample_external(), sample_external()]});
    let stored = store.push(NewLogEntry::new("/pricing/search", "POST").with_response(response));

    let results = stored.response.unwrap()["results"].clone();
    assert_eq!(results.as_array().map(Vec::len), Some(2));
    assert_eq!(results[1], json!("[TRUNCATED - 2 more items]"));
    assert_eq!(results[0]["audienceId"], sample_external()["audienceId"]);
}

#[tokio::test]
async fn many_sink_clones_feed_one_collector() {
    let store = Arc::new(LogStore::new(500));
    let (sink, collector) = ChannelSink::spawn(Arc::clone(&store));

    let tasks: Vec<_> = (0..4)
        .map(|worker| {
            let sink = sink.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    sink.record(NewLogEntry::new(format!("/t{worker}/{i}"), "GET").with_status(200));
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    drop(sink);
    collector.await.unwrap();

    assert_eq!(store.len(), 100);
    assert!(store.entries().iter().all(|e| e.status == Some(200)));
}
