use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};

use form_engine::{CommitSink, DEFAULT_QUIESCENCE_WINDOW, DebouncedCommitter};

type Commits = Arc<Mutex<Vec<(String, Value)>>>;

fn committer(window: Duration) -> (DebouncedCommitter, Commits) {
    let commits: Commits = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&commits);
    let sink: CommitSink = Arc::new(move |field, value| {
        recorded.lock().expect("commits lock").push((field.to_string(), value));
    });
    (DebouncedCommitter::new(window, sink), commits)
}

#[tokio::test(start_paused = true)]
async fn burst_coalesces_to_exactly_one_commit_of_the_last_value() {
    let (committer, commits) = committer(DEFAULT_QUIESCENCE_WINDOW);

    committer.submit("x", json!("v1"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    committer.submit("x", json!("v2"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    committer.submit("x", json!("v3"));
    tokio::time::sleep(Duration::from_millis(400)).await;

    let recorded = commits.lock().expect("commits lock");
    assert_eq!(recorded.as_slice(), &[("x".to_string(), json!("v3"))]);
}

#[tokio::test(start_paused = true)]
async fn spaced_edits_each_commit() {
    let (committer, commits) = committer(DEFAULT_QUIESCENCE_WINDOW);

    committer.submit("x", json!("v1"));
    tokio::time::sleep(Duration::from_millis(400)).await;
    committer.submit("x", json!("v2"));
    tokio::time::sleep(Duration::from_millis(400)).await;

    let recorded = commits.lock().expect("commits lock");
    assert_eq!(
        recorded.as_slice(),
        &[
            ("x".to_string(), json!("v1")),
            ("x".to_string(), json!("v2")),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn different_fields_debounce_independently() {
    let (committer, commits) = committer(DEFAULT_QUIESCENCE_WINDOW);

    committer.submit("x", json!(1));
    committer.submit("y", json!(2));
    tokio::time::sleep(Duration::from_millis(400)).await;

    let mut recorded = commits.lock().expect("commits lock").clone();
    recorded.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        recorded,
        vec![("x".to_string(), json!(1)), ("y".to_string(), json!(2))]
    );
}

#[tokio::test(start_paused = true)]
async fn resubmit_after_commit_still_coalesces_to_the_newest_value() {
    let (committer, commits) = committer(DEFAULT_QUIESCENCE_WINDOW);

    committer.submit("x", json!("v1"));
    tokio::time::sleep(Duration::from_millis(400)).await;

    // A fresh burst after the first commit must not be confused with the
    // already-committed scheduling round.
    committer.submit("x", json!("v2"));
    committer.submit("x", json!("v3"));
    tokio::time::sleep(Duration::from_millis(400)).await;

    let recorded = commits.lock().expect("commits lock");
    assert_eq!(
        recorded.as_slice(),
        &[
            ("x".to_string(), json!("v1")),
            ("x".to_string(), json!("v3")),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pending_flag_clears_after_commit() {
    let (committer, _) = committer(DEFAULT_QUIESCENCE_WINDOW);

    committer.submit("x", json!("v"));
    assert!(committer.has_pending());
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!committer.has_pending());
}
