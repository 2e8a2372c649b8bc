use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use qraso_config::capture::CaptureConfig;
use qraso_core::{CaptureAdapter, CaptureOutcome, EnqueueError, FileAdapter, InputRejected};
use qraso_types::{AppEvent, FacingMode, ScanPayload};
use tokio::sync::Semaphore;
use tokio::time::timeout;

mod common;
use common::{FakeClassifier, new_store, pipeline_with, wait_for};

fn capture_config(stop_after_scan: bool) -> CaptureConfig {
    CaptureConfig {
        stop_after_scan,
        ..CaptureConfig::default()
    }
}

#[tokio::test]
async fn detections_are_ignored_until_scanning_starts() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::labelling("안전"));
    let capture = CaptureAdapter::new(pipeline_with(&store, classifier.clone()), &capture_config(true));

    let outcome = capture
        .on_detect(ScanPayload::Text("http://example.com".to_string()))
        .await;

    assert!(matches!(outcome, CaptureOutcome::Ignored));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn blank_detection_is_ignored() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::labelling("안전"));
    let capture = CaptureAdapter::new(pipeline_with(&store, classifier.clone()), &capture_config(false));
    capture.start();

    let outcome = capture.on_detect(ScanPayload::Text("   ".to_string())).await;

    assert!(matches!(outcome, CaptureOutcome::Ignored));
    assert_eq!(classifier.calls(), 0);
    assert!(capture.is_scanning());
}

#[tokio::test]
async fn detections_while_resolving_are_rejected() {
    let store = new_store();
    let gate = Arc::new(Semaphore::new(0));
    let classifier = Arc::new(FakeClassifier::labelling("의심").with_gate(gate.clone()));
    let capture = Arc::new(CaptureAdapter::new(
        pipeline_with(&store, classifier.clone()),
        &capture_config(false),
    ));
    capture.start();

    let first = tokio::spawn({
        let capture = capture.clone();
        async move {
            capture
                .on_detect(ScanPayload::Text("http://one.example".to_string()))
                .await
        }
    });

    wait_for(|| classifier.calls() == 1).await;
    assert!(capture.is_busy());

    let second = capture
        .on_detect(ScanPayload::Text("http://two.example".to_string()))
        .await;
    assert!(matches!(second, CaptureOutcome::Busy));

    gate.add_permits(1);
    let first = first.await.unwrap();
    assert!(matches!(first, CaptureOutcome::Completed(Ok(_))));

    assert_eq!(classifier.calls(), 1);
    assert_eq!(store.read().await.len(), 1);
    assert!(!capture.is_busy());
    assert_eq!(capture.last_scanned().as_deref(), Some("http://one.example"));
}

#[tokio::test]
async fn session_disarms_after_a_scan_when_configured() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::labelling("안전"));
    let capture = CaptureAdapter::new(pipeline_with(&store, classifier.clone()), &capture_config(true));
    capture.start();

    let first = capture
        .on_detect(ScanPayload::Text("http://one.example".to_string()))
        .await;
    let second = capture
        .on_detect(ScanPayload::Text("http://two.example".to_string()))
        .await;

    assert!(matches!(first, CaptureOutcome::Completed(Ok(_))));
    assert!(matches!(second, CaptureOutcome::Ignored));
    assert!(!capture.is_scanning());
    assert_eq!(store.read().await.len(), 1);
}

#[tokio::test]
async fn failed_scan_releases_the_session() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::responding(|_| {
        Err(qraso_gateway::ClassificationError::HttpStatus(500))
    }));
    let capture = CaptureAdapter::new(pipeline_with(&store, classifier.clone()), &capture_config(false));
    capture.start();

    let outcome = capture
        .on_detect(ScanPayload::Text("http://one.example".to_string()))
        .await;

    match outcome {
        CaptureOutcome::Completed(Err(e)) => assert!(e.notice().is_some()),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(!capture.is_busy());
    assert!(store.read().await.is_empty());
}

#[tokio::test]
async fn facing_toggle_does_not_touch_scanning() {
    let store = new_store();
    let capture = CaptureAdapter::new(
        pipeline_with(&store, Arc::new(FakeClassifier::labelling("안전"))),
        &capture_config(false),
    );

    assert_eq!(capture.facing(), FacingMode::Back);
    assert_eq!(capture.toggle_facing(), FacingMode::Front);
    assert_eq!(capture.toggle_facing(), FacingMode::Back);
    assert!(!capture.is_scanning());
}

#[tokio::test]
async fn rapid_uploads_are_serialized() {
    let store = new_store();
    let classifier =
        Arc::new(FakeClassifier::labelling("안전").with_delay(Duration::from_millis(50)));
    let (tx, rx) = kanal::unbounded_async();
    let uploads = FileAdapter::spawn(pipeline_with(&store, classifier.clone()), tx);

    uploads.select(vec![1, 2, 3], "first.png".to_string()).unwrap();
    uploads.drop_file(vec![4, 5, 6], "second.png".to_string()).unwrap();

    let mut shown = 0;
    timeout(Duration::from_secs(2), async {
        while shown < 2 {
            if let AppEvent::ShowEntries(_) = rx.recv().await.unwrap() {
                shown += 1;
            }
        }
    })
    .await
    .expect("both uploads should finish");

    assert_eq!(classifier.calls(), 2);
    assert_eq!(classifier.max_in_flight.load(Ordering::SeqCst), 1);

    let urls: Vec<String> = store
        .read()
        .await
        .list_all()
        .into_iter()
        .map(|e| e.record.original_url)
        .collect();
    assert_eq!(
        urls,
        ["http://from-image/first.png", "http://from-image/second.png"]
    );
    assert_eq!(uploads.queued(), 0);
    assert!(!uploads.is_busy());
}

#[tokio::test]
async fn uploads_keep_draining_after_the_ui_goes_away() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::labelling("안전"));
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    drop(rx);
    let uploads = FileAdapter::spawn(pipeline_with(&store, classifier.clone()), tx);

    uploads.select(vec![1], "first.png".to_string()).unwrap();
    uploads.paste(vec![2], "second.png".to_string()).unwrap();

    wait_for(|| uploads.queued() == 0).await;

    assert_eq!(classifier.calls(), 2);
    assert_eq!(store.read().await.len(), 2);
}

#[tokio::test]
async fn upload_without_bytes_is_rejected_locally() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::labelling("안전"));
    let (tx, _rx) = kanal::unbounded_async();
    let uploads = FileAdapter::spawn(pipeline_with(&store, classifier.clone()), tx);

    let err = uploads.paste(Vec::new(), "clipboard.png".to_string()).unwrap_err();

    assert_eq!(err, EnqueueError::Rejected(InputRejected::NoFile));
    assert_eq!(uploads.queued(), 0);
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn failed_upload_is_announced_and_queue_moves_on() {
    let store = new_store();
    let classifier = Arc::new(FakeClassifier::responding(|input| match input {
        qraso_types::ScanInput::Image(image) if image.file_name == "broken.png" => Err(
            qraso_gateway::ClassificationError::Rejected("QR 코드 디코딩 실패".to_string()),
        ),
        _ => Ok(common::verdict("http://ok.example", "안전")),
    }));
    let (tx, rx) = kanal::unbounded_async();
    let uploads = FileAdapter::spawn(pipeline_with(&store, classifier.clone()), tx);

    uploads.select(vec![1], "broken.png".to_string()).unwrap();
    uploads.select(vec![2], "fine.png".to_string()).unwrap();

    let mut notices = Vec::new();
    let mut shown = 0;
    timeout(Duration::from_secs(2), async {
        while shown < 1 {
            match rx.recv().await.unwrap() {
                AppEvent::Notify(notice) => notices.push(notice.message),
                AppEvent::ShowEntries(_) => shown += 1,
                _ => {}
            }
        }
    })
    .await
    .expect("queue should drain");

    assert_eq!(notices, ["QR 코드 디코딩 실패"]);
    assert_eq!(store.read().await.len(), 1);
}
