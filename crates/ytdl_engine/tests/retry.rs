use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use ytdl_engine::{
    run_with_retry, LookupError, LookupErrorKind, MediaFormat, MediaProcessor, ProcessError,
    ProcessErrorKind, ProcessRequest, RetryPolicy, SimulatedProcessor,
};

fn fast_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy {
        attempts,
        timeout: Duration::from_millis(100),
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
    }
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let calls = AtomicU32::new(0);

    let result = run_with_retry(&fast_policy(3), "lookup", || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Err(LookupError::new(LookupErrorKind::Unreachable, "down"))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn permanent_failures_are_not_retried() {
    let calls = AtomicU32::new(0);

    let result: Result<(), LookupError> = run_with_retry(&fast_policy(5), "lookup", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(LookupError::new(LookupErrorKind::NotFound, "gone")) }
    })
    .await;

    assert_eq!(result.unwrap_err().kind, LookupErrorKind::NotFound);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn attempts_are_bounded() {
    let calls = AtomicU32::new(0);

    let result: Result<(), ProcessError> = run_with_retry(&fast_policy(2), "processing", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(ProcessError::new(ProcessErrorKind::Unreachable, "down")) }
    })
    .await;

    assert_eq!(result.unwrap_err().kind, ProcessErrorKind::Unreachable);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn slow_attempt_times_out() {
    let policy = RetryPolicy {
        attempts: 1,
        timeout: Duration::from_millis(20),
        ..fast_policy(1)
    };

    let result: Result<(), LookupError> = run_with_retry(&policy, "lookup", || async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    })
    .await;

    assert_eq!(result.unwrap_err().kind, LookupErrorKind::TimedOut);
}

#[tokio::test]
async fn zero_attempts_still_runs_once() {
    let calls = AtomicU32::new(0);

    let result: Result<u32, LookupError> = run_with_retry(&fast_policy(0), "lookup", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(7) }
    })
    .await;

    assert_eq!(result, Ok(7));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn simulated_processor_picks_artifact_by_format() {
    let processor = SimulatedProcessor {
        delay: Duration::from_millis(1),
        ..SimulatedProcessor::default()
    };
    let mut request = ProcessRequest {
        url: "https://youtu.be/abc123".to_string(),
        format: MediaFormat::Video,
        include_source_audio: true,
        quality: "1080".to_string(),
    };

    let video = processor.process(&request).await.expect("video");
    assert!(video.artifact_ref.ends_with(".mp4"));

    request.format = MediaFormat::Audio;
    request.quality = "best".to_string();
    let audio = processor.process(&request).await.expect("audio");
    assert!(audio.artifact_ref.ends_with(".m4a"));

    request.quality = String::new();
    let err = processor.process(&request).await.unwrap_err();
    assert_eq!(err.kind, ProcessErrorKind::Unsupported);
}
