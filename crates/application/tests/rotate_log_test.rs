mod helpers;

use ferrous_doh_application::use_cases::RotateLogUseCase;
use ferrous_doh_domain::DomainError;
use helpers::MockLogRotator;
use std::sync::Arc;

#[tokio::test]
async fn test_rotates_when_size_exceeds_threshold() {
    let rotator = Arc::new(MockLogRotator::with_size(2048));
    let use_case = RotateLogUseCase::new(rotator.clone(), 1024);

    assert!(use_case.execute().await.unwrap());
    assert_eq!(rotator.rotate_count(), 1);
}

#[tokio::test]
async fn test_does_not_rotate_at_threshold() {
    let rotator = Arc::new(MockLogRotator::with_size(1024));
    let use_case = RotateLogUseCase::new(rotator.clone(), 1024);

    assert!(!use_case.execute().await.unwrap());
    assert_eq!(rotator.rotate_count(), 0);
}

#[tokio::test]
async fn test_second_run_after_rotation_is_noop() {
    let rotator = Arc::new(MockLogRotator::with_size(4096));
    let use_case = RotateLogUseCase::new(rotator.clone(), 1024);

    assert!(use_case.execute().await.unwrap());
    assert!(!use_case.execute().await.unwrap());
    assert_eq!(rotator.rotate_count(), 1);
}

#[tokio::test]
async fn test_rotation_failure_is_reported() {
    let rotator = Arc::new(MockLogRotator::with_size(4096));
    rotator.set_should_fail(true).await;
    let use_case = RotateLogUseCase::new(rotator.clone(), 1024);

    assert!(matches!(
        use_case.execute().await,
        Err(DomainError::LogRotation(_))
    ));
    assert_eq!(rotator.rotate_count(), 0);
}
