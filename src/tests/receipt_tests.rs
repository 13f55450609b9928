use crate::error::DutchpayError;
use crate::receipt::ReceiptIntakeService;
use crate::tests::MockApi;
use std::sync::Arc;

fn test_service(api: Arc<MockApi>) -> ReceiptIntakeService<MockApi> {
    ReceiptIntakeService::new(api)
}

#[tokio::test]
async fn test_upload_commits_receipt_id() {
    let api = Arc::new(MockApi::new());
    api.receipt_outcomes
        .lock()
        .await
        .push(Ok("receipt-1".to_string()));
    let service = test_service(api);

    let committed = service.upload(vec![0xde, 0xad]).await.unwrap();
    assert_eq!(committed, Some("receipt-1".to_string()));
    assert_eq!(service.receipt_id().await, Some("receipt-1".to_string()));
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let api = Arc::new(MockApi::new());
    let service = test_service(api);

    // Upload A is issued first, upload B supersedes it while A is in flight.
    let ticket_a = service.begin_upload().await;
    let ticket_b = service.begin_upload().await;

    // B's response arrives first and commits.
    let committed = service
        .complete_upload(&ticket_b, Ok("receipt-b".to_string()))
        .await
        .unwrap();
    assert_eq!(committed, Some("receipt-b".to_string()));

    // A's late response must not overwrite B.
    let committed = service
        .complete_upload(&ticket_a, Ok("receipt-a".to_string()))
        .await
        .unwrap();
    assert_eq!(committed, None);
    assert_eq!(service.receipt_id().await, Some("receipt-b".to_string()));
}

#[tokio::test]
async fn test_failure_leaves_prior_receipt_untouched() {
    let api = Arc::new(MockApi::new());
    {
        let mut outcomes = api.receipt_outcomes.lock().await;
        outcomes.push(Ok("receipt-1".to_string()));
        outcomes.push(Err(DutchpayError::RecognitionFailure(
            "blurry image".to_string(),
        )));
    }
    let service = test_service(api);

    service.upload(vec![1]).await.unwrap();
    let result = service.upload(vec![2]).await;
    assert!(matches!(result, Err(DutchpayError::RecognitionFailure(_))));
    assert_eq!(service.receipt_id().await, Some("receipt-1".to_string()));
}

#[tokio::test]
async fn test_new_upload_supersedes_preview() {
    let api = Arc::new(MockApi::new());
    let service = test_service(api);

    let first = service.begin_upload().await;
    assert_eq!(service.preview_uri().await, Some(first.preview_uri.clone()));

    // The preview swaps immediately, independent of network completion.
    let second = service.begin_upload().await;
    assert_ne!(first.preview_uri, second.preview_uri);
    assert_eq!(service.preview_uri().await, Some(second.preview_uri));
}

#[tokio::test]
async fn test_stale_failure_is_also_discarded() {
    let api = Arc::new(MockApi::new());
    let service = test_service(api);

    let ticket_a = service.begin_upload().await;
    let ticket_b = service.begin_upload().await;
    service
        .complete_upload(&ticket_b, Ok("receipt-b".to_string()))
        .await
        .unwrap();

    // A stale error must neither surface nor disturb the committed id.
    let result = service
        .complete_upload(&ticket_a, Err(DutchpayError::NetworkTimeout))
        .await;
    assert!(matches!(result, Ok(None)));
    assert_eq!(service.receipt_id().await, Some("receipt-b".to_string()));
}
