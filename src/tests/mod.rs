mod receipt_tests;

use crate::api::SettlementApi;
use crate::error::DutchpayError;
use crate::models::{MeetingRecord, PayerInfo, SingleSettlementRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scripted stand-in for the backend settlement API.
#[derive(Default)]
pub struct MockApi {
    pub meeting: Mutex<Option<MeetingRecord>>,
    pub meeting_calls: Mutex<u32>,
    pub settler_meeting_name: Mutex<Option<String>>,
    /// When set, `fetch_settler_meeting_name` blocks until notified.
    pub settler_gate: Option<Arc<Notify>>,
    pub payer_infos: Mutex<Option<Vec<PayerInfo>>>,
    /// Outcomes consumed front-to-back, one per `recognize_receipt` call.
    pub receipt_outcomes: Mutex<Vec<Result<String, DutchpayError>>>,
    /// Outcomes consumed front-to-back; empty means accept with a fixed link.
    pub submit_outcomes: Mutex<Vec<Result<String, DutchpayError>>>,
    pub submitted: Mutex<Vec<SingleSettlementRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi::default()
    }

    pub fn with_meeting(record: MeetingRecord) -> Self {
        let api = MockApi::default();
        *api.meeting.try_lock().unwrap() = Some(record);
        api
    }
}

#[async_trait]
impl SettlementApi for MockApi {
    async fn fetch_meeting(&self, link: &str) -> Result<MeetingRecord, DutchpayError> {
        *self.meeting_calls.lock().await += 1;
        self.meeting
            .lock()
            .await
            .clone()
            .ok_or_else(|| DutchpayError::NotFound(link.to_string()))
    }

    async fn fetch_settler_meeting_name(&self, link: &str) -> Result<String, DutchpayError> {
        if let Some(gate) = &self.settler_gate {
            gate.notified().await;
        }
        self.settler_meeting_name
            .lock()
            .await
            .clone()
            .ok_or_else(|| DutchpayError::NotFound(link.to_string()))
    }

    async fn fetch_payer_infos(&self, settler_id: &str) -> Result<Vec<PayerInfo>, DutchpayError> {
        self.payer_infos
            .lock()
            .await
            .clone()
            .ok_or_else(|| DutchpayError::NotFound(settler_id.to_string()))
    }

    async fn recognize_receipt(&self, _image: Vec<u8>) -> Result<String, DutchpayError> {
        let mut outcomes = self.receipt_outcomes.lock().await;
        if outcomes.is_empty() {
            return Err(DutchpayError::RecognitionFailure(
                "no scripted outcome".to_string(),
            ));
        }
        outcomes.remove(0)
    }

    async fn create_single_settlement(
        &self,
        request: SingleSettlementRequest,
    ) -> Result<String, DutchpayError> {
        self.submitted.lock().await.push(request);
        let mut outcomes = self.submit_outcomes.lock().await;
        if outcomes.is_empty() {
            Ok("created-link".to_string())
        } else {
            outcomes.remove(0)
        }
    }
}

pub fn sample_meeting() -> MeetingRecord {
    MeetingRecord {
        meeting_name: "동기 회식".to_string(),
        total_amount: 300_000,
        num_people: 3,
        bank: "토스".to_string(),
        account_num: "123456789".to_string(),
        payer: "김정산".to_string(),
    }
}
