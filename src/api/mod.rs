use crate::error::DutchpayError;
use crate::models::{MeetingRecord, PayerInfo, SingleSettlementRequest};
use async_trait::async_trait;

/// Backend settlement and receipt-recognition API. Consumed as an external
/// collaborator; every method maps to one HTTP endpoint.
#[async_trait]
pub trait SettlementApi: Send + Sync {
    async fn fetch_meeting(&self, link: &str) -> Result<MeetingRecord, DutchpayError>;
    async fn fetch_settler_meeting_name(&self, link: &str) -> Result<String, DutchpayError>;
    async fn fetch_payer_infos(&self, settler_id: &str) -> Result<Vec<PayerInfo>, DutchpayError>;
    async fn recognize_receipt(&self, image: Vec<u8>) -> Result<String, DutchpayError>;
    async fn create_single_settlement(
        &self,
        request: SingleSettlementRequest,
    ) -> Result<String, DutchpayError>;
}

pub mod http;
