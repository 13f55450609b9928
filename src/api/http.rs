use crate::api::SettlementApi;
use crate::config::CONFIG;
use crate::error::DutchpayError;
use crate::models::{MeetingRecord, PayerInfo, SingleSettlementRequest};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct SettlerData {
    #[serde(rename = "meetingName")]
    meeting_name: String,
}

#[derive(Deserialize)]
struct PayerInfoData {
    #[serde(rename = "payerInfos")]
    payer_infos: Vec<PayerInfo>,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(rename = "isSuccess")]
    is_success: bool,
    data: Option<ReceiptData>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ReceiptData {
    #[serde(rename = "receiptId")]
    receipt_id: String,
}

#[derive(Deserialize)]
struct SettlementLinkData {
    link: String,
}

pub struct HttpSettlementApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSettlementApi {
    pub fn new() -> Result<Self, DutchpayError> {
        Self::with_base_url(CONFIG.api_base_url.clone())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, DutchpayError> {
        // Bounded timeout so a dead backend fails the call instead of
        // hanging the flow.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CONFIG.request_timeout_secs))
            .build()
            .map_err(|e| DutchpayError::NetworkError(e.to_string()))?;
        Ok(HttpSettlementApi { client, base_url })
    }
}

#[async_trait]
impl SettlementApi for HttpSettlementApi {
    async fn fetch_meeting(&self, link: &str) -> Result<MeetingRecord, DutchpayError> {
        debug!("Fetching meeting for link {}", link);
        let response = self
            .client
            .get(format!("{}/api/meetings/{}", self.base_url, link))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DutchpayError::NotFound(link.to_string()));
        }
        let envelope: Envelope<MeetingRecord> = response.error_for_status()?.json().await?;
        Ok(envelope.data)
    }

    async fn fetch_settler_meeting_name(&self, link: &str) -> Result<String, DutchpayError> {
        debug!("Fetching settler meeting name for link {}", link);
        let response = self
            .client
            .get(format!("{}/api/settler/{}", self.base_url, link))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DutchpayError::NotFound(link.to_string()));
        }
        let envelope: Envelope<SettlerData> = response.error_for_status()?.json().await?;
        Ok(envelope.data.meeting_name)
    }

    async fn fetch_payer_infos(&self, settler_id: &str) -> Result<Vec<PayerInfo>, DutchpayError> {
        debug!("Fetching payer infos for settler {}", settler_id);
        let response = self
            .client
            .get(format!("{}/api/payers/info/{}", self.base_url, settler_id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DutchpayError::NotFound(settler_id.to_string()));
        }
        let envelope: Envelope<PayerInfoData> = response.error_for_status()?.json().await?;
        Ok(envelope.data.payer_infos)
    }

    async fn recognize_receipt(&self, image: Vec<u8>) -> Result<String, DutchpayError> {
        debug!("Uploading receipt image ({} bytes)", image.len());
        let part = reqwest::multipart::Part::bytes(image).file_name("receipt.jpg");
        let form = reqwest::multipart::Form::new().part("file", part);
        let response: RecognizeResponse = self
            .client
            .post(format!("{}/api/receipt/recognize", self.base_url))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !response.is_success {
            let message = response
                .message
                .unwrap_or_else(|| "recognition rejected".to_string());
            warn!("Receipt recognition rejected: {}", message);
            return Err(DutchpayError::RecognitionFailure(message));
        }
        response
            .data
            .map(|d| d.receipt_id)
            .ok_or_else(|| DutchpayError::RecognitionFailure("missing receipt id".to_string()))
    }

    async fn create_single_settlement(
        &self,
        request: SingleSettlementRequest,
    ) -> Result<String, DutchpayError> {
        debug!(
            "Submitting single settlement for meeting {}",
            request.meeting_num
        );
        let envelope: Envelope<SettlementLinkData> = self
            .client
            .post(format!("{}/api/settlement/single", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data.link)
    }
}
