use crate::api::SettlementApi;
use crate::error::DutchpayError;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Identity of one issued upload: the sequence number decides whether its
/// response is still authoritative when it comes back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTicket {
    pub seq: u64,
    pub preview_uri: String,
}

#[derive(Debug, Default)]
struct ReceiptState {
    issued_seq: u64,
    receipt_id: Option<String>,
    preview_uri: Option<String>,
}

/// Exchanges a receipt image for a receipt id through the recognition API.
/// A new upload supersedes any in-flight one: in-flight requests are not
/// cancelled, but a response is only committed if its sequence number is
/// still the latest issued, so a slow response for a stale image can never
/// overwrite a newer receipt id.
pub struct ReceiptIntakeService<A: SettlementApi> {
    api: Arc<A>,
    state: Mutex<ReceiptState>,
}

impl<A: SettlementApi> ReceiptIntakeService<A> {
    pub fn new(api: Arc<A>) -> Self {
        ReceiptIntakeService {
            api,
            state: Mutex::new(ReceiptState::default()),
        }
    }

    /// Registers a new upload: bumps the sequence counter and swaps in a
    /// fresh local preview URI, revoking the previous one. The preview is
    /// available immediately, independent of network completion.
    pub async fn begin_upload(&self) -> UploadTicket {
        let mut state = self.state.lock().await;
        state.issued_seq += 1;
        let preview_uri = format!("local-receipt://{}", Uuid::new_v4());
        state.preview_uri = Some(preview_uri.clone());
        debug!("Issued receipt upload #{}", state.issued_seq);
        UploadTicket {
            seq: state.issued_seq,
            preview_uri,
        }
    }

    /// Commits a recognition outcome. Responses for superseded uploads are
    /// discarded (`Ok(None)`); failures surface as recoverable errors and
    /// leave any previously committed receipt id untouched.
    pub async fn complete_upload(
        &self,
        ticket: &UploadTicket,
        outcome: Result<String, DutchpayError>,
    ) -> Result<Option<String>, DutchpayError> {
        let mut state = self.state.lock().await;
        if ticket.seq != state.issued_seq {
            debug!(
                "Discarding stale receipt response #{} (latest is #{})",
                ticket.seq, state.issued_seq
            );
            return Ok(None);
        }
        match outcome {
            Ok(receipt_id) => {
                info!("Receipt recognized: {}", receipt_id);
                state.receipt_id = Some(receipt_id.clone());
                Ok(Some(receipt_id))
            }
            Err(err) => {
                warn!("Receipt recognition failed: {}", err);
                Err(err)
            }
        }
    }

    /// Uploads one receipt image and exchanges it for a receipt id.
    /// Returns `Ok(None)` when a newer upload superseded this one while its
    /// request was in flight.
    pub async fn upload(&self, image: Vec<u8>) -> Result<Option<String>, DutchpayError> {
        let ticket = self.begin_upload().await;
        let outcome = self.api.recognize_receipt(image).await;
        self.complete_upload(&ticket, outcome).await
    }

    pub async fn receipt_id(&self) -> Option<String> {
        self.state.lock().await.receipt_id.clone()
    }

    pub async fn preview_uri(&self) -> Option<String> {
        self.state.lock().await.preview_uri.clone()
    }
}
