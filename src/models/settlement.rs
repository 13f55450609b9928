use serde::{Deserialize, Serialize};

/// Payload for creating a single-payer settlement. `meeting_num` is the
/// opaque meeting identifier produced before the wizard starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSettlementRequest {
    pub meeting_num: String,
    pub bank_name: String,
    pub account_number: String,
    pub payer: String,
    pub total_amount: u64,
    pub num_people: u32,
    pub receipt_id: String,
}
