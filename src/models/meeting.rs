use serde::{Deserialize, Serialize};

/// Single-payer settlement record as served by the backend. The wire format
/// mixes naming styles, so every divergent field is renamed explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeetingRecord {
    #[serde(rename = "meetingName")]
    pub meeting_name: String,
    #[serde(rename = "total_amount")]
    pub total_amount: u64,
    #[serde(rename = "num_people")]
    pub num_people: u32,
    pub bank: String,
    #[serde(rename = "account_num")]
    pub account_num: String,
    pub payer: String,
}
