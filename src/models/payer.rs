use serde::{Deserialize, Serialize};

/// One participant who owes a share to the settler. A settlement link
/// resolves to an ordered list of these; display order is server order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayerInfo {
    pub name: String,
    pub share_amount: u64,
    pub bank: String,
    pub account_num: String,
}
