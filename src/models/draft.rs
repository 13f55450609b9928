/// In-progress settlement request, assembled one field-group per wizard
/// step. Typed fields are `None` while the corresponding input is still
/// unparseable, so intermediate keystrokes never produce an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementDraft {
    pub meeting_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub total_amount: Option<u64>,
    pub participant_count: Option<u32>,
    pub receipt_id: Option<String>,
}

impl SettlementDraft {
    /// Submission precondition: every string field non-empty, amount and
    /// headcount parsed, at least one participant, receipt attached.
    pub fn is_submittable(&self) -> bool {
        !self.meeting_name.trim().is_empty()
            && !self.bank_name.trim().is_empty()
            && !self.account_number.trim().is_empty()
            && !self.account_holder.trim().is_empty()
            && self.total_amount.is_some()
            && self.participant_count.is_some_and(|n| n >= 1)
            && self.receipt_id.is_some()
    }
}
