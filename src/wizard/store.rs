use crate::models::SettlementDraft;
use log::debug;

/// Wizard-scoped draft state. Owned by the controller for the lifetime of
/// one wizard session; no other component writes it. Cleared on successful
/// submission and dropped with the wizard otherwise.
#[derive(Debug, Default)]
pub struct SettlementDraftStore {
    draft: SettlementDraft,
}

impl SettlementDraftStore {
    pub fn new() -> Self {
        SettlementDraftStore {
            draft: SettlementDraft::default(),
        }
    }

    pub fn draft(&self) -> &SettlementDraft {
        &self.draft
    }

    pub fn set_meeting_name(&mut self, name: &str) {
        self.draft.meeting_name = name.to_string();
    }

    pub fn set_bank_account(&mut self, bank_name: String, account_number: String) {
        self.draft.bank_name = bank_name;
        self.draft.account_number = account_number;
    }

    pub fn set_account_holder(&mut self, holder: &str) {
        self.draft.account_holder = holder.to_string();
    }

    pub fn set_total_amount(&mut self, amount: Option<u64>) {
        self.draft.total_amount = amount;
    }

    pub fn set_participant_count(&mut self, count: Option<u32>) {
        self.draft.participant_count = count;
    }

    pub fn set_receipt_id(&mut self, receipt_id: String) {
        debug!("Receipt {} attached to draft", receipt_id);
        self.draft.receipt_id = Some(receipt_id);
    }

    pub fn clear(&mut self) {
        debug!("Clearing settlement draft");
        self.draft = SettlementDraft::default();
    }
}
