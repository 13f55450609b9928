pub mod store;

use crate::api::SettlementApi;
use crate::error::DutchpayError;
use crate::models::{SettlementDraft, SingleSettlementRequest};
use log::{info, warn};
use std::sync::Arc;
use store::SettlementDraftStore;

/// Ordered wizard steps, one field-group each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    MeetingName,
    BankAccount,
    AccountHolder,
    Amount,
    ParticipantCount,
    Review,
}

const STEPS: [WizardStep; 6] = [
    WizardStep::MeetingName,
    WizardStep::BankAccount,
    WizardStep::AccountHolder,
    WizardStep::Amount,
    WizardStep::ParticipantCount,
    WizardStep::Review,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardState {
    /// Editing the step at the current index.
    Collecting,
    Submitting,
    /// Submission accepted; carries the created settlement link.
    Submitted(String),
}

/// Drives the multi-step settlement request form: validates each step's
/// input, advances and retreats, and assembles the draft for submission on
/// the review step. Failed submissions surface an error and return control
/// to the review step with the draft intact, so the user can retry.
pub struct WizardController<A: SettlementApi> {
    api: Arc<A>,
    store: SettlementDraftStore,
    // Opaque meeting identifier produced before the wizard starts; required
    // by the submission payload.
    meeting_num: String,
    step_index: usize,
    state: WizardState,
    last_error: Option<String>,
}

impl<A: SettlementApi> WizardController<A> {
    pub fn new(api: Arc<A>, meeting_num: impl Into<String>) -> Self {
        WizardController {
            api,
            store: SettlementDraftStore::new(),
            meeting_num: meeting_num.into(),
            step_index: 0,
            state: WizardState::Collecting,
            last_error: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        STEPS[self.step_index]
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn draft(&self) -> &SettlementDraft {
        self.store.draft()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the current step's field-group passes validation. While this
    /// is false the forward affordance stays inert; no error is raised.
    pub fn can_advance(&self) -> bool {
        let draft = self.store.draft();
        match self.current_step() {
            WizardStep::MeetingName => !draft.meeting_name.trim().is_empty(),
            WizardStep::BankAccount => {
                !draft.bank_name.is_empty() && !draft.account_number.is_empty()
            }
            WizardStep::AccountHolder => !draft.account_holder.trim().is_empty(),
            WizardStep::Amount => draft.total_amount.is_some(),
            WizardStep::ParticipantCount => draft.participant_count.is_some_and(|n| n >= 1),
            // The review step exits through submit, not advance.
            WizardStep::Review => false,
        }
    }

    /// Moves forward one step if the current step validates. Returns whether
    /// the transition happened.
    pub fn advance(&mut self) -> bool {
        if self.step_index + 1 >= STEPS.len() || !self.can_advance() {
            return false;
        }
        self.step_index += 1;
        true
    }

    /// Moves back one step. Always allowed, never validated.
    pub fn back(&mut self) -> bool {
        if self.step_index == 0 {
            return false;
        }
        self.step_index -= 1;
        true
    }

    pub fn set_meeting_name_input(&mut self, raw: &str) {
        self.store.set_meeting_name(raw);
    }

    /// Re-splits the combined bank/account input on every edit. Partial or
    /// invalid intermediate states leave the missing field empty.
    pub fn set_bank_account_input(&mut self, raw: &str) {
        let (bank_name, account_number) = split_bank_account(raw);
        self.store.set_bank_account(bank_name, account_number);
    }

    pub fn set_account_holder_input(&mut self, raw: &str) {
        self.store.set_account_holder(raw);
    }

    pub fn set_amount_input(&mut self, raw: &str) {
        self.store.set_total_amount(raw.trim().parse::<u64>().ok());
    }

    pub fn set_participant_count_input(&mut self, raw: &str) {
        self.store
            .set_participant_count(raw.trim().parse::<u32>().ok());
    }

    pub fn attach_receipt(&mut self, receipt_id: String) {
        self.store.set_receipt_id(receipt_id);
    }

    /// Submits the assembled draft from the review step. A missing receipt
    /// is rejected client-side before any request. On success the draft is
    /// cleared and the created settlement link returned; on failure the
    /// draft survives and the wizard stays on the review step.
    pub async fn submit(&mut self) -> Result<String, DutchpayError> {
        if self.current_step() != WizardStep::Review {
            return Err(DutchpayError::InvalidInput(
                "step".to_string(),
                "submission is only available from the review step".to_string(),
            ));
        }
        let draft = self.store.draft();
        let Some(receipt_id) = draft.receipt_id.clone() else {
            warn!("Submission blocked: no receipt attached");
            return Err(DutchpayError::MissingReceipt);
        };
        if !draft.is_submittable() {
            return Err(DutchpayError::InvalidInput(
                "draft".to_string(),
                "settlement draft is incomplete".to_string(),
            ));
        }
        let total_amount = draft.total_amount.ok_or_else(|| {
            DutchpayError::InvalidInput("totalAmount".to_string(), "amount not set".to_string())
        })?;
        let num_people = draft.participant_count.ok_or_else(|| {
            DutchpayError::InvalidInput("numPeople".to_string(), "headcount not set".to_string())
        })?;
        let request = SingleSettlementRequest {
            meeting_num: self.meeting_num.clone(),
            bank_name: draft.bank_name.clone(),
            account_number: draft.account_number.clone(),
            payer: draft.account_holder.clone(),
            total_amount,
            num_people,
            receipt_id,
        };

        info!("Submitting settlement for meeting {}", self.meeting_num);
        self.state = WizardState::Submitting;
        match self.api.create_single_settlement(request).await {
            Ok(link) => {
                info!("Settlement created, link {}", link);
                self.store.clear();
                self.last_error = None;
                self.state = WizardState::Submitted(link.clone());
                Ok(link)
            }
            Err(err) => {
                warn!("Settlement submission failed: {}", err);
                // Draft is preserved; control returns to the review step.
                self.last_error = Some(err.to_string());
                self.state = WizardState::Collecting;
                Err(err)
            }
        }
    }
}

/// Splits a combined free-text input into a leading non-digit run (bank
/// name, trimmed) and the first digit run (account number). Either run may
/// be absent, leaving that field empty.
fn split_bank_account(raw: &str) -> (String, String) {
    let bank_name: String = raw.chars().take_while(|c| !c.is_ascii_digit()).collect();
    let account_number: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    (bank_name.trim().to_string(), account_number)
}
