use chrono::{DateTime, Utc};

/// A launched-but-unconfirmed bank handoff. Transient, in-memory only; at
/// most one intent is armed per launcher and re-arming replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub bank: String,
    pub scheme: String,
    pub armed_at: DateTime<Utc>,
}
