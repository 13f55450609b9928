pub mod draft;
pub mod meeting;
pub mod payer;
pub mod settlement;
pub mod transfer;

pub use draft::SettlementDraft;
pub use meeting::MeetingRecord;
pub use payer::PayerInfo;
pub use settlement::SingleSettlementRequest;
pub use transfer::TransferIntent;
