pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod receipt;
pub mod resolver;
pub mod share;
pub mod transfer;
pub mod wizard;

pub use error::DutchpayError;
pub use receipt::ReceiptIntakeService;
pub use resolver::LinkResolver;
pub use transfer::{FocusSignal, TransferLauncher};
pub use wizard::WizardController;

#[cfg(test)]
mod tests; // Include integration tests
