use crate::error::DutchpayError;
use crate::models::TransferIntent;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::broadcast;

/// Deep-link scheme for each supported bank. Extending support means adding
/// a row here.
const BANK_URL_SCHEMES: [(&str, &str); 5] = [
    ("토스", "supertoss://send"),
    ("국민", "kbbank://send"),
    ("카카오뱅크", "kakaobank://send"),
    ("신한", "shinhan-sr-ansimclick://send"),
    ("농협", "nhallonepayansimclick://send"),
];

pub fn bank_scheme(bank: &str) -> Option<&'static str> {
    BANK_URL_SCHEMES
        .iter()
        .find(|(name, _)| *name == bank)
        .map(|(_, scheme)| *scheme)
}

pub fn supported_banks() -> impl Iterator<Item = &'static str> {
    BANK_URL_SCHEMES.iter().map(|(name, _)| *name)
}

/// Hands a scheme URI off to the hosting environment. Launching is a
/// best-effort, fire-and-forget navigation whose success cannot be
/// observed, so it sits behind a trait and tests substitute a recorder.
pub trait SchemeLauncher: Send + Sync {
    fn launch_scheme(&self, uri: &str) -> Result<(), DutchpayError>;
}

/// Launcher for hosts without a navigable page context; reports the handoff
/// at info level and trusts the operator to follow the link.
pub struct LogSchemeLauncher;

impl SchemeLauncher for LogSchemeLauncher {
    fn launch_scheme(&self, uri: &str) -> Result<(), DutchpayError> {
        info!("Launching external scheme {}", uri);
        Ok(())
    }
}

/// Publisher side of the window-focus signal. The host calls
/// `focus_regained` whenever the window returns to the foreground;
/// armed watchers subscribe to it.
#[derive(Clone)]
pub struct FocusSignal {
    tx: broadcast::Sender<()>,
}

impl FocusSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(8);
        FocusSignal { tx }
    }

    pub fn focus_regained(&self) {
        // No receiver just means nothing is armed right now.
        let _ = self.tx.send(());
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for FocusSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Focus subscription for one armed transfer intent. Dropping it
/// unsubscribes, so re-arming or resetting can never stack listeners.
struct FocusConfirmationWatcher {
    rx: broadcast::Receiver<()>,
}

impl FocusConfirmationWatcher {
    fn arm(signal: &FocusSignal) -> Self {
        FocusConfirmationWatcher {
            rx: signal.subscribe(),
        }
    }

    /// Resolves true on the next focus event.
    async fn focus_regained(&mut self) -> bool {
        loop {
            match self.rx.recv().await {
                Ok(()) => return true,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    Armed(TransferIntent),
    Confirmed,
}

/// Maps a chosen bank to its deep-link scheme, launches it, and watches for
/// the window regaining focus afterwards. The first focus event after a
/// launch is read as "the payer went to the bank app and came back" and
/// produces a redirect to the confirmation view. This is a heuristic, not a
/// verified payment: switching away and back without paying triggers it
/// just the same.
pub struct TransferLauncher<L: SchemeLauncher> {
    launcher: L,
    link_id: String,
    state: TransferState,
    watcher: Option<FocusConfirmationWatcher>,
}

impl<L: SchemeLauncher> TransferLauncher<L> {
    pub fn new(launcher: L, link_id: impl Into<String>) -> Self {
        TransferLauncher {
            launcher,
            link_id: link_id.into(),
            state: TransferState::Idle,
            watcher: None,
        }
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// Launches the bank's deep link and arms the focus watcher. An
    /// unmapped bank fails with `UnknownBank` and performs no navigation.
    /// Re-arming with another bank replaces both the intent and the
    /// subscription.
    pub fn launch(&mut self, bank: &str, focus: &FocusSignal) -> Result<(), DutchpayError> {
        let Some(scheme) = bank_scheme(bank) else {
            warn!("No deep-link scheme for bank {:?}", bank);
            return Err(DutchpayError::UnknownBank(bank.to_string()));
        };
        self.launcher.launch_scheme(scheme)?;
        info!("Launched {} for bank {}", scheme, bank);
        self.watcher = Some(FocusConfirmationWatcher::arm(focus));
        self.state = TransferState::Armed(TransferIntent {
            bank: bank.to_string(),
            scheme: scheme.to_string(),
            armed_at: Utc::now(),
        });
        Ok(())
    }

    /// Waits for the first focus event after arming and returns the
    /// confirmation route for the original link. Returns `None` when no
    /// intent is armed (including after a confirmation already fired), so a
    /// second focus event never produces a second redirect.
    pub async fn await_confirmation(&mut self) -> Option<String> {
        if !matches!(self.state, TransferState::Armed(_)) {
            return None;
        }
        let watcher = self.watcher.as_mut()?;
        if !watcher.focus_regained().await {
            return None;
        }
        self.state = TransferState::Confirmed;
        self.watcher = None;
        debug!("Focus regained while armed; confirming link {}", self.link_id);
        Some(format!("/check-detail/{}", self.link_id))
    }

    /// Navigation away from the view: clears the armed intent and drops the
    /// focus subscription.
    pub fn reset(&mut self) {
        self.watcher = None;
        self.state = TransferState::Idle;
    }
}
