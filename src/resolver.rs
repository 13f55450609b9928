use crate::api::SettlementApi;
use crate::error::DutchpayError;
use crate::models::{MeetingRecord, PayerInfo};
use crate::share::{self, ShareBreakdown};
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Display projection of a single-payer settlement link: the meeting record
/// run through the share computation, with formatted amounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetingView {
    pub meeting_name: String,
    pub total_amount: u64,
    pub per_person: u64,
    pub total_display: String,
    pub per_person_display: String,
    pub num_people: u32,
    pub bank: String,
    pub account_num: String,
    pub payer: String,
}

impl MeetingView {
    fn project(record: MeetingRecord) -> Result<Self, DutchpayError> {
        let ShareBreakdown { per_person, total } =
            share::compute_share(record.total_amount, record.num_people)?;
        Ok(MeetingView {
            meeting_name: record.meeting_name,
            total_amount: total,
            per_person,
            total_display: share::format_amount(total),
            per_person_display: share::format_amount(per_person),
            num_people: record.num_people,
            bank: record.bank,
            account_num: record.account_num,
            payer: record.payer,
        })
    }

    /// The copyable transfer target line, e.g. `"토스 123456789"`.
    pub fn transfer_target(&self) -> String {
        format!("{} {}", self.bank, self.account_num)
    }
}

/// Multi-payer view. The meeting name and the payer table come from
/// independent fetches, so each slot fills on its own; `None` means that
/// side is still loading (or failed and stays empty).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiSettlementView {
    pub meeting_name: Option<String>,
    pub payer_infos: Option<Vec<PayerInfo>>,
}

/// Resolves a distributed settlement link into its display model. Each
/// distinct link value triggers resolution exactly once; a route change
/// supersedes any resolution still in flight, whose results are then
/// discarded instead of committed.
pub struct LinkResolver<A: SettlementApi> {
    api: Arc<A>,
    current_route: Mutex<Option<String>>,
    meeting: RwLock<Option<MeetingView>>,
    multi: RwLock<MultiSettlementView>,
}

impl<A: SettlementApi> LinkResolver<A> {
    pub fn new(api: Arc<A>) -> Self {
        LinkResolver {
            api,
            current_route: Mutex::new(None),
            meeting: RwLock::new(None),
            multi: RwLock::new(MultiSettlementView::default()),
        }
    }

    async fn is_current(&self, route: &str) -> bool {
        self.current_route.lock().await.as_deref() == Some(route)
    }

    /// Takes ownership of the given route key, clearing both views. Returns
    /// false when the route is already current (no re-fetch).
    async fn take_route(&self, route: &str) -> bool {
        let mut current = self.current_route.lock().await;
        if current.as_deref() == Some(route) {
            debug!("Route {} already resolved", route);
            return false;
        }
        *current = Some(route.to_string());
        *self.meeting.write().await = None;
        *self.multi.write().await = MultiSettlementView::default();
        true
    }

    /// One-shot fetch and projection of a single-payer link.
    pub async fn resolve_meeting(&self, link: &str) -> Result<MeetingView, DutchpayError> {
        let record = self.api.fetch_meeting(link).await?;
        MeetingView::project(record)
    }

    /// Route-change hook for the single-payer view. Re-resolves exactly
    /// once per distinct link value; the view stays `None` until resolved,
    /// and an unresolvable link is reported without touching a newer view.
    pub async fn ensure_meeting(&self, link: &str) -> Result<(), DutchpayError> {
        if !self.take_route(link).await {
            return Ok(());
        }
        let result = self.api.fetch_meeting(link).await;
        if !self.is_current(link).await {
            debug!("Resolution of {} superseded, discarding", link);
            return Ok(());
        }
        match result {
            Ok(record) => {
                *self.meeting.write().await = Some(MeetingView::project(record)?);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to resolve meeting {}: {}", link, err);
                Err(err)
            }
        }
    }

    /// Route-change hook for the multi-payer view. The meeting-name and
    /// payer-list fetches are independent and may finish in either order;
    /// each commits into its own slot the moment it completes, so the view
    /// renders partial data while the slower fetch is still out.
    pub async fn ensure_multi(&self, link: &str, settler_id: &str) {
        let route = format!("{}/settler/{}", link, settler_id);
        if !self.take_route(&route).await {
            return;
        }

        let name_side = async {
            match self.api.fetch_settler_meeting_name(link).await {
                Ok(name) => {
                    if self.is_current(&route).await {
                        self.multi.write().await.meeting_name = Some(name);
                    }
                }
                Err(err) => warn!("Failed to fetch meeting name for {}: {}", link, err),
            }
        };
        let payers_side = async {
            match self.api.fetch_payer_infos(settler_id).await {
                Ok(infos) => {
                    if self.is_current(&route).await {
                        self.multi.write().await.payer_infos = Some(infos);
                    }
                }
                Err(err) => warn!("Failed to fetch payer infos for {}: {}", settler_id, err),
            }
        };
        futures::join!(name_side, payers_side);
    }

    pub async fn meeting_view(&self) -> Option<MeetingView> {
        self.meeting.read().await.clone()
    }

    pub async fn multi_view(&self) -> MultiSettlementView {
        self.multi.read().await.clone()
    }
}
