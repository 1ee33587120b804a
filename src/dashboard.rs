// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The state behind one dashboard screen.
//!
//! Front ends feed user intents into [`Dashboard::dispatch`] and render
//! whatever [`Dashboard::view`] returns. Mutating calls take `&mut self`,
//! so a second save or delete cannot start while one is in flight, and a
//! view is never built mid-call. A renderer that must show progress holds
//! an [`InFlight`] handle from [`Dashboard::in_flight`] instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::aggregate::{DerivedView, Period, Totals, TrendPoint};
use crate::colors::{Color, ColorTable, ColoredCategory};
use crate::config::Config;
use crate::coordinator::MutationCoordinator;
use crate::errors::{DashboardError, ServiceError};
use crate::models::{Submission, Transaction, TransactionForm, TransactionId, TxType};
use crate::notice::{Notice, NoticeBoard};
use crate::remote::LedgerService;
use crate::session::EditSession;
use crate::store::LedgerStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetFilter(Period),
    Submit(TransactionForm),
    BeginEdit(TransactionId),
    CancelEdit,
    Delete(TransactionId),
    SetCategoryColor { category: String, color: Color },
    SetTrendColor { kind: TxType, color: Color },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendColors {
    pub income: Color,
    pub expense: Color,
}

/// Shared flag that is set while a service call is pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn enter(&self) -> InFlightGuard {
        self.0.store(true, Ordering::Release);
        InFlightGuard(self.0.clone())
    }
}

/// Clears the flag on drop, including when the call's future is dropped.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub period: Period,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub categories: Vec<ColoredCategory>,
    pub trend: Vec<TrendPoint>,
    pub trend_colors: TrendColors,
    pub session: EditSession,
    pub form_title: &'static str,
    pub form: TransactionForm,
    pub notice: Option<Notice>,
    pub highlighted: Option<TransactionId>,
}

pub struct Dashboard {
    coordinator: MutationCoordinator,
    store: LedgerStore,
    period: Period,
    session: EditSession,
    colors: ColorTable,
    notices: NoticeBoard,
    in_flight: InFlight,
    mounted: bool,
}

impl Dashboard {
    pub fn new(service: Arc<dyn LedgerService>, notice_ttl: Duration) -> Self {
        Self {
            coordinator: MutationCoordinator::new(service),
            store: LedgerStore::new(),
            period: Period::current(),
            session: EditSession::default(),
            colors: ColorTable::new(),
            notices: NoticeBoard::new(notice_ttl),
            in_flight: InFlight::default(),
            mounted: true,
        }
    }

    pub fn from_config(service: Arc<dyn LedgerService>, config: &Config) -> Self {
        let mut d = Self::new(service, config.notice_ttl());
        if let Some(seed) = config.color_seed {
            d.colors = ColorTable::with_seed(seed);
        }
        d
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    /// Loads the full ledger from the service, replacing the store.
    pub async fn refresh(&mut self) -> Result<usize, ServiceError> {
        let _busy = self.in_flight.enter();
        self.coordinator.load(&mut self.store).await
    }

    /// Applies one user intent. Mutations return the notice they produced.
    ///
    /// Validation failures and unknown ids are returned as errors without
    /// contacting the service or posting a notice.
    pub async fn dispatch(
        &mut self,
        intent: Intent,
        now: Instant,
    ) -> Result<Option<Notice>, DashboardError> {
        match intent {
            Intent::SetFilter(p) => {
                self.period = p;
                Ok(None)
            }
            Intent::Submit(form) => self.submit(&form, now).await.map(Some),
            Intent::BeginEdit(id) => {
                let record = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or(DashboardError::UnknownTransaction(id))?;
                self.session.begin(record);
                Ok(None)
            }
            Intent::CancelEdit => {
                self.session.cancel();
                Ok(None)
            }
            Intent::Delete(id) => Ok(Some(self.delete(&id, now).await)),
            Intent::SetCategoryColor { category, color } => {
                self.colors.set_category(&category, color);
                Ok(None)
            }
            Intent::SetTrendColor { kind, color } => {
                self.colors.set_trend(kind, color);
                Ok(None)
            }
        }
    }

    async fn submit(&mut self, form: &TransactionForm, now: Instant) -> Result<Notice, DashboardError> {
        let draft = form.validate()?;
        let submission = Submission {
            id: self.session.target_id().cloned(),
            draft,
        };
        self.notices.clear();
        let notice = {
            let _busy = self.in_flight.enter();
            self.coordinator
                .save(&mut self.store, &mut self.session, submission)
                .await
        };
        self.post(notice.clone(), now);
        Ok(notice)
    }

    async fn delete(&mut self, id: &TransactionId, now: Instant) -> Notice {
        self.notices.clear();
        let notice = {
            let _busy = self.in_flight.enter();
            self.coordinator.delete(&mut self.store, id).await
        };
        // A record that no longer exists cannot stay under edit
        if !notice.is_error() && self.session.target_id() == Some(id) {
            self.session.cancel();
        }
        self.post(notice.clone(), now);
        notice
    }

    fn post(&mut self, notice: Notice, now: Instant) {
        if self.mounted {
            self.notices.post(notice, now);
        } else {
            tracing::debug!(message = %notice.message, "notice dropped, dashboard unmounted");
        }
    }

    /// Stops posting notices. Later mutations still update the store.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.notices.clear();
    }

    /// Expires the current notice if its time is up.
    pub fn tick(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    pub fn view(&mut self, now: Instant) -> DashboardView {
        let derived = DerivedView::compute(self.store.records(), self.period);
        let notice = self.notices.current(now).cloned();
        DashboardView {
            period: derived.period,
            categories: self.colors.paint(&derived.categories),
            trend_colors: TrendColors {
                income: self.colors.trend(TxType::Income),
                expense: self.colors.trend(TxType::Expense),
            },
            transactions: derived.transactions,
            totals: derived.totals,
            trend: derived.trend,
            form_title: self.session.title(),
            form: self.session.form(),
            session: self.session.clone(),
            highlighted: notice.as_ref().and_then(|n| n.record_id.clone()),
            notice,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.current(now)
    }

    /// Handle to the pending-call flag, readable while `self` is borrowed
    /// by a mutation.
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }
}
