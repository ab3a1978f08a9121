//! Home screen data: month analytics plus recent transactions.
//!
//! Two backend calls feed one view model. The analytics summary is optional
//! (its failure is only announced); the expense list is required.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_api;
use crate::api::ExpenseApi;
use crate::error::{ApiError, DashboardError};
use crate::models::{AnalyticsSummary, ExpenseItem, ExpenseListEntry, RECENT_FALLBACK_LIMIT};
use crate::period::MonthRange;
use crate::session::{use_session, Session};
use crate::toast::{use_toast, Toast};
use crate::transport::CancelToken;

pub const SIGN_IN_PROMPT: &str = "Please sign in to view your expenses";

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub summary: AnalyticsSummary,
    pub expenses: Vec<ExpenseItem>,
}

/// Recent transactions come from the summary when it has any, otherwise
/// from the head of the raw list.
pub fn reconcile(summary: Option<AnalyticsSummary>, raw: Vec<ExpenseListEntry>) -> DashboardData {
    let expenses = match &summary {
        Some(summary) if !summary.recent_expenses.is_empty() => {
            summary.recent_expenses.iter().map(ExpenseItem::from).collect()
        }
        _ => raw
            .into_iter()
            .take(RECENT_FALLBACK_LIMIT)
            .map(ExpenseItem::from)
            .collect(),
    };

    DashboardData {
        summary: summary.unwrap_or_default(),
        expenses,
    }
}

pub async fn load_dashboard(
    session: &Session,
    api: &ExpenseApi,
    range: MonthRange,
    cancel: &CancelToken,
    notify: &Callback<Toast>,
) -> Result<DashboardData, DashboardError> {
    let result = fetch_dashboard(session, api, range, cancel, notify).await;

    if let Err(err) = &result {
        match err {
            DashboardError::NotSignedIn | DashboardError::MissingToken => {
                notify.emit(Toast::error("Auth Error", err.to_string()));
            }
            DashboardError::ExpensesUnavailable { status, body } => {
                notify.emit(Toast::error(
                    "Expenses Error",
                    format!("Failed to fetch expenses: {} - {}", status, body),
                ));
            }
            DashboardError::Failed(message) => {
                if !cancel.is_cancelled() {
                    notify.emit(Toast::error("Error", message.clone()));
                }
            }
        }
        log::error!("dashboard fetch failed: {}", err);
    }
    result
}

async fn fetch_dashboard(
    session: &Session,
    api: &ExpenseApi,
    range: MonthRange,
    cancel: &CancelToken,
    notify: &Callback<Toast>,
) -> Result<DashboardData, DashboardError> {
    if !session.is_signed_in() {
        return Err(DashboardError::NotSignedIn);
    }

    let token = match session.token().await {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return Err(DashboardError::MissingToken),
        Err(err) => return Err(DashboardError::Failed(err.to_string())),
    };

    let (analytics, listed) = futures::join!(
        api.analytics_summary(&token, range, cancel),
        api.list_expenses(&token, cancel),
    );

    let summary = match analytics {
        Ok(summary) => Some(summary),
        Err(ApiError::Cancelled) => None,
        Err(err) => {
            let message = match &err {
                ApiError::Status { body, .. } => format!("Failed to fetch analytics: {}", body),
                other => other.to_string(),
            };
            log::warn!("analytics unavailable: {}", err);
            notify.emit(Toast::error("Analytics Error", message));
            None
        }
    };

    let raw = listed.map_err(|err| match err {
        ApiError::Status { status, body } => DashboardError::ExpensesUnavailable { status, body },
        other => DashboardError::Failed(other.to_string()),
    })?;

    Ok(reconcile(summary, raw))
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub loading: bool,
    pub summary: Option<AnalyticsSummary>,
    pub expenses: Vec<ExpenseItem>,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            summary: None,
            expenses: Vec::new(),
            error: None,
        }
    }
}

pub enum DashboardAction {
    Started,
    Settled(Result<DashboardData, DashboardError>),
    SignInRequired,
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::Started => {
                next.loading = true;
                next.error = None;
            }
            DashboardAction::Settled(Ok(data)) => {
                next.loading = false;
                next.summary = Some(data.summary);
                next.expenses = data.expenses;
            }
            DashboardAction::Settled(Err(err)) => {
                next.loading = false;
                next.error = Some(err.to_string());
            }
            DashboardAction::SignInRequired => {
                next.loading = false;
                next.error = Some(SIGN_IN_PROMPT.to_string());
            }
        }
        Rc::new(next)
    }
}

pub struct UseAnalyticsSummary {
    pub state: UseReducerHandle<DashboardState>,
    pub refetch: Callback<()>,
}

#[hook]
pub fn use_analytics_summary() -> UseAnalyticsSummary {
    let session = use_session().session;
    let api = use_api();
    let notify = use_toast();
    let state = use_reducer(DashboardState::default);
    let cancel = use_mut_ref(CancelToken::new);

    let refetch = {
        let dispatcher = state.dispatcher();
        let session = session.clone();
        let cancel = cancel.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            let api = api.clone();
            let notify = notify.clone();
            let cancel = cancel.borrow().clone();
            dispatcher.dispatch(DashboardAction::Started);
            spawn_local(async move {
                let result = load_dashboard(&session, &api, MonthRange::current(), &cancel, &notify).await;
                if cancel.is_cancelled() {
                    return;
                }
                dispatcher.dispatch(DashboardAction::Settled(result));
            });
        })
    };

    {
        let dispatcher = state.dispatcher();
        let refetch = refetch.clone();
        use_effect_with_deps(
            move |(loaded, signed_in): &(bool, bool)| {
                let token = CancelToken::new();
                *cancel.borrow_mut() = token.clone();

                if *loaded {
                    if *signed_in {
                        refetch.emit(());
                    } else {
                        dispatcher.dispatch(DashboardAction::SignInRequired);
                        notify.emit(Toast::info("Sign In Required", SIGN_IN_PROMPT));
                    }
                }
                move || token.cancel()
            },
            (session.is_loaded(), session.is_signed_in()),
        );
    }

    UseAnalyticsSummary {
        state,
        refetch,
    }
}
