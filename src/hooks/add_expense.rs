use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_api;
use crate::api::ExpenseApi;
use crate::error::{ApiError, SubmitError};
use crate::models::ExpenseRecord;
use crate::period;
use crate::session::{use_session, Session};
use crate::toast::{use_toast, Toast};
use crate::transport::CancelToken;
use crate::validation::{ExpenseField, ExpenseForm, FieldErrors};

/// Validates the form and posts it. Nothing is sent for an invalid form.
pub async fn submit_expense(
    session: &Session,
    api: &ExpenseApi,
    form: &ExpenseForm,
    cancel: &CancelToken,
) -> Result<ExpenseRecord, SubmitError> {
    let expense = form.validate().map_err(SubmitError::Invalid)?;

    if !session.is_signed_in() {
        return Err(SubmitError::NotSignedIn);
    }
    let token = match session.token().await {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return Err(SubmitError::MissingToken),
        Err(err) => return Err(SubmitError::Rejected(err.to_string())),
    };

    api.create_expense(&token, &expense, cancel)
        .await
        .map_err(|err| match err {
            ApiError::Rejected(message) => SubmitError::Rejected(message),
            other => SubmitError::Request(other),
        })
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    Invalid(FieldErrors),
    Failed(String),
}

/// Announces the result and fires the modal callbacks. A save fires
/// `on_success` then `on_close`, once each.
pub fn finish_submission(
    result: Result<ExpenseRecord, SubmitError>,
    on_success: &Callback<()>,
    on_close: &Callback<()>,
    notify: &Callback<Toast>,
) -> SubmitOutcome {
    match result {
        Ok(record) => {
            log::info!("expense {} saved under category {}", record.id, record.category.id());
            notify.emit(Toast::success("Success", "Expense added successfully"));
            on_success.emit(());
            on_close.emit(());
            SubmitOutcome::Saved
        }
        Err(SubmitError::Invalid(errors)) => SubmitOutcome::Invalid(errors),
        Err(err) => {
            log::error!("Error adding expense: {}", err);
            let message = err.to_string();
            notify.emit(Toast::error("Error", message.clone()));
            SubmitOutcome::Failed(message)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddExpenseState {
    pub form: ExpenseForm,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub error: Option<String>,
}

impl AddExpenseState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: ExpenseForm::new(today),
            errors: FieldErrors::default(),
            submitting: false,
            error: None,
        }
    }
}

pub enum AddExpenseAction {
    Edit(ExpenseField, String),
    Reset(NaiveDate),
    Started,
    Settled(SubmitOutcome, NaiveDate),
}

impl Reducible for AddExpenseState {
    type Action = AddExpenseAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AddExpenseAction::Edit(field, value) => next.form.set(field, value),
            AddExpenseAction::Reset(today) => next = AddExpenseState::new(today),
            AddExpenseAction::Started => {
                next.submitting = true;
                next.error = None;
            }
            AddExpenseAction::Settled(SubmitOutcome::Saved, today) => {
                next = AddExpenseState::new(today);
            }
            AddExpenseAction::Settled(SubmitOutcome::Invalid(errors), _) => {
                next.submitting = false;
                next.errors = errors;
            }
            AddExpenseAction::Settled(SubmitOutcome::Failed(message), _) => {
                next.submitting = false;
                next.errors = FieldErrors::default();
                next.error = Some(message);
            }
        }
        Rc::new(next)
    }
}

pub struct UseAddExpense {
    pub state: UseReducerHandle<AddExpenseState>,
    pub set_field: Callback<(ExpenseField, String)>,
    pub submit: Callback<()>,
}

#[hook]
pub fn use_add_expense(on_success: Callback<()>, on_close: Callback<()>, visible: bool) -> UseAddExpense {
    let session = use_session().session;
    let api = use_api();
    let notify = use_toast();
    let state = use_reducer(|| AddExpenseState::new(period::today()));

    {
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |visible: &bool| {
                if *visible {
                    dispatcher.dispatch(AddExpenseAction::Reset(period::today()));
                }
                || ()
            },
            visible,
        );
    }

    let set_field = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, value): (ExpenseField, String)| {
            dispatcher.dispatch(AddExpenseAction::Edit(field, value))
        })
    };

    let submit = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            if state.submitting {
                return;
            }
            let dispatcher = state.dispatcher();
            let form = state.form.clone();
            let session = session.clone();
            let api = api.clone();
            let notify = notify.clone();
            let on_success = on_success.clone();
            let on_close = on_close.clone();

            dispatcher.dispatch(AddExpenseAction::Started);
            spawn_local(async move {
                let result = submit_expense(&session, &api, &form, &CancelToken::new()).await;
                let outcome = finish_submission(result, &on_success, &on_close, &notify);
                dispatcher.dispatch(AddExpenseAction::Settled(outcome, period::today()));
            });
        })
    };

    UseAddExpense {
        state,
        set_field,
        submit,
    }
}
