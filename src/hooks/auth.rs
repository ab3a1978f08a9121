use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::AuthError;
use crate::session::{use_session, AuthStatus, Session, SessionState};
use crate::toast::{use_toast, Toast};
use crate::validation::{FieldErrors, SignInForm, SignUpForm};

#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    /// The session was still loading; nothing happened.
    Skipped,
    Invalid(FieldErrors),
    Done,
    Failed(String),
}

pub async fn sign_in_flow(session: &Session, form: &SignInForm, notify: &Callback<Toast>) -> AuthOutcome {
    if !session.is_loaded() {
        return AuthOutcome::Skipped;
    }
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return AuthOutcome::Invalid(errors),
    };

    let identity = session.identity();
    if session.is_signed_in() {
        if let Err(err) = identity.sign_out().await {
            log::warn!("sign-out before sign-in failed: {}", err);
        }
    }

    match identity.sign_in(&credentials).await {
        Ok(()) => {
            notify.emit(Toast::success("Signin Successful", "Welcome Back"));
            AuthOutcome::Done
        }
        Err(err) => {
            log::error!("sign-in failed: {}", err);
            let title = match err {
                AuthError::UnexpectedStatus(_) => "Sign-in Error",
                _ => "Sign-in Failed",
            };
            notify.emit(Toast::error(title, err.to_string()));
            AuthOutcome::Failed(err.to_string())
        }
    }
}

pub async fn sign_up_flow(session: &Session, form: &SignUpForm, notify: &Callback<Toast>) -> AuthOutcome {
    if !session.is_loaded() {
        return AuthOutcome::Skipped;
    }
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return AuthOutcome::Invalid(errors),
    };

    match session.identity().sign_up(&credentials).await {
        Ok(()) => {
            notify.emit(Toast::success("Signup Successful", "Please Signin"));
            AuthOutcome::Done
        }
        Err(err) => {
            log::error!("sign-up failed: {}", err);
            let title = match err {
                AuthError::UnexpectedSignUpStatus(_) => "Signup Error",
                _ => "Signup Failed",
            };
            notify.emit(Toast::error(title, err.to_string()));
            AuthOutcome::Failed(err.to_string())
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthFormState {
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    pub pending: bool,
    pub error: Option<String>,
}

pub enum AuthFormAction {
    Email(String),
    Password(String),
    Started,
    Settled(AuthOutcome),
}

impl Reducible for AuthFormState {
    type Action = AuthFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AuthFormAction::Email(email) => next.email = email,
            AuthFormAction::Password(password) => next.password = password,
            AuthFormAction::Started => {
                next.pending = true;
                next.error = None;
            }
            AuthFormAction::Settled(outcome) => {
                next.pending = false;
                next.errors = FieldErrors::default();
                match outcome {
                    AuthOutcome::Invalid(errors) => next.errors = errors,
                    AuthOutcome::Failed(message) => next.error = Some(message),
                    AuthOutcome::Done => next.password.clear(),
                    AuthOutcome::Skipped => {}
                }
            }
        }
        Rc::new(next)
    }
}

pub struct UseAuthForm {
    pub state: UseReducerHandle<AuthFormState>,
    pub set_email: Callback<String>,
    pub set_password: Callback<String>,
    pub submit: Callback<()>,
}

fn form_callbacks(state: &UseReducerHandle<AuthFormState>) -> (Callback<String>, Callback<String>) {
    let email = {
        let dispatcher = state.dispatcher();
        Callback::from(move |value: String| dispatcher.dispatch(AuthFormAction::Email(value)))
    };
    let password = {
        let dispatcher = state.dispatcher();
        Callback::from(move |value: String| dispatcher.dispatch(AuthFormAction::Password(value)))
    };
    (email, password)
}

/// Sign-in form. A successful sign-in flips the session to signed in.
#[hook]
pub fn use_sign_in() -> UseAuthForm {
    let session = use_session();
    let notify = use_toast();
    let state = use_reducer(AuthFormState::default);
    let (set_email, set_password) = form_callbacks(&state);

    let submit = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            if state.pending {
                return;
            }
            let dispatcher = state.dispatcher();
            let form = SignInForm {
                email: state.email.clone(),
                password: state.password.clone(),
            };
            let session = session.clone();
            let notify = notify.clone();

            dispatcher.dispatch(AuthFormAction::Started);
            spawn_local(async move {
                let outcome = sign_in_flow(&session.session, &form, &notify).await;
                if outcome == AuthOutcome::Done {
                    session.set_state.emit(SessionState::Ready(AuthStatus::SignedIn));
                }
                dispatcher.dispatch(AuthFormAction::Settled(outcome));
            });
        })
    };

    UseAuthForm {
        state,
        set_email,
        set_password,
        submit,
    }
}

/// Sign-up form. `on_registered` fires after a successful registration so
/// the caller can route to sign-in.
#[hook]
pub fn use_sign_up(on_registered: Callback<()>) -> UseAuthForm {
    let session = use_session().session;
    let notify = use_toast();
    let state = use_reducer(AuthFormState::default);
    let (set_email, set_password) = form_callbacks(&state);

    let submit = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            if state.pending {
                return;
            }
            let dispatcher = state.dispatcher();
            let form = SignUpForm {
                email: state.email.clone(),
                password: state.password.clone(),
            };
            let session = session.clone();
            let notify = notify.clone();
            let on_registered = on_registered.clone();

            dispatcher.dispatch(AuthFormAction::Started);
            spawn_local(async move {
                let outcome = sign_up_flow(&session, &form, &notify).await;
                let registered = outcome == AuthOutcome::Done;
                dispatcher.dispatch(AuthFormAction::Settled(outcome));
                if registered {
                    on_registered.emit(());
                }
            });
        })
    };

    UseAuthForm {
        state,
        set_email,
        set_password,
        submit,
    }
}

/// Signs out and marks the session signed out, even if the provider call
/// failed.
#[hook]
pub fn use_sign_out() -> Callback<()> {
    let session = use_session();
    Callback::from(move |_: ()| {
        let session = session.clone();
        spawn_local(async move {
            if let Err(err) = session.session.identity().sign_out().await {
                log::warn!("sign-out failed: {}", err);
            }
            session.set_state.emit(SessionState::Ready(AuthStatus::SignedOut));
        });
    })
}
