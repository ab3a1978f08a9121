use yew::prelude::*;

use crate::error::AuthError;
use crate::identity::{Detached, IdentityHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    SignedIn,
    SignedOut,
}

/// Lifecycle of the injected session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Ready(AuthStatus),
}

/// Read-only view of the identity provider's session, passed explicitly to
/// every hook that needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    state: SessionState,
    identity: IdentityHandle,
}

impl Session {
    pub fn new(state: SessionState, identity: IdentityHandle) -> Self {
        Self { state, identity }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn identity(&self) -> &IdentityHandle {
        &self.identity
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    pub fn is_signed_in(&self) -> bool {
        self.state == SessionState::Ready(AuthStatus::SignedIn)
    }

    /// `Ok(None)` means the provider had no token to give, which callers
    /// treat differently from a failed lookup.
    pub async fn token(&self) -> Result<Option<String>, AuthError> {
        if !self.is_loaded() {
            return Ok(None);
        }
        self.identity.token().await
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub set_state: Callback<SessionState>,
}

impl SessionContext {
    fn detached() -> Self {
        Self {
            session: Session::new(
                SessionState::Ready(AuthStatus::SignedOut),
                IdentityHandle::new(Detached),
            ),
            set_state: Callback::from(|_: SessionState| {
                log::warn!("session update without a SessionProvider")
            }),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub identity: IdentityHandle,
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_state(SessionState::default);

    {
        let state = state.clone();
        let identity = props.identity.clone();
        use_effect_with_deps(
            move |_| {
                state.set(SessionState::Loading);
                wasm_bindgen_futures::spawn_local(async move {
                    let status = match identity.restore().await {
                        Ok(true) => AuthStatus::SignedIn,
                        Ok(false) => AuthStatus::SignedOut,
                        Err(err) => {
                            log::warn!("could not restore session: {}", err);
                            AuthStatus::SignedOut
                        }
                    };
                    log::info!("session ready: {:?}", status);
                    state.set(SessionState::Ready(status));
                });
                || ()
            },
            props.identity.clone(),
        );
    }

    let context = SessionContext {
        session: Session::new(*state, props.identity.clone()),
        set_state: {
            let state = state.clone();
            Callback::from(move |next: SessionState| state.set(next))
        },
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { for props.children.iter() }
        </ContextProvider<SessionContext>>
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| {
        log::error!("use_session called outside of a SessionProvider");
        SessionContext::detached()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticIdentity;
    use futures::executor::block_on;

    #[test]
    fn lifecycle_flags() {
        let identity = IdentityHandle::new(StaticIdentity::with_token("tok"));
        let at = |state| Session::new(state, identity.clone());

        let session = at(SessionState::Uninitialized);
        assert!(!session.is_loaded());
        assert!(!session.is_signed_in());

        assert!(!at(SessionState::Loading).is_loaded());

        let signed_out = at(SessionState::Ready(AuthStatus::SignedOut));
        assert!(signed_out.is_loaded());
        assert!(!signed_out.is_signed_in());

        let signed_in = at(SessionState::Ready(AuthStatus::SignedIn));
        assert!(signed_in.is_signed_in());
        assert_eq!(signed_in.identity(), session.identity());
    }

    #[test]
    fn no_token_request_before_loaded() {
        let identity = StaticIdentity::with_token("tok");
        let calls = identity.token_calls();
        let identity = IdentityHandle::new(identity);
        let session = Session::new(SessionState::Loading, identity.clone());

        assert_eq!(block_on(session.token()), Ok(None));
        assert_eq!(calls.get(), 0);

        let ready = Session::new(SessionState::Ready(AuthStatus::SignedIn), identity);
        assert_eq!(block_on(ready.token()), Ok(Some("tok".to_string())));
        assert_eq!(calls.get(), 1);
    }
}
