//! In-crate fakes for the transport, timer, token store and identity seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, LocalBoxFuture};
use yew::Callback;

use crate::api::ExpenseApi;
use crate::config::AppConfig;
use crate::error::{ApiError, AuthError};
use crate::identity::{IdentityHandle, IdentityProvider, TokenStore};
use crate::models::Credentials;
use crate::session::{AuthStatus, Session, SessionState};
use crate::toast::Toast;
use crate::transport::{HttpClient, HttpRequest, HttpResponse, Method, Sleeper, Transport};

pub const BASE_URL: &str = "http://api.test";

enum Reply {
    Respond(u16, String),
    Fail(ApiError),
    Stall,
}

/// Answers requests by method and path; unmatched requests get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<(Method, String, Reply)>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, method: Method, path: &str, reply: Reply) -> Self {
        self.routes.push((method, path.to_string(), reply));
        self
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.route(method, path, Reply::Respond(status, body.to_string()))
    }

    pub fn fail(self, method: Method, path: &str, err: ApiError) -> Self {
        self.route(method, path, Reply::Fail(err))
    }

    pub fn stall(self, method: Method, path: &str) -> Self {
        self.route(method, path, Reply::Stall)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.method == method && path_of(&r.url).ends_with(path))
            .count()
    }
}

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = path_of(&request.url).to_string();
        let method = request.method;
        self.sent.borrow_mut().push(request);

        let reply = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == method && path.ends_with(p.as_str()))
            .map(|(_, _, reply)| reply);

        match reply {
            Some(Reply::Respond(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Reply::Fail(err)) => Err(err.clone()),
            Some(Reply::Stall) => future::pending().await,
            None => Ok(HttpResponse {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}

pub struct NeverSleeper;

impl Sleeper for NeverSleeper {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(future::pending())
    }
}

pub struct ImmediateSleeper;

impl Sleeper for ImmediateSleeper {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(future::ready(()))
    }
}

pub fn http_with(transport: Rc<ScriptedTransport>) -> HttpClient {
    HttpClient::new(transport, Rc::new(NeverSleeper), Duration::from_secs(30))
}

pub fn api_with(transport: Rc<ScriptedTransport>) -> ExpenseApi {
    let config = AppConfig {
        api_base_url: BASE_URL.to_string(),
        ..AppConfig::default()
    };
    ExpenseApi::new(&config, http_with(transport))
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

/// Identity provider with a fixed token answer and call counters.
pub struct StaticIdentity {
    token: Result<Option<String>, AuthError>,
    sign_in: Result<(), AuthError>,
    token_calls: Rc<Cell<usize>>,
    sign_out_calls: Rc<Cell<usize>>,
    sign_in_calls: Rc<Cell<usize>>,
}

impl StaticIdentity {
    fn answering(token: Result<Option<String>, AuthError>) -> Self {
        Self {
            token,
            sign_in: Ok(()),
            token_calls: Rc::default(),
            sign_out_calls: Rc::default(),
            sign_in_calls: Rc::default(),
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self::answering(Ok(Some(token.to_string())))
    }

    pub fn without_token() -> Self {
        Self::answering(Ok(None))
    }

    pub fn failing(err: AuthError) -> Self {
        Self::answering(Err(err))
    }

    pub fn rejecting_sign_in(mut self, err: AuthError) -> Self {
        self.sign_in = Err(err);
        self
    }

    pub fn token_calls(&self) -> Rc<Cell<usize>> {
        self.token_calls.clone()
    }

    pub fn sign_out_calls(&self) -> Rc<Cell<usize>> {
        self.sign_out_calls.clone()
    }

    pub fn sign_in_calls(&self) -> Rc<Cell<usize>> {
        self.sign_in_calls.clone()
    }
}

#[async_trait(?Send)]
impl IdentityProvider for StaticIdentity {
    async fn restore(&self) -> Result<bool, AuthError> {
        Ok(matches!(self.token, Ok(Some(_))))
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<(), AuthError> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        self.sign_in.clone()
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<(), AuthError> {
        self.sign_in.clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, AuthError> {
        self.token_calls.set(self.token_calls.get() + 1);
        self.token.clone()
    }
}

pub fn session(status: AuthStatus, identity: StaticIdentity) -> Session {
    Session::new(SessionState::Ready(status), IdentityHandle::new(identity))
}

pub fn signed_in(token: &str) -> Session {
    session(AuthStatus::SignedIn, StaticIdentity::with_token(token))
}

/// A toast callback plus the list it records into.
pub fn toast_sink() -> (Callback<Toast>, Rc<RefCell<Vec<Toast>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    (Callback::from(move |toast: Toast| sink.borrow_mut().push(toast)), seen)
}

pub fn counter() -> (Callback<()>, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let hits = count.clone();
    (Callback::from(move |_: ()| hits.set(hits.get() + 1)), count)
}
