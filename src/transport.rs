//! HTTP plumbing shared by the API client and the identity adapter.
//!
//! Every call goes through [`HttpClient::execute`], which races the request
//! against a deadline and against the caller's [`CancelToken`].

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, AbortHandle, Abortable, Either, LocalBoxFuture};
use futures::pin_mut;
use gloo_net::http::Request;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    #[cfg(test)]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        }
        .credentials(RequestCredentials::Include);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let outgoing = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = outgoing
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}

/// Cancels every request guarded by it, including ones started after
/// [`CancelToken::cancel`].
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Rc<RefCell<CancelState>>,
}

#[derive(Default)]
struct CancelState {
    cancelled: bool,
    handles: Vec<AbortHandle>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut state = self.inner.borrow_mut();
        state.cancelled = true;
        for handle in state.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.borrow().cancelled
    }

    pub fn guard<F: Future>(&self, fut: F) -> Abortable<F> {
        let (handle, registration) = AbortHandle::new_pair();
        let mut state = self.inner.borrow_mut();
        if state.cancelled {
            handle.abort();
        } else {
            state.handles.retain(|h| !h.is_aborted());
            state.handles.push(handle);
        }
        Abortable::new(fut, registration)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Resolves with `request` unless `deadline` fires or `cancel` trips first.
pub async fn race_deadline<F, T>(
    request: F,
    deadline: LocalBoxFuture<'static, ()>,
    cancel: &CancelToken,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let request = cancel.guard(request);
    pin_mut!(request);

    match future::select(request, deadline).await {
        Either::Left((Ok(result), _)) => result,
        Either::Left((Err(_aborted), _)) => Err(ApiError::Cancelled),
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

#[derive(Clone)]
pub struct HttpClient {
    transport: Rc<dyn Transport>,
    sleeper: Rc<dyn Sleeper>,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(transport: Rc<dyn Transport>, sleeper: Rc<dyn Sleeper>, timeout: Duration) -> Self {
        Self {
            transport,
            sleeper,
            timeout,
        }
    }

    pub fn browser(timeout: Duration) -> Self {
        Self::new(Rc::new(GlooTransport), Rc::new(GlooSleeper), timeout)
    }

    pub async fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancelToken,
    ) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        log::debug!("{} {}", method, url);

        let deadline = self.sleeper.sleep(self.timeout);
        let result = race_deadline(self.transport.send(request), deadline, cancel).await;

        match &result {
            Ok(response) => log::debug!("{} {} -> {}", method, url, response.status),
            Err(ApiError::Cancelled) => log::debug!("{} {} cancelled", method, url),
            Err(err) => log::warn!("{} {} failed: {}", method, url, err),
        }
        result
    }
}
