//! The identity provider seam.
//!
//! Sessions, credential checks and token issuance belong to an external
//! service. [`HttpIdentityProvider`] talks to it over HTTP and keeps the
//! bearer token in browser local storage.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::envelope::message_text;
use crate::error::{ApiError, AuthError};
use crate::models::Credentials;
use crate::transport::{CancelToken, HttpClient, HttpRequest, HttpResponse};

const TOKEN_KEY: &str = "access_token";
const PUBLISHABLE_KEY_HEADER: &str = "X-Publishable-Key";
const COMPLETE: &str = "complete";

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Re-establishes a session left over from a previous visit.
    async fn restore(&self) -> Result<bool, AuthError>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError>;
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
    async fn token(&self) -> Result<Option<String>, AuthError>;
}

/// Shared handle so the provider can travel through props and contexts.
#[derive(Clone)]
pub struct IdentityHandle(pub Rc<dyn IdentityProvider>);

impl IdentityHandle {
    pub fn new(provider: impl IdentityProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }
}

impl PartialEq for IdentityHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for IdentityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityHandle")
    }
}

impl std::ops::Deref for IdentityHandle {
    type Target = dyn IdentityProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Stand-in used when no provider has been mounted.
pub struct Detached;

#[async_trait(?Send)]
impl IdentityProvider for Detached {
    async fn restore(&self) -> Result<bool, AuthError> {
        Ok(false)
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<(), AuthError> {
        Err(AuthError::Unavailable)
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<(), AuthError> {
        Err(AuthError::Unavailable)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(None)
    }
}

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()
            .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                log::warn!("could not persist the session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AuthResponse {
    status: Option<String>,
    #[serde(alias = "access_token")]
    access_token: Option<String>,
    errors: Vec<AuthErrorDetail>,
    message: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AuthErrorDetail {
    long_message: Option<String>,
    message: Option<String>,
}

impl AuthResponse {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn failure_message(&self) -> Option<String> {
        let detail = self.errors.first().and_then(|detail| {
            detail
                .long_message
                .clone()
                .or_else(|| detail.message.clone())
        });
        detail
            .or_else(|| self.message.as_ref().and_then(message_text))
            .filter(|msg| !msg.is_empty())
    }
}

pub struct HttpIdentityProvider {
    base_url: String,
    publishable_key: String,
    http: HttpClient,
    store: Rc<dyn TokenStore>,
}

impl HttpIdentityProvider {
    pub fn new(config: &AppConfig, http: HttpClient, store: Rc<dyn TokenStore>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            publishable_key: config.publishable_key.clone(),
            http,
            store,
        }
    }

    pub fn browser(config: &AppConfig) -> Self {
        Self::new(
            config,
            HttpClient::browser(config.request_timeout),
            Rc::new(LocalStorageTokenStore),
        )
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::post(format!("{}{}", self.base_url, path));
        if !self.publishable_key.is_empty() {
            request = request.header(PUBLISHABLE_KEY_HEADER, &self.publishable_key);
        }
        if let Some(token) = self.store.load() {
            request = request.bearer(&token);
        }
        if let Some(body) = body {
            request = request.json(&body)?;
        }
        self.http.execute(request, &CancelToken::new()).await
    }

    fn failure(response: &HttpResponse, fallback: &str) -> AuthError {
        let parsed = AuthResponse::parse(&response.body);
        let message = parsed.failure_message().unwrap_or_else(|| {
            if response.body.trim().is_empty() {
                fallback.to_string()
            } else {
                response.body.clone()
            }
        });
        AuthError::Rejected(message)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HttpIdentityProvider {
    async fn restore(&self) -> Result<bool, AuthError> {
        match self.post("/api/auth/refresh", None).await {
            Ok(response) if response.ok() => {
                if let Some(token) = AuthResponse::parse(&response.body)
                    .access_token
                    .filter(|token| !token.is_empty())
                {
                    self.store.save(&token);
                }
                Ok(self.store.load().is_some())
            }
            Ok(response) => {
                log::info!("session refresh rejected with {}", response.status);
                Ok(self.store.load().is_some())
            }
            Err(err) => {
                log::warn!("session refresh failed: {}", err);
                Ok(self.store.load().is_some())
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let body = json!({ "email": credentials.email, "password": credentials.password });
        let response = self.post("/api/auth/login", Some(body)).await?;
        if !response.ok() {
            return Err(Self::failure(&response, "Sign-in failed"));
        }

        let parsed = AuthResponse::parse(&response.body);
        if let Some(status) = parsed.status.as_deref().filter(|s| *s != COMPLETE) {
            return Err(AuthError::UnexpectedStatus(status.to_string()));
        }

        match parsed.access_token.filter(|token| !token.is_empty()) {
            Some(token) => {
                self.store.save(&token);
                log::info!("signed in as {}", credentials.email);
                Ok(())
            }
            None => Err(AuthError::Rejected(
                "Sign-in response carried no session token".to_string(),
            )),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let body = json!({ "email": credentials.email, "password": credentials.password });
        let response = self.post("/api/auth/register", Some(body)).await?;
        if !response.ok() {
            return Err(Self::failure(&response, "Sign-up failed"));
        }

        match AuthResponse::parse(&response.body).status.as_deref() {
            None | Some(COMPLETE) => Ok(()),
            Some(other) => Err(AuthError::UnexpectedSignUpStatus(other.to_string())),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.post("/api/auth/logout", None).await;
        self.store.clear();
        if let Err(err) = result {
            log::warn!("logout request failed: {}", err);
        }
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.store.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{http_with, MemoryTokenStore, ScriptedTransport};
    use crate::transport::Method;
    use futures::executor::block_on;

    fn provider(transport: Rc<ScriptedTransport>, store: Rc<MemoryTokenStore>) -> HttpIdentityProvider {
        let config = AppConfig {
            api_base_url: "http://api.test".to_string(),
            publishable_key: "pk_test_123".to_string(),
            ..AppConfig::default()
        };
        HttpIdentityProvider::new(&config, http_with(transport), store)
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn sign_in_stores_token() {
        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/login",
            200,
            r#"{"status": "complete", "access_token": "tok-1"}"#,
        ));
        let store = Rc::new(MemoryTokenStore::default());
        let identity = provider(transport.clone(), store.clone());

        block_on(identity.sign_in(&credentials())).unwrap();
        assert_eq!(block_on(identity.token()).unwrap().as_deref(), Some("tok-1"));

        let sent = transport.requests();
        assert_eq!(sent[0].header_value("X-Publishable-Key"), Some("pk_test_123"));
        assert!(sent[0].body.as_deref().unwrap().contains("ada@example.com"));
    }

    #[test]
    fn sign_in_reports_provider_messages() {
        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/login",
            422,
            r#"{"errors": [{"longMessage": "Password is incorrect.", "message": "bad"}]}"#,
        ));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        let err = block_on(identity.sign_in(&credentials())).unwrap_err();
        assert_eq!(err, AuthError::Rejected("Password is incorrect.".to_string()));

        let transport = Rc::new(ScriptedTransport::new().respond(Method::Post, "/api/auth/login", 401, ""));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        let err = block_on(identity.sign_in(&credentials())).unwrap_err();
        assert_eq!(err.to_string(), "Sign-in failed");

        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/login",
            200,
            r#"{"status": "needs_second_factor"}"#,
        ));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        let err = block_on(identity.sign_in(&credentials())).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected status: needs_second_factor");
    }

    #[test]
    fn sign_up_does_not_sign_in() {
        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/register",
            201,
            r#"{"status": "complete", "access_token": "ignored"}"#,
        ));
        let store = Rc::new(MemoryTokenStore::default());
        let identity = provider(transport, store.clone());

        block_on(identity.sign_up(&credentials())).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn sign_up_names_unexpected_status() {
        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/register",
            200,
            r#"{"status": "missing_requirements"}"#,
        ));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        let err = block_on(identity.sign_up(&credentials())).unwrap_err();
        assert_eq!(err, AuthError::UnexpectedSignUpStatus("missing_requirements".to_string()));
        assert_eq!(err.to_string(), "Unexpected sign-up status: missing_requirements");
    }

    #[test]
    fn restore_falls_back_to_stored_token() {
        let transport = Rc::new(ScriptedTransport::new().respond(Method::Post, "/api/auth/refresh", 401, ""));
        let store = Rc::new(MemoryTokenStore::with_token("old"));
        let identity = provider(transport, store);
        assert!(block_on(identity.restore()).unwrap());

        let transport = Rc::new(ScriptedTransport::new().respond(Method::Post, "/api/auth/refresh", 401, ""));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        assert!(!block_on(identity.restore()).unwrap());

        let transport = Rc::new(ScriptedTransport::new().respond(
            Method::Post,
            "/api/auth/refresh",
            200,
            r#"{"access_token": "fresh"}"#,
        ));
        let store = Rc::new(MemoryTokenStore::with_token("old"));
        let identity = provider(transport, store.clone());
        assert!(block_on(identity.restore()).unwrap());
        assert_eq!(store.load().as_deref(), Some("fresh"));
    }

    #[test]
    fn refresh_without_any_token_is_signed_out() {
        let transport = Rc::new(ScriptedTransport::new().respond(Method::Post, "/api/auth/refresh", 200, "{}"));
        let identity = provider(transport, Rc::new(MemoryTokenStore::default()));
        assert!(!block_on(identity.restore()).unwrap());

        let transport = Rc::new(ScriptedTransport::new().respond(Method::Post, "/api/auth/refresh", 204, ""));
        let identity = provider(transport, Rc::new(MemoryTokenStore::with_token("old")));
        assert!(block_on(identity.restore()).unwrap());
    }

    #[test]
    fn sign_out_always_clears_token() {
        let transport = Rc::new(ScriptedTransport::new().fail(
            Method::Post,
            "/api/auth/logout",
            ApiError::Network("offline".to_string()),
        ));
        let store = Rc::new(MemoryTokenStore::with_token("tok"));
        let identity = provider(transport, store.clone());

        block_on(identity.sign_out()).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = IdentityHandle::new(Detached);
        let b = IdentityHandle::new(Detached);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
