pub mod add_expense;
pub mod analytics;
pub mod auth;
pub mod categories;

use std::rc::Rc;

use yew::prelude::*;

use crate::api::ExpenseApi;
use crate::config::AppConfig;
use crate::transport::HttpClient;

#[derive(Clone)]
pub struct ApiHandle(pub Rc<ExpenseApi>);

impl ApiHandle {
    pub fn browser(config: &AppConfig) -> Self {
        let http = HttpClient::browser(config.request_timeout);
        Self(Rc::new(ExpenseApi::new(config, http)))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[hook]
pub fn use_api() -> Rc<ExpenseApi> {
    let fallback = use_memo(|_| ApiHandle::browser(&AppConfig::from_env()), ());
    match use_context::<ApiHandle>() {
        Some(handle) => handle.0,
        None => fallback.0.clone(),
    }
}
