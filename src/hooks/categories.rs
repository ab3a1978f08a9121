use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_api;
use crate::api::ExpenseApi;
use crate::models::Category;
use crate::session::{use_session, Session};
use crate::transport::CancelToken;

/// Categories for the picker. Failures are logged and leave the list empty.
pub async fn load_categories(session: &Session, api: &ExpenseApi, cancel: &CancelToken) -> Vec<Category> {
    if !session.is_signed_in() {
        return Vec::new();
    }
    let token = match session.token().await {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => {
            log::error!("Error fetching categories: no authentication token");
            return Vec::new();
        }
        Err(err) => {
            log::error!("Error fetching categories: {}", err);
            return Vec::new();
        }
    };

    match api.list_categories(&token, cancel).await {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Error fetching categories: {}", err);
            Vec::new()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UseCategories {
    pub categories: Rc<Vec<Category>>,
    pub loading: bool,
}

#[hook]
pub fn use_categories() -> UseCategories {
    let session = use_session().session;
    let api = use_api();
    let categories = use_state(|| Rc::new(Vec::<Category>::new()));
    let loading = use_state(|| false);

    {
        let categories = categories.clone();
        let loading = loading.clone();
        let fetch_session = session.clone();
        use_effect_with_deps(
            move |signed_in: &bool| {
                let cancel = CancelToken::new();
                if *signed_in {
                    let guard = cancel.clone();
                    loading.set(true);
                    spawn_local(async move {
                        let fetched = load_categories(&fetch_session, &api, &guard).await;
                        if guard.is_cancelled() {
                            return;
                        }
                        categories.set(Rc::new(fetched));
                        loading.set(false);
                    });
                }
                move || cancel.cancel()
            },
            session.is_signed_in(),
        );
    }

    UseCategories {
        categories: (*categories).clone(),
        loading: *loading,
    }
}
