use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{AnalyticsSummary, Category, ExpenseListEntry, ExpenseRecord, NewExpense};
use crate::period::MonthRange;
use crate::transport::{CancelToken, HttpClient, HttpRequest, HttpResponse};

const SUBMIT_FALLBACK: &str = "Failed to add expense";
const REQUEST_FALLBACK: &str = "Request failed";

/// Typed calls to the expense backend.
#[derive(Clone)]
pub struct ExpenseApi {
    config: AppConfig,
    http: HttpClient,
}

impl ExpenseApi {
    pub fn new(config: &AppConfig, http: HttpClient) -> Self {
        Self {
            config: config.clone(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn get(&self, url: String, token: &str, cancel: &CancelToken) -> Result<HttpResponse, ApiError> {
        let response = self
            .http
            .execute(HttpRequest::get(url).bearer(token), cancel)
            .await?;
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    pub async fn analytics_summary(
        &self,
        token: &str,
        range: MonthRange,
        cancel: &CancelToken,
    ) -> Result<AnalyticsSummary, ApiError> {
        let url = self.url(&format!(
            "/api/analytics/summary?startDate={}&endDate={}",
            range.start_param(),
            range.end_param()
        ));
        let response = self.get(url, token, cancel).await?;
        Envelope::from_body(&response.body)?.into_result(REQUEST_FALLBACK)
    }

    /// Raw expense list. Only a non-2xx status is an error: a rejected
    /// envelope or a payload that is not an array yields no entries, and
    /// every array element becomes an entry.
    pub async fn list_expenses(
        &self,
        token: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<ExpenseListEntry>, ApiError> {
        let response = self.get(self.url("/api/expenses"), token, cancel).await?;
        let payload = match Envelope::<Value>::from_body(&response.body)? {
            Envelope::Data(payload) => payload,
            Envelope::Rejected(message) => {
                log::warn!(
                    "expense list rejected: {}",
                    message.as_deref().unwrap_or(REQUEST_FALLBACK)
                );
                return Ok(Vec::new());
            }
        };

        match payload {
            Value::Array(items) => Ok(items.into_iter().map(list_entry).collect()),
            other => {
                log::warn!("expense list payload is not an array: {}", other);
                Ok(Vec::new())
            }
        }
    }

    pub async fn list_categories(
        &self,
        token: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<Category>, ApiError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CategoryPayload {
            Listed { data: Vec<Category> },
            Bare(Vec<Category>),
        }

        let response = self.get(self.url("/api/category"), token, cancel).await?;
        let payload: CategoryPayload =
            Envelope::from_body(&response.body)?.into_result(REQUEST_FALLBACK)?;
        Ok(match payload {
            CategoryPayload::Listed { data } => data,
            CategoryPayload::Bare(data) => data,
        })
    }

    /// The body is read whatever the status; the envelope decides success.
    pub async fn create_expense(
        &self,
        token: &str,
        expense: &NewExpense,
        cancel: &CancelToken,
    ) -> Result<ExpenseRecord, ApiError> {
        let request = HttpRequest::post(self.url("/api/expenses"))
            .bearer(token)
            .json(expense)?;
        let response = self.http.execute(request, cancel).await?;

        let envelope = match Envelope::<ExpenseRecord>::from_body(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.ok() => {
                return Err(ApiError::Status {
                    status: response.status,
                    body: response.body,
                })
            }
            Err(err) => return Err(err),
        };
        envelope.into_result(SUBMIT_FALLBACK)
    }
}

fn list_entry(item: Value) -> ExpenseListEntry {
    serde_json::from_value(item).unwrap_or_else(|err| {
        log::warn!("unreadable expense row: {}", err);
        ExpenseListEntry::default()
    })
}
