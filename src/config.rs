use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings baked into the bundle at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub publishable_key: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            publishable_key: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("EXPENSE_API_URL"),
            option_env!("EXPENSE_PUBLISHABLE_KEY"),
            option_env!("EXPENSE_REQUEST_TIMEOUT_SECS"),
        )
    }

    fn from_values(api_url: Option<&str>, key: Option<&str>, timeout: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let publishable_key = key.map(|k| k.trim().to_string()).unwrap_or_default();
        if publishable_key.is_empty() {
            log::warn!("EXPENSE_PUBLISHABLE_KEY is not set; identity requests will be anonymous");
        }

        let request_timeout = match timeout.map(|raw| raw.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                log::warn!(
                    "ignoring invalid EXPENSE_REQUEST_TIMEOUT_SECS, using {}s",
                    DEFAULT_TIMEOUT_SECS
                );
                defaults.request_timeout
            }
            None => defaults.request_timeout,
        };

        Self {
            api_base_url,
            publishable_key,
            request_timeout,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = AppConfig::from_values(Some(" https://api.example.com/// "), Some("pk_test"), None);
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.publishable_key, "pk_test");
        assert_eq!(
            config.endpoint("/api/expenses"),
            "https://api.example.com/api/expenses"
        );
        assert_eq!(config.endpoint("api/category"), "https://api.example.com/api/category");
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = AppConfig::from_values(None, None, Some("soon"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = AppConfig::from_values(None, None, Some("0"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = AppConfig::from_values(None, None, Some("5"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
