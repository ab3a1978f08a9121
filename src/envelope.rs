//! Normalization of backend response bodies.
//!
//! The backend answers either `{ "success": bool, "data": .., "message": .. }`
//! or the bare payload. Everything downstream sees a single typed result.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Data(T),
    Rejected(Option<String>),
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn from_value(mut value: Value) -> Result<Self, ApiError> {
        let flag = match value.get("success") {
            Some(flag) => is_truthy(flag),
            None => return Ok(Envelope::Data(serde_json::from_value(value)?)),
        };

        if flag {
            let data = value
                .get_mut("data")
                .map(Value::take)
                .unwrap_or(Value::Null);
            Ok(Envelope::Data(serde_json::from_value(data)?))
        } else {
            Ok(Envelope::Rejected(value.get("message").and_then(message_text)))
        }
    }

    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        Self::from_value(serde_json::from_str(body)?)
    }

    /// Rejections become [`ApiError::Rejected`], using `fallback` when the
    /// backend sent no usable message.
    pub fn into_result(self, fallback: &str) -> Result<T, ApiError> {
        match self {
            Envelope::Data(data) => Ok(data),
            Envelope::Rejected(message) => {
                Err(ApiError::Rejected(message.unwrap_or_else(|| fallback.to_string())))
            }
        }
    }
}

/// Display text for a `message` field: a string as-is, an array joined with
/// `"; "`.
pub fn message_text(message: &Value) -> Option<String> {
    match message {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other
                        .get("message")
                        .and_then(Value::as_str)
                        .filter(|text| !text.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| other.to_string()),
                })
                .collect();
            Some(parts.join("; "))
        }
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalyticsSummary;
    use serde_json::json;

    #[test]
    fn wrapped_payload_is_unwrapped() {
        let env: Envelope<Vec<u32>> =
            Envelope::from_value(json!({ "success": true, "data": [1, 2, 3] })).unwrap();
        assert_eq!(env, Envelope::Data(vec![1, 2, 3]));
    }

    #[test]
    fn bare_payload_is_the_data() {
        let env: Envelope<Vec<u32>> = Envelope::from_value(json!([4, 5])).unwrap();
        assert_eq!(env, Envelope::Data(vec![4, 5]));

        let env: Envelope<AnalyticsSummary> =
            Envelope::from_body(r#"{"totalExpenses": 42.0, "totalCount": 2}"#).unwrap();
        match env {
            Envelope::Data(summary) => {
                assert_eq!(summary.total_expenses, 42.0);
                assert_eq!(summary.total_count, 2);
            }
            other => panic!("expected data, got {other:?}"),
        }
    }

    #[test]
    fn failed_envelope_joins_messages() {
        let env: Envelope<Value> =
            Envelope::from_value(json!({ "success": false, "message": ["a", "b"] })).unwrap();
        assert_eq!(env, Envelope::Rejected(Some("a; b".to_string())));

        let err = env.into_result("Failed to add expense").unwrap_err();
        assert_eq!(err, ApiError::Rejected("a; b".to_string()));
        assert_eq!(err.to_string(), "a; b");
    }

    #[test]
    fn message_objects_use_their_message_field() {
        let text = message_text(&json!([
            "plain",
            { "path": "amount", "message": "Amount must be greater than 0" },
            { "code": 7 }
        ]))
        .unwrap();
        assert_eq!(text, r#"plain; Amount must be greater than 0; {"code":7}"#);
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        let env: Envelope<Value> = Envelope::from_value(json!({ "success": false })).unwrap();
        assert_eq!(
            env.into_result("Failed to add expense"),
            Err(ApiError::Rejected("Failed to add expense".to_string()))
        );

        let env: Envelope<Value> =
            Envelope::from_value(json!({ "success": false, "message": 12 })).unwrap();
        assert_eq!(env, Envelope::Rejected(None));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = Envelope::<Vec<u32>>::from_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = Envelope::<Vec<u32>>::from_value(json!({ "success": true, "data": "x" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
