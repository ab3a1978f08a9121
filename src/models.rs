use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const RECENT_FALLBACK_LIMIT: usize = 10;
const UNKNOWN_TITLE: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A category as stored on an expense: either the bare id or the populated document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Populated(Category),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Populated(category) => &category.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: CategoryRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTotal {
    #[serde(rename = "_id")]
    pub id: String,
    pub total: f64,
    pub count: u64,
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentExpense {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    /// `None` when the category was deleted after the expense was recorded.
    pub category: Option<Category>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Exceeded,
    Warning,
    #[default]
    Good,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub category: Option<Category>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetComparison {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

impl BudgetComparison {
    /// Fill fraction for a progress bar, always within `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let raw = if self.budget.amount > 0.0 {
            self.spent / self.budget.amount
        } else {
            self.percentage / 100.0
        };
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        }
    }
}

/// Month analytics computed by the backend. `Default` is the zero-valued
/// summary rendered when analytics are unavailable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_expenses: f64,
    pub total_count: u64,
    pub avg_expense: f64,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub recent_expenses: Vec<RecentExpense>,
    pub budget_comparison: Vec<BudgetComparison>,
}

/// One row of the raw `GET /api/expenses` list; every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpenseListEntry {
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
}

/// A row of the recent-transactions list.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseItem {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub date: String,
}

impl From<&RecentExpense> for ExpenseItem {
    fn from(expense: &RecentExpense) -> Self {
        Self {
            id: expense.id.clone(),
            title: expense.description.clone(),
            amount: expense.amount,
            date: expense.date.clone(),
        }
    }
}

impl From<ExpenseListEntry> for ExpenseItem {
    fn from(entry: ExpenseListEntry) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            id: non_empty(entry.object_id)
                .or_else(|| non_empty(entry.id))
                .unwrap_or_default(),
            title: non_empty(entry.description).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            amount: entry.amount,
            date: entry.date,
        }
    }
}

/// A validated expense ready for `POST /api/expenses`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Field decoders for list rows, which arrive with nulls and stringly numbers.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64().unwrap_or_default(),
            Value::String(text) => text.trim().parse().unwrap_or_default(),
            _ => 0.0,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_parses_backend_shape() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({
            "totalExpenses": 120.5,
            "totalCount": 3,
            "avgExpense": 40.17,
            "expensesByCategory": [
                { "_id": "c1", "total": 100.0, "count": 2, "name": "Food", "color": "#f00" }
            ],
            "recentExpenses": [
                {
                    "_id": "e1",
                    "description": "Lunch",
                    "amount": 12.0,
                    "date": "2026-10-02T00:00:00.000Z",
                    "category": { "name": "Food", "color": "#f00" }
                }
            ],
            "budgetComparison": [
                {
                    "budget": {
                        "_id": "b1",
                        "name": "Groceries",
                        "amount": 200.0,
                        "category": { "_id": "c1", "name": "Food", "color": "#f00" }
                    },
                    "spent": 150.0,
                    "remaining": 50.0,
                    "percentage": 75.0,
                    "status": "warning"
                }
            ]
        }))
        .unwrap();

        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.recent_expenses[0].category.as_ref().unwrap().name, "Food");
        assert_eq!(summary.budget_comparison[0].status, BudgetStatus::Warning);
        assert_eq!(summary.budget_comparison[0].budget.category.as_ref().unwrap().id, "c1");
    }

    #[test]
    fn deleted_category_keeps_the_summary() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({
            "totalExpenses": 50.0,
            "recentExpenses": [
                { "_id": "e1", "description": "Lunch", "amount": 50.0, "date": "2026-10-02", "category": null }
            ],
            "budgetComparison": [
                {
                    "budget": { "_id": "b1", "name": "Food", "amount": 80.0, "category": null },
                    "spent": 50.0,
                    "status": "good"
                }
            ]
        }))
        .unwrap();

        assert_eq!(summary.total_expenses, 50.0);
        assert_eq!(summary.recent_expenses[0].category, None);
        assert_eq!(summary.recent_expenses[0].amount, 50.0);
        assert_eq!(summary.budget_comparison[0].budget.category, None);
    }

    #[test]
    fn list_rows_tolerate_nulls_and_string_amounts() {
        let entry: ExpenseListEntry = serde_json::from_value(json!({
            "_id": "a",
            "description": "Tea",
            "amount": 2.0,
            "date": null
        }))
        .unwrap();
        assert_eq!(entry.date, "");
        assert_eq!(entry.amount, 2.0);

        let entry: ExpenseListEntry =
            serde_json::from_value(json!({ "_id": "b", "amount": "2.5", "date": "2026-10-01" })).unwrap();
        assert_eq!(entry.amount, 2.5);

        let entry: ExpenseListEntry =
            serde_json::from_value(json!({ "_id": "c", "amount": null, "date": "2026-10-01" })).unwrap();
        assert_eq!(entry.amount, 0.0);
    }

    #[test]
    fn empty_object_is_zero_summary() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({})).unwrap();
        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(summary.total_expenses, 0.0);
        assert!(summary.recent_expenses.is_empty());
    }

    #[test]
    fn budget_progress_is_clamped() {
        let mut comparison = BudgetComparison {
            budget: Budget {
                amount: 100.0,
                ..Budget::default()
            },
            spent: 250.0,
            ..BudgetComparison::default()
        };
        assert_eq!(comparison.progress(), 1.0);

        comparison.spent = 25.0;
        assert_eq!(comparison.progress(), 0.25);

        comparison.spent = -10.0;
        assert_eq!(comparison.progress(), 0.0);

        comparison.budget.amount = 0.0;
        comparison.percentage = 40.0;
        assert_eq!(comparison.progress(), 0.4);
    }

    #[test]
    fn list_entry_mapping_falls_back() {
        let entry: ExpenseListEntry =
            serde_json::from_value(json!({ "id": "plain", "amount": 3.5, "date": "2026-10-01" }))
                .unwrap();
        let item = ExpenseItem::from(entry);
        assert_eq!(item.id, "plain");
        assert_eq!(item.title, "Unknown");
        assert_eq!(item.amount, 3.5);

        let entry: ExpenseListEntry = serde_json::from_value(json!({
            "_id": "mongo",
            "id": "plain",
            "description": "Taxi",
            "amount": 9.0,
            "date": "2026-10-03"
        }))
        .unwrap();
        let item = ExpenseItem::from(entry);
        assert_eq!(item.id, "mongo");
        assert_eq!(item.title, "Taxi");

        let entry: ExpenseListEntry =
            serde_json::from_value(json!({ "_id": "", "id": "plain", "description": "" })).unwrap();
        let item = ExpenseItem::from(entry);
        assert_eq!(item.id, "plain");
        assert_eq!(item.title, "Unknown");
    }

    #[test]
    fn expense_record_accepts_either_category_shape() {
        let record: ExpenseRecord = serde_json::from_value(json!({
            "_id": "e1",
            "description": "Coffee",
            "amount": 12.5,
            "date": "2026-10-16",
            "category": "64b7f0c2a1b2c3d4e5f60718"
        }))
        .unwrap();
        assert_eq!(record.category.id(), "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(record.notes, None);

        let record: ExpenseRecord = serde_json::from_value(json!({
            "_id": "e1",
            "description": "Coffee",
            "amount": 12.5,
            "date": "2026-10-16",
            "category": { "_id": "c9", "name": "Drinks", "color": "#0af" },
            "notes": "oat milk"
        }))
        .unwrap();
        assert_eq!(record.category.id(), "c9");
        assert_eq!(record.notes.as_deref(), Some("oat milk"));
    }

    #[test]
    fn new_expense_serializes_plain_date() {
        let expense = NewExpense {
            amount: 12.5,
            description: "Coffee".to_string(),
            category: "64b7f0c2a1b2c3d4e5f60718".to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        };
        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["date"], "2026-10-16");
        assert_eq!(value["amount"], 12.5);
        assert!(value.get("notes").is_none());
    }
}
