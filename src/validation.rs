//! Form schemas for sign-in, sign-up and expense creation.
//!
//! Each form keeps the raw input strings bound to its fields and validates
//! into a typed payload or a set of per-field messages (the first failing
//! rule wins for a field).

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::{Credentials, NewExpense};
use crate::period::DATE_FORMAT;

pub const MAX_AMOUNT: f64 = 999_999.99;
pub const MIN_AMOUNT: f64 = 0.01;
pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const MAX_NOTES_CHARS: usize = 500;
pub const MIN_PASSWORD_CHARS: usize = 6;
const OBJECT_ID_LEN: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    /// Records `message` unless `field` already failed.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.errors.values().map(String::as_str).collect();
        write!(f, "{}", joined.join("; "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        validate_credentials(&self.email, &self.password, "Invalid email address")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        validate_credentials(&self.email, &self.password, "Must be a valid email address")
    }
}

fn validate_credentials(
    email: &str,
    password: &str,
    invalid_email: &str,
) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::default();
    let email = email.trim();

    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_email(email) {
        errors.add("email", invalid_email);
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.add("password", "Password must be at least 6 characters");
    }

    errors.into_result(|| Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn is_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && labels.last().map(|tld| tld.len() >= 2).unwrap_or(false)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseField {
    Amount,
    Description,
    Notes,
    Category,
    Date,
}

impl ExpenseField {
    pub fn key(self) -> &'static str {
        match self {
            ExpenseField::Amount => "amount",
            ExpenseField::Description => "description",
            ExpenseField::Notes => "notes",
            ExpenseField::Category => "category",
            ExpenseField::Date => "date",
        }
    }
}

/// Raw input of the add-expense form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    pub notes: String,
    pub category: String,
    pub date: String,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            notes: String::new(),
            category: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn set(&mut self, field: ExpenseField, value: String) {
        match field {
            ExpenseField::Amount => self.amount = value,
            ExpenseField::Description => self.description = value,
            ExpenseField::Notes => self.notes = value,
            ExpenseField::Category => self.category = value,
            ExpenseField::Date => self.date = value,
        }
    }

    pub fn validate(&self) -> Result<NewExpense, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = match parse_amount(&self.amount) {
            Ok(amount) => amount,
            Err(msg) => {
                errors.add(ExpenseField::Amount.key(), msg);
                0.0
            }
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.add(ExpenseField::Description.key(), "Description cannot be empty");
        } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.add(
                ExpenseField::Description.key(),
                "Description cannot be more than 200 characters",
            );
        }

        let notes = self.notes.trim();
        if notes.chars().count() > MAX_NOTES_CHARS {
            errors.add(
                ExpenseField::Notes.key(),
                "Notes cannot be more than 500 characters",
            );
        }

        let category = self.category.trim();
        if !is_object_id(category) {
            errors.add(ExpenseField::Category.key(), "Invalid category ID format");
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT);
        if date.is_err() {
            errors.add(ExpenseField::Date.key(), "Invalid date");
        }

        match date {
            Ok(date) if errors.is_empty() => Ok(NewExpense {
                amount,
                description: description.to_string(),
                category: category.to_string(),
                notes: (!notes.is_empty()).then(|| notes.to_string()),
                date,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_amount(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Amount is required");
    }
    let amount = match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => return Err("Amount must be a number"),
    };
    if amount <= 0.0 {
        Err("Amount must be greater than 0")
    } else if amount < MIN_AMOUNT {
        Err("Amount must be at least 0.01")
    } else if amount > MAX_AMOUNT {
        Err("Amount cannot exceed 999,999.99")
    } else {
        Ok(amount)
    }
}

fn is_object_id(candidate: &str) -> bool {
    candidate.len() == OBJECT_ID_LEN && candidate.chars().all(|c| c.is_ascii_hexdigit())
}
