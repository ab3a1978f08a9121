use chrono::{Datelike, Local, Months, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive first and last calendar day of a month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    pub fn containing(day: NaiveDate) -> Self {
        let start = day.with_day(1).unwrap_or(day);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn current() -> Self {
        Self::containing(today())
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
