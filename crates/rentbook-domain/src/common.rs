//! Shared traits, calendar utilities, and windows used across the portfolio model.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the portfolio.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Associates entities with the property they belong to.
pub trait BelongsToProperty {
    fn property_id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// A calendar month within a specific year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `None` when the year is outside the range chrono can represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// `None` past December of `i32::MAX`.
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Some(Self {
                year: self.year.checked_add(1)?,
                month: 1,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Half-open date range `[start, end)` used for reporting windows.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end <= start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Window covering a single calendar month.
    pub fn month(period: YearMonth) -> Result<Self, DateWindowError> {
        let out_of_range = DateWindowError::OutOfRange(period.year);
        let start = period.first_day().ok_or(out_of_range)?;
        let end = period
            .next()
            .and_then(|next| next.first_day())
            .ok_or(out_of_range)?;
        Self::new(start, end)
    }

    /// Window covering January 1st through December 31st of `year`.
    pub fn year(year: i32) -> Result<Self, DateWindowError> {
        let out_of_range = DateWindowError::OutOfRange(year);
        let start = YearMonth { year, month: 1 }
            .first_day()
            .ok_or(out_of_range)?;
        let end = year
            .checked_add(1)
            .and_then(|next| YearMonth { year: next, month: 1 }.first_day())
            .ok_or(out_of_range)?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Lists every calendar month the window touches, in ascending order.
    /// An empty or inverted window touches none.
    pub fn months(&self) -> Vec<YearMonth> {
        let Some(last_day) = self.end.pred_opt().filter(|last| *last >= self.start) else {
            return Vec::new();
        };
        let last = YearMonth::from_date(last_day);
        let mut cursor = Some(YearMonth::from_date(self.start));
        let mut months = Vec::new();
        while let Some(current) = cursor.filter(|current| *current <= last) {
            months.push(current);
            cursor = current.next();
        }
        months
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
    OutOfRange(i32),
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must be after start"),
            DateWindowError::OutOfRange(year) => {
                write!(f, "year {year} is outside the supported calendar range")
            }
        }
    }
}

impl std::error::Error for DateWindowError {}
