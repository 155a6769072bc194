//! Merges per-template schedules into a month-by-month calendar.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{Portfolio, ScheduleEntry, YearMonth};

use crate::{schedule::build_schedule, CoreError};

/// Everything due in one calendar month across several templates.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub period: YearMonth,
    pub total_due: Decimal,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub fee_template_id: Uuid,
    pub name: String,
    pub amount_due: Decimal,
}

/// Year-over-year change between two totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearComparison {
    pub previous_total: Decimal,
    pub current_total: Decimal,
    pub delta: Decimal,
    /// `None` when the previous total is zero.
    pub percent_change: Option<Decimal>,
}

/// A template's schedule tagged with the template it came from.
#[derive(Debug, Clone)]
pub struct TemplateSchedule {
    pub fee_template_id: Uuid,
    pub name: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Groups entries by `(year, month)` and sums the amounts, ascending.
pub fn aggregate_calendar(schedules: &[TemplateSchedule]) -> Vec<CalendarMonth> {
    let mut months: BTreeMap<YearMonth, CalendarMonth> = BTreeMap::new();
    for schedule in schedules {
        for entry in &schedule.entries {
            let period = entry.period();
            let bucket = months.entry(period).or_insert_with(|| CalendarMonth {
                period,
                total_due: Decimal::ZERO,
                entries: Vec::new(),
            });
            bucket.total_due += entry.amount_due;
            bucket.entries.push(CalendarEntry {
                fee_template_id: schedule.fee_template_id,
                name: schedule.name.clone(),
                amount_due: entry.amount_due,
            });
        }
    }
    months.into_values().collect()
}

pub fn compare_years(previous: Decimal, current: Decimal) -> YearComparison {
    let delta = current - previous;
    let percent_change = if previous.is_zero() {
        None
    } else {
        Some((delta / previous * Decimal::ONE_HUNDRED).round_dp(2))
    };
    YearComparison {
        previous_total: previous,
        current_total: current,
        delta,
        percent_change,
    }
}

pub struct CalendarService;

impl CalendarService {
    /// Schedules of every active fee template on the property for `year`.
    pub fn schedules_for_property(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
    ) -> Result<Vec<TemplateSchedule>, CoreError> {
        if portfolio.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        portfolio
            .fee_templates_for(property_id)
            .filter(|fee| fee.is_active)
            .map(|fee| -> Result<TemplateSchedule, CoreError> {
                Ok(TemplateSchedule {
                    fee_template_id: fee.id,
                    name: fee.name.clone(),
                    entries: build_schedule(fee, year)?,
                })
            })
            .collect()
    }

    pub fn for_property(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
    ) -> Result<Vec<CalendarMonth>, CoreError> {
        let schedules = Self::schedules_for_property(portfolio, property_id, year)?;
        Ok(aggregate_calendar(&schedules))
    }

    /// Expected totals of `year` compared with the year before.
    pub fn compare_with_previous_year(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
    ) -> Result<YearComparison, CoreError> {
        let total = |year: i32| -> Result<Decimal, CoreError> {
            Ok(Self::for_property(portfolio, property_id, year)?
                .iter()
                .map(|month| month.total_due)
                .sum())
        };
        let previous = year
            .checked_sub(1)
            .ok_or_else(|| CoreError::Validation(format!("no year precedes {year}")))?;
        Ok(compare_years(total(previous)?, total(year)?))
    }
}
