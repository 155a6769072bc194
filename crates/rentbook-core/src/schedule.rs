//! Fee schedule engine: which months a recurring fee falls due in, and how much.
//!
//! Every function here is pure. The year argument never changes the due months;
//! it only stamps the produced entries.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use rentbook_domain::{FeeTemplate, FrequencyType, ScheduleEntry};

use crate::{frequency::FrequencyRule, ConfigurationError};

/// Totals derived from a schedule for display in summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearSummary {
    pub total_amount: Decimal,
    pub months_with_payments: usize,
    pub average_per_active_month: Decimal,
}

/// Months (1-12, ascending, unique) in which a fee with this rule is due.
pub fn compute_due_months(
    frequency_type: FrequencyType,
    frequency_value: Option<i32>,
    year: i32,
) -> Result<Vec<u32>, ConfigurationError> {
    let months = checked_rule(frequency_type, frequency_value, year)?.due_months();
    debug!(%frequency_type, ?frequency_value, year, ?months, "computed due months");
    Ok(months)
}

fn checked_rule(
    frequency_type: FrequencyType,
    frequency_value: Option<i32>,
    year: i32,
) -> Result<FrequencyRule, ConfigurationError> {
    FrequencyRule::from_parts(frequency_type, frequency_value).map_err(|err| {
        warn!(%frequency_type, ?frequency_value, year, "rejecting fee frequency: {err}");
        err
    })
}

/// Builds the full schedule of a template for `year`.
///
/// Callers filter inactive templates; the engine schedules whatever it is given.
pub fn build_schedule(
    template: &FeeTemplate,
    year: i32,
) -> Result<Vec<ScheduleEntry>, ConfigurationError> {
    let months = compute_due_months(template.frequency_type, template.frequency_value, year)?;
    Ok(months
        .into_iter()
        .map(|month| ScheduleEntry {
            month,
            year,
            amount_due: template.amount,
        })
        .collect())
}

pub fn is_due_this_month(
    template: &FeeTemplate,
    year: i32,
    month: u32,
) -> Result<bool, ConfigurationError> {
    let rule = checked_rule(template.frequency_type, template.frequency_value, year)?;
    Ok(rule.is_due_in(month))
}

pub fn summarize_year(schedule: &[ScheduleEntry]) -> YearSummary {
    let total_amount: Decimal = schedule.iter().map(|entry| entry.amount_due).sum();
    let months_with_payments = schedule
        .iter()
        .map(|entry| entry.month)
        .collect::<BTreeSet<_>>()
        .len();
    let divisor = Decimal::from(months_with_payments.max(1));
    YearSummary {
        total_amount,
        months_with_payments,
        average_per_active_month: total_amount / divisor,
    }
}
