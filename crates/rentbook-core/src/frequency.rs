//! Validated frequency rules derived from fee template fields.

use std::fmt;

use rentbook_domain::{FeeTemplate, FrequencyType};

use crate::ConfigurationError;

/// First month of every schedule. Quarterly steps count from here.
pub const ANCHOR_MONTH: u32 = 1;
const BIANNUAL_MONTHS: [u32; 2] = [1, 7];
const MONTHS_PER_YEAR: u32 = 12;

/// A frequency type paired with a value that is known to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyRule {
    Monthly,
    Quarterly { interval: u32 },
    Biannual,
    Annual,
    SpecificMonth(u32),
}

impl FrequencyRule {
    /// Validates the `(frequency_type, frequency_value)` pair.
    ///
    /// `frequency_value` is ignored for monthly, biannual, and annual rules.
    pub fn from_parts(
        kind: FrequencyType,
        value: Option<i32>,
    ) -> Result<FrequencyRule, ConfigurationError> {
        match kind {
            FrequencyType::Monthly => Ok(FrequencyRule::Monthly),
            FrequencyType::Biannual => Ok(FrequencyRule::Biannual),
            FrequencyType::Annual => Ok(FrequencyRule::Annual),
            FrequencyType::Quarterly => {
                let interval = value.ok_or(ConfigurationError::MissingFrequencyValue(kind))?;
                if interval <= 0 {
                    return Err(ConfigurationError::NonPositiveInterval(interval));
                }
                Ok(FrequencyRule::Quarterly {
                    interval: interval as u32,
                })
            }
            FrequencyType::SpecificMonth => {
                let month = value.ok_or(ConfigurationError::MissingFrequencyValue(kind))?;
                if !(1..=MONTHS_PER_YEAR as i32).contains(&month) {
                    return Err(ConfigurationError::MonthOutOfRange(month));
                }
                Ok(FrequencyRule::SpecificMonth(month as u32))
            }
        }
    }

    /// Parses the textual frequency type as stored in fee records.
    pub fn parse(kind: &str, value: Option<i32>) -> Result<FrequencyRule, ConfigurationError> {
        let kind: FrequencyType = kind.parse()?;
        Self::from_parts(kind, value)
    }

    pub fn of(template: &FeeTemplate) -> Result<FrequencyRule, ConfigurationError> {
        Self::from_parts(template.frequency_type, template.frequency_value)
    }

    pub fn kind(&self) -> FrequencyType {
        match self {
            FrequencyRule::Monthly => FrequencyType::Monthly,
            FrequencyRule::Quarterly { .. } => FrequencyType::Quarterly,
            FrequencyRule::Biannual => FrequencyType::Biannual,
            FrequencyRule::Annual => FrequencyType::Annual,
            FrequencyRule::SpecificMonth(_) => FrequencyType::SpecificMonth,
        }
    }

    /// Due months in ascending order without duplicates.
    pub fn due_months(&self) -> Vec<u32> {
        match *self {
            FrequencyRule::Monthly => (1..=MONTHS_PER_YEAR).collect(),
            FrequencyRule::Quarterly { interval } => (ANCHOR_MONTH..=MONTHS_PER_YEAR)
                .step_by(interval.max(1) as usize)
                .collect(),
            FrequencyRule::Biannual => BIANNUAL_MONTHS.to_vec(),
            FrequencyRule::Annual => vec![ANCHOR_MONTH],
            FrequencyRule::SpecificMonth(month) => vec![month],
        }
    }

    pub fn is_due_in(&self, month: u32) -> bool {
        match *self {
            FrequencyRule::Monthly => (1..=MONTHS_PER_YEAR).contains(&month),
            FrequencyRule::Quarterly { interval } => {
                (ANCHOR_MONTH..=MONTHS_PER_YEAR).contains(&month)
                    && (month - ANCHOR_MONTH) % interval.max(1) == 0
            }
            FrequencyRule::Biannual => BIANNUAL_MONTHS.contains(&month),
            FrequencyRule::Annual => month == ANCHOR_MONTH,
            FrequencyRule::SpecificMonth(due) => month == due,
        }
    }
}

impl fmt::Display for FrequencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyRule::Monthly => f.write_str("Monthly"),
            FrequencyRule::Quarterly { interval: 3 } => f.write_str("Quarterly"),
            FrequencyRule::Quarterly { interval } => write!(f, "Every {interval} months"),
            FrequencyRule::Biannual => f.write_str("January and July"),
            FrequencyRule::Annual => f.write_str("Yearly in January"),
            FrequencyRule::SpecificMonth(month) => {
                write!(f, "Yearly in {}", month_name(*month))
            }
        }
    }
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|index| NAMES.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarterly_step_larger_than_year_yields_january_only() {
        let rule = FrequencyRule::from_parts(FrequencyType::Quarterly, Some(12)).unwrap();
        assert_eq!(rule.due_months(), vec![1]);
        let rule = FrequencyRule::from_parts(FrequencyType::Quarterly, Some(40)).unwrap();
        assert_eq!(rule.due_months(), vec![1]);
    }

    #[test]
    fn ignores_value_for_fixed_rules() {
        let rule = FrequencyRule::from_parts(FrequencyType::Biannual, Some(99)).unwrap();
        assert_eq!(rule, FrequencyRule::Biannual);
        let rule = FrequencyRule::from_parts(FrequencyType::Annual, Some(-3)).unwrap();
        assert_eq!(rule, FrequencyRule::Annual);
    }

    #[test]
    fn is_due_in_agrees_with_due_months() {
        let rules = [
            FrequencyRule::Monthly,
            FrequencyRule::Quarterly { interval: 3 },
            FrequencyRule::Quarterly { interval: 5 },
            FrequencyRule::Biannual,
            FrequencyRule::Annual,
            FrequencyRule::SpecificMonth(11),
        ];
        for rule in rules {
            let months = rule.due_months();
            for month in 0..=13 {
                assert_eq!(
                    rule.is_due_in(month),
                    months.contains(&month),
                    "{rule} month {month}"
                );
            }
        }
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let err = FrequencyRule::parse("weekly", None).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownFrequency("weekly".into()));
    }

    #[test]
    fn missing_values_are_reported_per_type() {
        assert_eq!(
            FrequencyRule::from_parts(FrequencyType::SpecificMonth, None).unwrap_err(),
            ConfigurationError::MissingFrequencyValue(FrequencyType::SpecificMonth)
        );
        assert_eq!(
            FrequencyRule::from_parts(FrequencyType::Quarterly, Some(-1)).unwrap_err(),
            ConfigurationError::NonPositiveInterval(-1)
        );
    }

    #[test]
    fn labels_read_naturally() {
        assert_eq!(FrequencyRule::Quarterly { interval: 3 }.to_string(), "Quarterly");
        assert_eq!(
            FrequencyRule::Quarterly { interval: 4 }.to_string(),
            "Every 4 months"
        );
        assert_eq!(FrequencyRule::SpecificMonth(6).to_string(), "Yearly in June");
        assert_eq!(month_name(0), "Unknown");
    }
}
