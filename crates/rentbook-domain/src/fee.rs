//! Recurring fee templates and the schedule entries derived from them.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Recurrence category of a fee template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyType {
    Monthly,
    Quarterly,
    Biannual,
    Annual,
    SpecificMonth,
}

impl FrequencyType {
    pub const ALL: [FrequencyType; 5] = [
        FrequencyType::Monthly,
        FrequencyType::Quarterly,
        FrequencyType::Biannual,
        FrequencyType::Annual,
        FrequencyType::SpecificMonth,
    ];

    /// Canonical identifier as stored in fee records.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyType::Monthly => "monthly",
            FrequencyType::Quarterly => "quarterly",
            FrequencyType::Biannual => "biannual",
            FrequencyType::Annual => "annual",
            FrequencyType::SpecificMonth => "specific_month",
        }
    }

    /// Whether `frequency_value` carries meaning for this type.
    pub fn requires_value(&self) -> bool {
        matches!(self, FrequencyType::Quarterly | FrequencyType::SpecificMonth)
    }
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyType {
    type Err = ParseFrequencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        FrequencyType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseFrequencyError(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when text does not name one of the known frequency types.
pub struct ParseFrequencyError(pub String);

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency type `{}`", self.0)
    }
}

impl std::error::Error for ParseFrequencyError {}

/// A recurring charge definition attached to a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeTemplate {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub frequency_type: FrequencyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_value: Option<i32>,
    #[serde(default = "FeeTemplate::default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FeeTemplate {
    pub fn new(
        property_id: Uuid,
        name: impl Into<String>,
        amount: Decimal,
        frequency_type: FrequencyType,
        frequency_value: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            name: name.into(),
            amount,
            frequency_type,
            frequency_value,
            is_active: true,
            notes: None,
        }
    }

    fn default_active() -> bool {
        true
    }
}

impl Identifiable for FeeTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FeeTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

impl BelongsToProperty for FeeTemplate {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for FeeTemplate {
    fn display_label(&self) -> String {
        let status = if self.is_active { "" } else { " (inactive)" };
        match self.frequency_value {
            Some(value) if self.frequency_type.requires_value() => format!(
                "{} {} [{} {}]{}",
                self.name, self.amount, self.frequency_type, value, status
            ),
            _ => format!(
                "{} {} [{}]{}",
                self.name, self.amount, self.frequency_type, status
            ),
        }
    }
}

/// One computed due-month/amount pair for a fee template in a given year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub month: u32,
    pub year: i32,
    pub amount_due: Decimal,
}

impl ScheduleEntry {
    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}
