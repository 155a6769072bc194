//! Utility meters and their readings.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meter {
    pub id: Uuid,
    pub property_id: Uuid,
    pub kind: MeterKind,
    #[serde(default)]
    pub serial: String,
    /// Unit label shown next to readings, e.g. `kWh` or `m3`.
    #[serde(default)]
    pub unit: String,
    /// Sorted by date, strictly increasing.
    #[serde(default)]
    pub readings: Vec<MeterReading>,
}

impl Meter {
    pub fn new(property_id: Uuid, kind: MeterKind, serial: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            kind,
            serial: serial.into(),
            unit: kind.default_unit().to_string(),
            readings: Vec::new(),
        }
    }

    pub fn last_reading(&self) -> Option<&MeterReading> {
        self.readings.last()
    }

    /// Most recent reading taken on or before `date`.
    pub fn reading_at(&self, date: NaiveDate) -> Option<&MeterReading> {
        self.readings
            .iter()
            .take_while(|reading| reading.date <= date)
            .last()
    }
}

impl Identifiable for Meter {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Meter {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for Meter {
    fn display_label(&self) -> String {
        format!("{} meter {}", self.kind, self.serial)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeterReading {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MeterKind {
    Electricity,
    Water,
    Gas,
    Heating,
    Other,
}

impl MeterKind {
    pub fn default_unit(&self) -> &'static str {
        match self {
            MeterKind::Electricity => "kWh",
            MeterKind::Water | MeterKind::Gas => "m3",
            MeterKind::Heating => "MWh",
            MeterKind::Other => "",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "electricity" | "power" => Some(MeterKind::Electricity),
            "water" => Some(MeterKind::Water),
            "gas" => Some(MeterKind::Gas),
            "heating" | "heat" => Some(MeterKind::Heating),
            "other" => Some(MeterKind::Other),
            _ => None,
        }
    }
}

impl fmt::Display for MeterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeterKind::Electricity => "Electricity",
            MeterKind::Water => "Water",
            MeterKind::Gas => "Gas",
            MeterKind::Heating => "Heating",
            MeterKind::Other => "Other",
        };
        f.write_str(label)
    }
}
