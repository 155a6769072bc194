//! Property event timeline.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub property_id: Uuid,
    pub occurred_on: NaiveDate,
    pub kind: EventKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TimelineEvent {
    pub fn new(
        property_id: Uuid,
        occurred_on: NaiveDate,
        kind: EventKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            occurred_on,
            kind,
            title: title.into(),
            details: None,
        }
    }
}

impl Identifiable for TimelineEvent {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for TimelineEvent {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for TimelineEvent {
    fn display_label(&self) -> String {
        format!("{} [{}] {}", self.occurred_on, self.kind, self.title)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    Note,
    Maintenance,
    Inspection,
    RentalStarted,
    RentalEnded,
    PaymentReceived,
    Other,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Note => "Note",
            EventKind::Maintenance => "Maintenance",
            EventKind::Inspection => "Inspection",
            EventKind::RentalStarted => "Rental Started",
            EventKind::RentalEnded => "Rental Ended",
            EventKind::PaymentReceived => "Payment Received",
            EventKind::Other => "Other",
        };
        f.write_str(label)
    }
}
