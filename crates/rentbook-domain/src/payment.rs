//! Payments received against properties, fee templates, and rentals.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub property_id: Uuid,
    /// Fee template this payment settles, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_template_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_id: Option<Uuid>,
    pub paid_on: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(property_id: Uuid, paid_on: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            fee_template_id: None,
            rental_id: None,
            paid_on,
            amount,
            method: PaymentMethod::default(),
            reference: None,
            notes: None,
        }
    }

    pub fn for_fee(mut self, fee_template_id: Uuid) -> Self {
        self.fee_template_id = Some(fee_template_id);
        self
    }

    pub fn for_rental(mut self, rental_id: Uuid) -> Self {
        self.rental_id = Some(rental_id);
        self
    }

    /// Case-insensitive match against the reference and notes text.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [self.reference.as_deref(), self.notes.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Payment {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for Payment {
    fn display_label(&self) -> String {
        format!("payment:{} {} [{}]", self.paid_on, self.amount, self.method)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    Cash,
    #[default]
    BankTransfer,
    Card,
    Cheque,
    Other,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "bank" | "bank_transfer" | "transfer" => Some(PaymentMethod::BankTransfer),
            "card" => Some(PaymentMethod::Card),
            "cheque" | "check" => Some(PaymentMethod::Cheque),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Other => "Other",
        };
        f.write_str(label)
    }
}
