//! Rental agreements binding a tenant to a property for a period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rental {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    /// Last day of occupancy; `None` while the agreement is open-ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Decimal,
    #[serde(default)]
    pub deposit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Rental {
    pub fn new(
        property_id: Uuid,
        tenant_id: Uuid,
        start_date: NaiveDate,
        monthly_rent: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            tenant_id,
            start_date,
            end_date: None,
            monthly_rent,
            deposit: Decimal::ZERO,
            notes: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Returns `true` when the rental covers `date` (both bounds inclusive).
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| date <= end)
    }

    /// Returns `true` when the rental is active on or after `date`.
    pub fn is_current_or_future(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| end >= date)
    }

    pub fn overlaps(&self, other: &Rental) -> bool {
        let self_before_other = self.end_date.is_some_and(|end| end < other.start_date);
        let other_before_self = other.end_date.is_some_and(|end| end < self.start_date);
        !(self_before_other || other_before_self)
    }
}

impl Identifiable for Rental {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Rental {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for Rental {
    fn display_label(&self) -> String {
        match self.end_date {
            Some(end) => format!("rental:{} {}..{}", self.id, self.start_date, end),
            None => format!("rental:{} {}..", self.id, self.start_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_ended_rental_is_active_after_start() {
        let rental = Rental::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 3, 1), Decimal::ONE);
        assert!(!rental.is_active_on(date(2024, 2, 29)));
        assert!(rental.is_active_on(date(2024, 3, 1)));
        assert!(rental.is_active_on(date(2030, 1, 1)));
    }

    #[test]
    fn overlap_uses_inclusive_bounds() {
        let property = Uuid::new_v4();
        let first = Rental::new(property, Uuid::new_v4(), date(2024, 1, 1), Decimal::ONE)
            .with_end_date(date(2024, 6, 30));
        let adjacent = Rental::new(property, Uuid::new_v4(), date(2024, 7, 1), Decimal::ONE);
        let touching = Rental::new(property, Uuid::new_v4(), date(2024, 6, 30), Decimal::ONE);
        assert!(!first.overlaps(&adjacent));
        assert!(!adjacent.overlaps(&first));
        assert!(first.overlaps(&touching));
    }
}
