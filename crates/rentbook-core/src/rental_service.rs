use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{EventKind, Portfolio, Rental};

use crate::{timeline_service::TimelineService, CoreError};

pub struct RentalService;

impl RentalService {
    pub fn add(portfolio: &mut Portfolio, rental: Rental) -> Result<Uuid, CoreError> {
        Self::validate(portfolio, &rental)?;
        let tenant_name = portfolio
            .tenant(rental.tenant_id)
            .map(|tenant| tenant.name.clone())
            .unwrap_or_default();
        TimelineService::record(
            portfolio,
            rental.property_id,
            rental.start_date,
            EventKind::RentalStarted,
            format!("Rental started for {tenant_name}"),
        );
        let id = rental.id;
        portfolio.rentals.push(rental);
        portfolio.touch();
        Ok(id)
    }

    /// Closes an open-ended or later-ending rental on `end_date` (inclusive).
    pub fn end(portfolio: &mut Portfolio, id: Uuid, end_date: NaiveDate) -> Result<(), CoreError> {
        let rental = portfolio
            .rental(id)
            .ok_or(CoreError::RentalNotFound(id))?;
        if end_date < rental.start_date {
            return Err(CoreError::Validation(format!(
                "end date {end_date} precedes start date {}",
                rental.start_date
            )));
        }
        if rental.end_date.is_some_and(|current| current < end_date) {
            return Err(CoreError::InvalidOperation(format!(
                "rental already ended before {end_date}"
            )));
        }
        let property_id = rental.property_id;
        if let Some(rental) = portfolio.rental_mut(id) {
            rental.end_date = Some(end_date);
        }
        TimelineService::record(
            portfolio,
            property_id,
            end_date,
            EventKind::RentalEnded,
            "Rental ended".to_string(),
        );
        portfolio.touch();
        Ok(())
    }

    /// Rentals covering `date`, across every property.
    pub fn active_on(portfolio: &Portfolio, date: NaiveDate) -> Vec<&Rental> {
        portfolio
            .rentals
            .iter()
            .filter(|rental| rental.is_active_on(date))
            .collect()
    }

    fn validate(portfolio: &Portfolio, rental: &Rental) -> Result<(), CoreError> {
        if portfolio.property(rental.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(rental.property_id));
        }
        if portfolio.tenant(rental.tenant_id).is_none() {
            return Err(CoreError::TenantNotFound(rental.tenant_id));
        }
        if rental.monthly_rent <= Decimal::ZERO {
            return Err(CoreError::Validation("monthly rent must be positive".into()));
        }
        if rental.deposit < Decimal::ZERO {
            return Err(CoreError::Validation("deposit cannot be negative".into()));
        }
        if let Some(end) = rental.end_date {
            if end < rental.start_date {
                return Err(CoreError::Validation(format!(
                    "end date {end} precedes start date {}",
                    rental.start_date
                )));
            }
        }
        if portfolio
            .rentals_for(rental.property_id)
            .any(|other| other.id != rental.id && other.overlaps(rental))
        {
            return Err(CoreError::InvalidOperation(
                "rental overlaps an existing rental of this property".into(),
            ));
        }
        Ok(())
    }
}
