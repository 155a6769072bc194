use tracing::warn;
use uuid::Uuid;

use rentbook_domain::{Portfolio, Property};

use crate::{time::Clock, CoreError};

pub struct PropertyService;

impl PropertyService {
    pub fn add(portfolio: &mut Portfolio, property: Property) -> Result<Uuid, CoreError> {
        Self::validate(portfolio, &property)?;
        let id = property.id;
        portfolio.properties.push(property);
        portfolio.touch();
        Ok(id)
    }

    pub fn edit<F>(portfolio: &mut Portfolio, id: Uuid, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Property),
    {
        let mut updated = portfolio
            .property(id)
            .cloned()
            .ok_or(CoreError::PropertyNotFound(id))?;
        mutate(&mut updated);
        updated.id = id;
        Self::validate(portfolio, &updated)?;
        if let Some(cover) = updated.cover_image_id {
            if !portfolio
                .images
                .iter()
                .any(|image| image.id == cover && image.property_id == id)
            {
                return Err(CoreError::ImageNotFound(cover));
            }
        }
        if let Some(slot) = portfolio.property_mut(id) {
            *slot = updated;
        }
        portfolio.touch();
        Ok(())
    }

    /// Removes the property with its fees, payments, meters, media and events.
    ///
    /// Refused while any rental of the property is active today or later.
    pub fn remove(
        portfolio: &mut Portfolio,
        id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Property, CoreError> {
        let index = portfolio
            .properties
            .iter()
            .position(|property| property.id == id)
            .ok_or(CoreError::PropertyNotFound(id))?;
        let today = clock.today();
        if portfolio
            .rentals_for(id)
            .any(|rental| rental.is_current_or_future(today))
        {
            return Err(CoreError::InvalidOperation(format!(
                "property `{}` has a current or upcoming rental",
                portfolio.properties[index].name
            )));
        }

        let removed = portfolio.properties.remove(index);
        let before = Self::dependent_count(portfolio);
        portfolio.rentals.retain(|rental| rental.property_id != id);
        portfolio.fee_templates.retain(|fee| fee.property_id != id);
        portfolio.payments.retain(|payment| payment.property_id != id);
        portfolio.meters.retain(|meter| meter.property_id != id);
        portfolio
            .attachments
            .retain(|attachment| attachment.property_id != id);
        portfolio.images.retain(|image| image.property_id != id);
        portfolio.events.retain(|event| event.property_id != id);
        let cascaded = before - Self::dependent_count(portfolio);
        if cascaded > 0 {
            warn!(property_id = %id, cascaded, "removed property together with dependent records");
        }
        portfolio.touch();
        Ok(removed)
    }

    fn dependent_count(portfolio: &Portfolio) -> usize {
        portfolio.rentals.len()
            + portfolio.fee_templates.len()
            + portfolio.payments.len()
            + portfolio.meters.len()
            + portfolio.attachments.len()
            + portfolio.images.len()
            + portfolio.events.len()
    }

    fn validate(portfolio: &Portfolio, property: &Property) -> Result<(), CoreError> {
        if property.name.trim().is_empty() {
            return Err(CoreError::Validation("property name cannot be empty".into()));
        }
        if portfolio.owner(property.owner_id).is_none() {
            return Err(CoreError::OwnerNotFound(property.owner_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;
    use rentbook_domain::{
        FeeTemplate, FrequencyType, Image, Owner, Payment, PropertyKind, Rental, Tenant,
    };
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> (Portfolio, Uuid) {
        let mut portfolio = Portfolio::new("Properties");
        let owner = Owner::new("Mira Sand");
        let owner_id = owner.id;
        portfolio.owners.push(owner);
        let id = PropertyService::add(
            &mut portfolio,
            Property::new(owner_id, "Pier Flat", PropertyKind::Apartment),
        )
        .unwrap();
        (portfolio, id)
    }

    #[test]
    fn add_requires_existing_owner() {
        let mut portfolio = Portfolio::new("Properties");
        let orphan = Property::new(Uuid::new_v4(), "Nowhere", PropertyKind::Land);
        assert!(matches!(
            PropertyService::add(&mut portfolio, orphan),
            Err(CoreError::OwnerNotFound(_))
        ));
    }

    #[test]
    fn cover_image_must_belong_to_property() {
        let (mut portfolio, id) = seeded();
        let stray = Uuid::new_v4();
        assert!(PropertyService::edit(&mut portfolio, id, |p| p.cover_image_id = Some(stray)).is_err());

        let image = Image::new(id, "front.jpg");
        let image_id = image.id;
        portfolio.images.push(image);
        PropertyService::edit(&mut portfolio, id, |p| p.cover_image_id = Some(image_id)).unwrap();
        assert_eq!(portfolio.property(id).unwrap().cover_image_id, Some(image_id));
    }

    #[test]
    fn remove_refused_while_rental_runs() {
        let (mut portfolio, id) = seeded();
        let tenant = Tenant::new("Otto Lind");
        let rental = Rental::new(id, tenant.id, date(2025, 1, 1), dec!(1100))
            .with_end_date(date(2025, 12, 31));
        portfolio.tenants.push(tenant);
        portfolio.rentals.push(rental);

        let during = FixedClock::on(date(2025, 6, 1));
        assert!(matches!(
            PropertyService::remove(&mut portfolio, id, &during),
            Err(CoreError::InvalidOperation(_))
        ));

        let after = FixedClock::on(date(2026, 2, 1));
        PropertyService::remove(&mut portfolio, id, &after).unwrap();
        assert!(portfolio.rentals.is_empty());
    }

    #[test]
    fn remove_cascades_dependents() {
        let (mut portfolio, id) = seeded();
        let fee = FeeTemplate::new(id, "Parking", dec!(40), FrequencyType::Monthly, None);
        let fee_id = fee.id;
        portfolio.fee_templates.push(fee);
        portfolio
            .payments
            .push(Payment::new(id, date(2025, 2, 1), dec!(40)).for_fee(fee_id));
        portfolio.images.push(Image::new(id, "hall.png"));

        PropertyService::remove(&mut portfolio, id, &FixedClock::on(date(2025, 3, 1))).unwrap();
        assert!(portfolio.properties.is_empty());
        assert!(portfolio.fee_templates.is_empty());
        assert!(portfolio.payments.is_empty());
        assert!(portfolio.images.is_empty());
        assert_eq!(portfolio.owners.len(), 1);
    }
}
