use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{Meter, MeterReading, Portfolio};

use crate::CoreError;

pub struct MeterService;

impl MeterService {
    pub fn add(portfolio: &mut Portfolio, meter: Meter) -> Result<Uuid, CoreError> {
        if portfolio.property(meter.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(meter.property_id));
        }
        let duplicate = !meter.serial.is_empty()
            && portfolio
                .meters
                .iter()
                .any(|other| other.property_id == meter.property_id && other.serial == meter.serial);
        if duplicate {
            return Err(CoreError::Validation(format!(
                "meter `{}` is already registered on this property",
                meter.serial
            )));
        }
        let id = meter.id;
        portfolio.meters.push(meter);
        portfolio.touch();
        Ok(id)
    }

    /// Appends a reading. Dates must increase strictly and values must never drop.
    pub fn record_reading(
        portfolio: &mut Portfolio,
        meter_id: Uuid,
        reading: MeterReading,
    ) -> Result<(), CoreError> {
        let meter = portfolio
            .meter_mut(meter_id)
            .ok_or(CoreError::MeterNotFound(meter_id))?;
        if reading.value < Decimal::ZERO {
            return Err(CoreError::Validation("meter readings cannot be negative".into()));
        }
        if let Some(last) = meter.last_reading() {
            if reading.date <= last.date {
                return Err(CoreError::Validation(format!(
                    "reading date {} must be after the last reading on {}",
                    reading.date, last.date
                )));
            }
            if reading.value < last.value {
                return Err(CoreError::Validation(format!(
                    "reading {} is lower than the previous value {}",
                    reading.value, last.value
                )));
            }
        }
        meter.readings.push(reading);
        portfolio.touch();
        Ok(())
    }

    /// Units consumed between the readings in effect on `from` and on `to`.
    pub fn consumption(
        portfolio: &Portfolio,
        meter_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Decimal, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "range start {from} is after end {to}"
            )));
        }
        let meter = portfolio
            .meter(meter_id)
            .ok_or(CoreError::MeterNotFound(meter_id))?;
        let start = meter.reading_at(from).ok_or_else(|| {
            CoreError::InvalidOperation(format!("no reading on or before {from}"))
        })?;
        let end = meter.reading_at(to).unwrap_or(start);
        Ok(end.value - start.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbook_domain::{MeterKind, Owner, Property, PropertyKind};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Portfolio, Uuid) {
        let mut portfolio = Portfolio::new("Meters");
        let owner = Owner::new("Ulla Ring");
        let property = Property::new(owner.id, "Fjord 12", PropertyKind::Apartment);
        let meter = Meter::new(property.id, MeterKind::Electricity, "EL-0042");
        portfolio.owners.push(owner);
        portfolio.properties.push(property);
        let id = MeterService::add(&mut portfolio, meter).unwrap();
        (portfolio, id)
    }

    fn reading(date: NaiveDate, value: Decimal) -> MeterReading {
        MeterReading { date, value }
    }

    #[test]
    fn readings_must_move_forward() {
        let (mut portfolio, id) = setup();
        MeterService::record_reading(&mut portfolio, id, reading(date(2025, 1, 1), dec!(1000)))
            .unwrap();
        assert!(
            MeterService::record_reading(&mut portfolio, id, reading(date(2025, 1, 1), dec!(1010)))
                .is_err()
        );
        assert!(
            MeterService::record_reading(&mut portfolio, id, reading(date(2025, 2, 1), dec!(999)))
                .is_err()
        );
        MeterService::record_reading(&mut portfolio, id, reading(date(2025, 2, 1), dec!(1000)))
            .unwrap();
        assert_eq!(portfolio.meter(id).unwrap().readings.len(), 2);
    }

    #[test]
    fn consumption_uses_readings_in_effect() {
        let (mut portfolio, id) = setup();
        for (m, value) in [(1, dec!(1000)), (2, dec!(1180.5)), (4, dec!(1400))] {
            MeterService::record_reading(&mut portfolio, id, reading(date(2025, m, 1), value))
                .unwrap();
        }
        assert_eq!(
            MeterService::consumption(&portfolio, id, date(2025, 1, 15), date(2025, 3, 31)).unwrap(),
            dec!(180.5)
        );
        assert_eq!(
            MeterService::consumption(&portfolio, id, date(2025, 1, 1), date(2025, 4, 1)).unwrap(),
            dec!(400)
        );
        assert!(MeterService::consumption(&portfolio, id, date(2024, 12, 1), date(2025, 2, 1)).is_err());
    }

    #[test]
    fn duplicate_serial_rejected() {
        let (mut portfolio, _) = setup();
        let property_id = portfolio.properties[0].id;
        let again = Meter::new(property_id, MeterKind::Electricity, "EL-0042");
        assert!(MeterService::add(&mut portfolio, again).is_err());
    }
}
