//! Cross-references fee schedules with recorded payments.

use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{DateWindow, Portfolio, YearMonth};

use crate::{schedule::is_due_this_month, CoreError};

/// A fee due in a month with no matching payment recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DueNotice {
    pub fee_template_id: Uuid,
    pub name: String,
    pub amount_due: Decimal,
    pub period: YearMonth,
}

pub struct DueService;

impl DueService {
    /// Active fees due in `year`/`month` that no payment in that month references.
    pub fn unpaid_for_month(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<DueNotice>, CoreError> {
        let period = Self::period(year, month)?;
        if portfolio.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let window = DateWindow::month(period)?;
        let mut notices = Vec::new();
        for fee in portfolio
            .fee_templates_for(property_id)
            .filter(|fee| fee.is_active)
        {
            if !is_due_this_month(fee, year, month)? {
                continue;
            }
            let paid = portfolio.payments_for(property_id).any(|payment| {
                payment.fee_template_id == Some(fee.id) && window.contains(payment.paid_on)
            });
            if !paid {
                notices.push(DueNotice {
                    fee_template_id: fee.id,
                    name: fee.name.clone(),
                    amount_due: fee.amount,
                    period,
                });
            }
        }
        Ok(notices)
    }

    /// Sum of every active fee due in the month, paid or not.
    pub fn required_this_month(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Decimal, CoreError> {
        Self::period(year, month)?;
        if portfolio.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let mut total = Decimal::ZERO;
        for fee in portfolio
            .fee_templates_for(property_id)
            .filter(|fee| fee.is_active)
        {
            if is_due_this_month(fee, year, month)? {
                total += fee.amount;
            }
        }
        Ok(total)
    }

    fn period(year: i32, month: u32) -> Result<YearMonth, CoreError> {
        YearMonth::new(year, month)
            .ok_or_else(|| CoreError::Validation(format!("month must be 1-12, got {month}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rentbook_domain::{FeeTemplate, FrequencyType, Owner, Payment, Property, PropertyKind};
    use rust_decimal_macros::dec;

    struct Fixture {
        portfolio: Portfolio,
        property_id: Uuid,
        service_charge: Uuid,
        insurance: Uuid,
    }

    fn fixture() -> Fixture {
        let mut portfolio = Portfolio::new("Due");
        let owner = Owner::new("Lin");
        let property = Property::new(owner.id, "Canal Loft", PropertyKind::Apartment);
        let property_id = property.id;
        portfolio.owners.push(owner);
        portfolio.properties.push(property);
        let service = FeeTemplate::new(
            property_id,
            "Service charge",
            dec!(450),
            FrequencyType::Quarterly,
            Some(3),
        );
        let insurance = FeeTemplate::new(
            property_id,
            "Insurance",
            dec!(1200),
            FrequencyType::Annual,
            None,
        );
        let ids = (service.id, insurance.id);
        portfolio.fee_templates.push(service);
        portfolio.fee_templates.push(insurance);
        Fixture {
            portfolio,
            property_id,
            service_charge: ids.0,
            insurance: ids.1,
        }
    }

    #[test]
    fn reports_every_unpaid_fee_due_in_month() {
        let fx = fixture();
        let notices = DueService::unpaid_for_month(&fx.portfolio, fx.property_id, 2025, 1).unwrap();
        let ids: Vec<Uuid> = notices.iter().map(|n| n.fee_template_id).collect();
        assert_eq!(ids, vec![fx.service_charge, fx.insurance]);
        assert_eq!(notices[0].period, YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn payment_inside_month_clears_notice() {
        let mut fx = fixture();
        fx.portfolio.payments.push(
            Payment::new(
                fx.property_id,
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                dec!(1200),
            )
            .for_fee(fx.insurance),
        );
        // a service-charge payment from the previous month must not count
        fx.portfolio.payments.push(
            Payment::new(
                fx.property_id,
                NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
                dec!(450),
            )
            .for_fee(fx.service_charge),
        );
        let notices = DueService::unpaid_for_month(&fx.portfolio, fx.property_id, 2025, 1).unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].fee_template_id, fx.service_charge);
    }

    #[test]
    fn months_without_due_fees_are_quiet() {
        let fx = fixture();
        let notices = DueService::unpaid_for_month(&fx.portfolio, fx.property_id, 2025, 2).unwrap();
        assert!(notices.is_empty());
    }

    #[test]
    fn inactive_fees_are_skipped() {
        let mut fx = fixture();
        let insurance = fx.insurance;
        fx.portfolio.fee_template_mut(insurance).unwrap().is_active = false;
        let required =
            DueService::required_this_month(&fx.portfolio, fx.property_id, 2025, 1).unwrap();
        assert_eq!(required, dec!(450));
    }

    #[test]
    fn rejects_out_of_range_month() {
        let fx = fixture();
        let err = DueService::unpaid_for_month(&fx.portfolio, fx.property_id, 2025, 13).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn december_of_last_year_is_rejected() {
        let fx = fixture();
        let err =
            DueService::unpaid_for_month(&fx.portfolio, fx.property_id, i32::MAX, 12).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
