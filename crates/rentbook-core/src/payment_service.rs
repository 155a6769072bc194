//! Recording, querying and totalling payments.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{DateWindow, EventKind, Payment, Portfolio, YearMonth};

use crate::{
    page::{paginate, Page},
    timeline_service::TimelineService,
    CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Filters applied by [`PaymentService::query`]. Unset fields match everything.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentQuery {
    pub property_id: Option<Uuid>,
    pub fee_template_id: Option<Uuid>,
    /// Inclusive lower bound on `paid_on`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on `paid_on`.
    pub to: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub search: Option<String>,
    pub sort: PaymentSort,
    pub page: usize,
    pub per_page: usize,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            property_id: None,
            fee_template_id: None,
            from: None,
            to: None,
            min_amount: None,
            max_amount: None,
            search: None,
            sort: PaymentSort::default(),
            page: 1,
            per_page: 20,
        }
    }
}

impl PaymentQuery {
    pub fn for_property(property_id: Uuid) -> Self {
        Self {
            property_id: Some(property_id),
            ..Self::default()
        }
    }

    fn matches(&self, payment: &Payment) -> bool {
        self.property_id.map_or(true, |id| payment.property_id == id)
            && self
                .fee_template_id
                .map_or(true, |id| payment.fee_template_id == Some(id))
            && self.from.map_or(true, |from| payment.paid_on >= from)
            && self.to.map_or(true, |to| payment.paid_on <= to)
            && self.min_amount.map_or(true, |min| payment.amount >= min)
            && self.max_amount.map_or(true, |max| payment.amount <= max)
            && self
                .search
                .as_deref()
                .map_or(true, |needle| payment.matches_text(needle))
    }

    fn compare(&self, a: &Payment, b: &Payment) -> Ordering {
        let primary = match self.sort.field {
            SortField::Date => a.paid_on.cmp(&b.paid_on),
            SortField::Amount => a.amount.cmp(&b.amount),
        };
        let ordered = match self.sort.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        ordered.then_with(|| a.id.cmp(&b.id))
    }
}

/// Amount received in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub period: YearMonth,
    pub total: Decimal,
}

pub struct PaymentService;

impl PaymentService {
    pub fn add(portfolio: &mut Portfolio, payment: Payment) -> Result<Uuid, CoreError> {
        if payment.amount <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "payment amount must be positive".into(),
            ));
        }
        if portfolio.property(payment.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(payment.property_id));
        }
        let mut title = format!("Payment of {} received", payment.amount);
        if let Some(fee_id) = payment.fee_template_id {
            let fee = portfolio
                .fee_template(fee_id)
                .ok_or(CoreError::FeeTemplateNotFound(fee_id))?;
            if fee.property_id != payment.property_id {
                return Err(CoreError::InvalidOperation(format!(
                    "fee template `{}` belongs to another property",
                    fee.name
                )));
            }
            title = format!("{} paid ({})", fee.name, payment.amount);
        }
        if let Some(rental_id) = payment.rental_id {
            let rental = portfolio
                .rental(rental_id)
                .ok_or(CoreError::RentalNotFound(rental_id))?;
            if rental.property_id != payment.property_id {
                return Err(CoreError::InvalidOperation(
                    "rental belongs to another property".into(),
                ));
            }
        }

        let id = payment.id;
        TimelineService::record(
            portfolio,
            payment.property_id,
            payment.paid_on,
            EventKind::PaymentReceived,
            title,
        );
        portfolio.payments.push(payment);
        portfolio.touch();
        Ok(id)
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> Result<Payment, CoreError> {
        let index = portfolio
            .payments
            .iter()
            .position(|payment| payment.id == id)
            .ok_or(CoreError::PaymentNotFound(id))?;
        let removed = portfolio.payments.remove(index);
        portfolio.touch();
        Ok(removed)
    }

    /// Filters, sorts (ties broken by id) and paginates payments.
    pub fn query(portfolio: &Portfolio, query: &PaymentQuery) -> Result<Page<Payment>, CoreError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(CoreError::Validation(format!(
                    "date range start {from} is after end {to}"
                )));
            }
        }
        let mut matched: Vec<Payment> = portfolio
            .payments
            .iter()
            .filter(|payment| query.matches(payment))
            .cloned()
            .collect();
        matched.sort_by(|a, b| query.compare(a, b));
        paginate(matched, query.page, query.per_page)
    }

    /// One total per month of `window`, zero-filled for months without payments.
    pub fn monthly_totals<'a, I>(payments: I, window: DateWindow) -> Vec<MonthlyTotal>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut totals: BTreeMap<YearMonth, Decimal> = window
            .months()
            .into_iter()
            .map(|period| (period, Decimal::ZERO))
            .collect();
        for payment in payments {
            if !window.contains(payment.paid_on) {
                continue;
            }
            if let Some(total) = totals.get_mut(&YearMonth::from_date(payment.paid_on)) {
                *total += payment.amount;
            }
        }
        totals
            .into_iter()
            .map(|(period, total)| MonthlyTotal { period, total })
            .collect()
    }

    /// Total received for a property during `year`.
    pub fn yearly_summary(
        portfolio: &Portfolio,
        property_id: Uuid,
        year: i32,
    ) -> Result<Decimal, CoreError> {
        if portfolio.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let window = DateWindow::year(year)?;
        Ok(portfolio
            .payments_for(property_id)
            .filter(|payment| window.contains(payment.paid_on))
            .map(|payment| payment.amount)
            .sum())
    }
}
