use chrono::NaiveDate;
use rentbook_core::{
    build_schedule, compute_due_months, summarize_year, CalendarService, ConfigurationError,
    DueService, FeeService, PaymentService, YearSummary,
};
use rentbook_domain::{
    FeeTemplate, FrequencyType, Owner, Payment, Portfolio, Property, PropertyKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn property_portfolio() -> (Portfolio, Uuid) {
    let mut portfolio = Portfolio::new("Integration");
    let owner = Owner::new("Hedda Brun");
    let property = Property::new(owner.id, "Lakeside 5", PropertyKind::Apartment);
    let property_id = property.id;
    portfolio.owners.push(owner);
    portfolio.properties.push(property);
    (portfolio, property_id)
}

#[test]
fn frequency_rules_produce_documented_months() {
    let cases: [(FrequencyType, Option<i32>, Vec<u32>); 6] = [
        (FrequencyType::Monthly, None, (1..=12).collect()),
        (FrequencyType::Annual, None, vec![1]),
        (FrequencyType::Biannual, None, vec![1, 7]),
        (FrequencyType::Quarterly, Some(3), vec![1, 4, 7, 10]),
        (FrequencyType::Quarterly, Some(4), vec![1, 5, 9]),
        (FrequencyType::SpecificMonth, Some(6), vec![6]),
    ];
    for (kind, value, expected) in cases {
        assert_eq!(compute_due_months(kind, value, 2025).unwrap(), expected, "{kind}");
    }
}

#[test]
fn malformed_frequency_text_is_a_configuration_error() {
    let err: ConfigurationError = "fortnightly"
        .parse::<FrequencyType>()
        .map_err(ConfigurationError::from)
        .unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownFrequency("fortnightly".into()));
    assert_eq!("specific-month".parse::<FrequencyType>(), Ok(FrequencyType::SpecificMonth));
}

#[test]
fn stored_templates_round_trip_into_schedules() {
    let (mut portfolio, property_id) = property_portfolio();
    let service = FeeService::add(
        &mut portfolio,
        FeeTemplate::new(property_id, "Service charge", dec!(450.00), FrequencyType::Quarterly, Some(3)),
    )
    .unwrap();
    let template = portfolio.fee_template(service).unwrap();
    let schedule = build_schedule(template, 2025).unwrap();
    assert_eq!(
        summarize_year(&schedule),
        YearSummary {
            total_amount: dec!(1800.00),
            months_with_payments: 4,
            average_per_active_month: dec!(450.00),
        }
    );
}

#[test]
fn paying_due_fees_empties_the_due_list() {
    let (mut portfolio, property_id) = property_portfolio();
    let insurance = FeeService::add(
        &mut portfolio,
        FeeTemplate::new(property_id, "Insurance", dec!(1200.00), FrequencyType::Annual, None),
    )
    .unwrap();
    FeeService::add(
        &mut portfolio,
        FeeTemplate::new(property_id, "Parking", dec!(35), FrequencyType::Monthly, None),
    )
    .unwrap();

    let due = DueService::unpaid_for_month(&portfolio, property_id, 2025, 1).unwrap();
    assert_eq!(due.len(), 2);
    assert_eq!(
        DueService::required_this_month(&portfolio, property_id, 2025, 1).unwrap(),
        dec!(1235)
    );

    let paid_on = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
    PaymentService::add(
        &mut portfolio,
        Payment::new(property_id, paid_on, dec!(1200)).for_fee(insurance),
    )
    .unwrap();
    let due = DueService::unpaid_for_month(&portfolio, property_id, 2025, 1).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].name, "Parking");

    let calendar = CalendarService::for_property(&portfolio, property_id, 2025).unwrap();
    assert_eq!(calendar.len(), 12);
    let yearly: Decimal = calendar.iter().map(|month| month.total_due).sum();
    assert_eq!(yearly, dec!(1620));
}
