use rentbook::{
    init,
    rentbook_core::{build_schedule, summarize_year, DueService, FeeService, OwnerService, PropertyService},
    rentbook_domain::{FeeTemplate, FrequencyType, Owner, Portfolio, Property, PropertyKind},
};
use rust_decimal_macros::dec;

#[test]
fn portfolio_schedule_smoke() {
    init();

    let mut portfolio = Portfolio::new("SmokeTest");
    let owner_id = OwnerService::add(&mut portfolio, Owner::new("Priya")).unwrap();
    let property_id = PropertyService::add(
        &mut portfolio,
        Property::new(owner_id, "Canal Flat", PropertyKind::Apartment),
    )
    .unwrap();
    let fee_id = FeeService::add(
        &mut portfolio,
        FeeTemplate::new(property_id, "Service charge", dec!(450), FrequencyType::Quarterly, Some(3)),
    )
    .unwrap();

    let fee = portfolio.fee_template(fee_id).unwrap();
    let schedule = build_schedule(fee, 2025).unwrap();
    assert_eq!(schedule.len(), 4);
    assert_eq!(summarize_year(&schedule).total_amount, dec!(1800));

    let required = DueService::required_this_month(&portfolio, property_id, 2025, 4).unwrap();
    assert_eq!(required, dec!(450));
}
