use std::fs;

use chrono::NaiveDate;
use rentbook::{
    errors::PersistenceError,
    rentbook_core::{FeeService, OwnerService, PaymentService, PropertyService},
    rentbook_domain::{
        FeeTemplate, FrequencyType, Owner, Payment, Portfolio, Property, PropertyKind,
        CURRENT_SCHEMA_VERSION,
    },
    utils::persistence::{load_portfolio_from_file, save_portfolio_to_file},
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn sample_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new("Reliable");
    let owner_id = OwnerService::add(&mut portfolio, Owner::new("Ines")).unwrap();
    let property_id = PropertyService::add(
        &mut portfolio,
        Property::new(owner_id, "Mill House", PropertyKind::House),
    )
    .unwrap();
    let fee_id = FeeService::add(
        &mut portfolio,
        FeeTemplate::new(
            property_id,
            "Ground rent",
            dec!(320),
            FrequencyType::SpecificMonth,
            Some(6),
        ),
    )
    .unwrap();
    PaymentService::add(
        &mut portfolio,
        Payment::new(
            property_id,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            dec!(320),
        )
        .for_fee(fee_id),
    )
    .unwrap();
    portfolio
}

#[test]
fn portfolio_survives_save_and_load() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nested").join("reliable.json");
    let portfolio = sample_portfolio();

    save_portfolio_to_file(&portfolio, &path).expect("save");
    let loaded = load_portfolio_from_file(&path).expect("load");

    assert_eq!(loaded.name, "Reliable");
    assert_eq!(loaded.fee_templates.len(), 1);
    assert_eq!(loaded.fee_templates[0].frequency_type, FrequencyType::SpecificMonth);
    assert_eq!(loaded.fee_templates[0].frequency_value, Some(6));
    assert_eq!(loaded.payments[0].amount, dec!(320));
    assert_eq!(loaded.events.len(), portfolio.events.len());
    assert!(!path.with_file_name("reliable.json.tmp").exists());
}

#[test]
fn failed_save_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("reliable.json");
    let mut portfolio = sample_portfolio();
    save_portfolio_to_file(&portfolio, &path).expect("initial save");
    let original = fs::read_to_string(&path).unwrap();

    // A directory in place of the staging file makes the write fail.
    fs::create_dir_all(temp.path().join("reliable.json.tmp")).unwrap();
    portfolio.name = "Changed".into();
    assert!(save_portfolio_to_file(&portfolio, &path).is_err());

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn sibling_files_sharing_a_stem_save_independently() {
    let temp = tempdir().unwrap();
    let json = temp.path().join("a.json");
    let backup = temp.path().join("a.bak");
    let portfolio = sample_portfolio();

    // Blocking the stem-only staging name must not affect either save.
    fs::create_dir_all(temp.path().join("a.tmp")).unwrap();
    save_portfolio_to_file(&portfolio, &json).expect("save json");
    save_portfolio_to_file(&portfolio, &backup).expect("save backup");

    assert_eq!(load_portfolio_from_file(&json).unwrap().name, "Reliable");
    assert_eq!(load_portfolio_from_file(&backup).unwrap().name, "Reliable");
    assert!(!temp.path().join("a.json.tmp").exists());
    assert!(!temp.path().join("a.bak.tmp").exists());
}

#[test]
fn newer_schema_is_rejected() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("future.json");
    let mut portfolio = sample_portfolio();
    portfolio.schema_version = CURRENT_SCHEMA_VERSION + 1;
    save_portfolio_to_file(&portfolio, &path).unwrap();

    let err = load_portfolio_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::UnsupportedSchema { found, supported }
            if found == CURRENT_SCHEMA_VERSION + 1 && supported == CURRENT_SCHEMA_VERSION
    ));
}

#[test]
fn corrupt_file_reports_serde_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        load_portfolio_from_file(&path),
        Err(PersistenceError::Serde(_))
    ));
}
