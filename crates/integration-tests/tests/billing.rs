//! Integration tests for the billing address form binding.
//!
//! Require a `PostgreSQL` database with the `accounts` schema; see the crate
//! docs. Run with: `cargo test -p limeleaf-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use limeleaf_accounts::db::addresses::BillingAddressRepository;
use limeleaf_accounts::forms::BillingAddressForm;
use limeleaf_accounts::services::account::{AccountService, CreateUserOptions};
use limeleaf_integration_tests::{test_pool, unique_email};

fn form(address: &str, city: &str, country: &str) -> BillingAddressForm {
    BillingAddressForm {
        address: Some(address.to_owned()),
        city: Some(city.to_owned()),
        country: Some(country.to_owned()),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_billing_form_binds_and_persists() {
    let pool = test_pool().await;
    let service = AccountService::new(&pool);
    let addresses = BillingAddressRepository::new(&pool);

    let user = service
        .create_user(&unique_email("billing"), "correct horse battery", CreateUserOptions::default())
        .await
        .unwrap();

    let input = form("12 Lime St", "Copenhagen", "Denmark").validate().unwrap();
    let saved = addresses.upsert(user.id, &input).await.unwrap();
    assert_eq!(saved.user_id, user.id);
    assert_eq!(saved.address, "12 Lime St");

    let fetched = addresses.get_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.city, "Copenhagen");
    assert_eq!(fetched.country, "Denmark");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_second_save_updates_in_place() {
    let pool = test_pool().await;
    let service = AccountService::new(&pool);
    let addresses = BillingAddressRepository::new(&pool);

    let user = service
        .create_user(&unique_email("rebill"), "correct horse battery", CreateUserOptions::default())
        .await
        .unwrap();

    let first = addresses
        .upsert(user.id, &form("12 Lime St", "Copenhagen", "Denmark").validate().unwrap())
        .await
        .unwrap();
    let second = addresses
        .upsert(user.id, &form("4 Citron Ave", "Aarhus", "Denmark").validate().unwrap())
        .await
        .unwrap();

    // One row per user: same id, new values
    assert_eq!(second.id, first.id);
    assert_eq!(second.address, "4 Citron Ave");

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts.billing_address WHERE user_id = $1")
            .bind(user.id.as_i32())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_incomplete_submission_never_reaches_the_database() {
    let pool = test_pool().await;
    let service = AccountService::new(&pool);
    let addresses = BillingAddressRepository::new(&pool);

    let user = service
        .create_user(&unique_email("nobill"), "correct horse battery", CreateUserOptions::default())
        .await
        .unwrap();

    let submission = BillingAddressForm {
        address: Some("12 Lime St".to_owned()),
        city: None,
        country: Some("Denmark".to_owned()),
    };
    assert!(submission.validate().is_err());

    // Validation failed before any write happened
    assert!(addresses.get_by_user(user.id).await.unwrap().is_none());
}
