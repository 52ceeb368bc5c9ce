//! Form bindings for user-submitted data.
//!
//! Forms deserialize raw request fields (everything optional) and validate
//! into typed inputs the repositories accept. Required-ness mirrors the
//! underlying entity's field declarations; anything beyond presence (format,
//! length) stays the entity's concern.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when validating a form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// One or more required fields were missing or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Billing address form data.
///
/// Exposes exactly the three editable fields of a
/// [`BillingAddress`](crate::models::BillingAddress): `address`, `city`,
/// and `country`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingAddressForm {
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A validated billing address submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingAddressInput {
    pub address: String,
    pub city: String,
    pub country: String,
}

impl BillingAddressForm {
    /// Validate the form into a [`BillingAddressInput`].
    ///
    /// All three fields are required on the billing address entity, so a
    /// missing or blank value for any of them rejects the submission. Every
    /// missing field is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] naming each absent field.
    pub fn validate(self) -> Result<BillingAddressInput, FormError> {
        let address = clean(self.address);
        let city = clean(self.city);
        let country = clean(self.country);

        let mut missing = Vec::new();
        if address.is_none() {
            missing.push("address");
        }
        if city.is_none() {
            missing.push("city");
        }
        if country.is_none() {
            missing.push("country");
        }
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        Ok(BillingAddressInput {
            address: address.unwrap_or_default(),
            city: city.unwrap_or_default(),
            country: country.unwrap_or_default(),
        })
    }
}

/// Trim a submitted value, treating blank input as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(address: Option<&str>, city: Option<&str>, country: Option<&str>) -> BillingAddressForm {
        BillingAddressForm {
            address: address.map(str::to_owned),
            city: city.map(str::to_owned),
            country: country.map(str::to_owned),
        }
    }

    #[test]
    fn test_complete_form_binds() {
        let input = form(Some("12 Lime St"), Some("Copenhagen"), Some("Denmark"))
            .validate()
            .unwrap();
        assert_eq!(input.address, "12 Lime St");
        assert_eq!(input.city, "Copenhagen");
        assert_eq!(input.country, "Denmark");
    }

    #[test]
    fn test_values_are_trimmed() {
        let input = form(Some("  12 Lime St "), Some("Copenhagen"), Some(" Denmark\n"))
            .validate()
            .unwrap();
        assert_eq!(input.address, "12 Lime St");
        assert_eq!(input.country, "Denmark");
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = form(Some("12 Lime St"), None, Some("Denmark"))
            .validate()
            .unwrap_err();
        assert_eq!(err, FormError::MissingFields(vec!["city"]));
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let err = form(Some("12 Lime St"), Some("   "), Some("Denmark"))
            .validate()
            .unwrap_err();
        assert_eq!(err, FormError::MissingFields(vec!["city"]));
    }

    #[test]
    fn test_every_missing_field_reported() {
        let err = BillingAddressForm::default().validate().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec!["address", "city", "country"])
        );
        assert_eq!(
            err.to_string(),
            "missing required fields: address, city, country"
        );
    }

    #[test]
    fn test_deserializes_from_form_payload() {
        let form: BillingAddressForm =
            serde_json::from_str(r#"{"address":"12 Lime St","city":"Copenhagen","country":"Denmark"}"#)
                .unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_deserializes_with_absent_fields() {
        let form: BillingAddressForm = serde_json::from_str(r#"{"address":"12 Lime St"}"#).unwrap();
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingFields(vec!["city", "country"])
        );
    }
}
