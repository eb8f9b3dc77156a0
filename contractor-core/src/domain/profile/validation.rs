use contractor_model::{ContractorProfile, ProfileField};
use once_cell::sync::Lazy;
use regex::Regex;

use super::phone::to_canonical_phone;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("valid zip regex"));

/// Fields that must be non-empty before a profile can be saved, in the
/// order they are checked.
pub const REQUIRED_FIELDS: [ProfileField; 4] = [
    ProfileField::BusinessName,
    ProfileField::Trade,
    ProfileField::City,
    ProfileField::State,
];

/// Validation errors for a profile about to be saved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill {}", .field.label())]
    MissingField { field: ProfileField },

    #[error("Please enter a valid 10-digit US phone number")]
    InvalidPhone,

    #[error("Please enter a valid 5-digit ZIP code")]
    InvalidZip,
}

/// Check a profile before persisting it.
///
/// Rules run in a fixed order and stop at the first failure, so only one
/// problem is reported at a time.
pub fn validate_profile(
    profile: &ContractorProfile,
) -> Result<(), ValidationError> {
    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| profile.get(*field).is_empty())
    {
        return Err(ValidationError::MissingField { field });
    }

    if !PHONE_PATTERN.is_match(&to_canonical_phone(&profile.phone)) {
        return Err(ValidationError::InvalidPhone);
    }

    // ZIP is checked exactly as typed; there is no zip normalization step.
    if !ZIP_PATTERN.is_match(&profile.zip) {
        return Err(ValidationError::InvalidZip);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ContractorProfile {
        ContractorProfile {
            business_name: "Lone Star Plumbing".into(),
            trade: "Plumbing".into(),
            city: "Austin".into(),
            state: "TX".into(),
            phone: "(512) 555-1234".into(),
            zip: "78701".into(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_profile_passes() {
        assert_eq!(validate_profile(&complete()), Ok(()));
    }

    #[test]
    fn optional_fields_are_not_checked() {
        let profile = ContractorProfile {
            country: String::new(),
            license_number: String::new(),
            display_name: String::new(),
            last_name: String::new(),
            ..complete()
        };
        assert_eq!(validate_profile(&profile), Ok(()));
    }

    #[test]
    fn required_fields_are_reported_in_order() {
        let profile = ContractorProfile {
            business_name: String::new(),
            city: String::new(),
            ..complete()
        };
        let err = validate_profile(&profile).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: ProfileField::BusinessName
            }
        );
        assert_eq!(err.to_string(), "Please fill business name");

        let profile = ContractorProfile {
            state: String::new(),
            phone: String::new(),
            ..complete()
        };
        assert_eq!(
            validate_profile(&profile),
            Err(ValidationError::MissingField {
                field: ProfileField::State
            })
        );
    }

    #[test]
    fn missing_field_wins_over_bad_phone_and_zip() {
        let profile = ContractorProfile {
            trade: String::new(),
            phone: "12".into(),
            zip: "1".into(),
            ..complete()
        };
        assert!(matches!(
            validate_profile(&profile),
            Err(ValidationError::MissingField {
                field: ProfileField::Trade
            })
        ));
    }

    #[test]
    fn phone_must_have_exactly_ten_digits() {
        for phone in ["", "512555123", "15125551234", "phone"] {
            let profile = ContractorProfile {
                phone: phone.into(),
                ..complete()
            };
            assert_eq!(
                validate_profile(&profile),
                Err(ValidationError::InvalidPhone),
                "{phone:?} should be rejected"
            );
        }

        let dotted = ContractorProfile {
            phone: "512.555.1234".into(),
            ..complete()
        };
        assert_eq!(validate_profile(&dotted), Ok(()));
    }

    #[test]
    fn zip_must_be_exactly_five_digits_as_typed() {
        for zip in ["7870", "787011", " 78701", "7870a", ""] {
            let profile = ContractorProfile {
                zip: zip.into(),
                ..complete()
            };
            assert_eq!(
                validate_profile(&profile),
                Err(ValidationError::InvalidZip),
                "{zip:?} should be rejected"
            );
        }
    }
}
