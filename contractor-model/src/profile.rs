use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;

/// Editable contractor profile record.
///
/// Every attribute is free text and may be empty. `phone` and `zip` are
/// digits-only once persisted; while a form is being edited `phone` may hold
/// the `(XXX) XXX-XXXX` display rendering instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractorProfile {
    #[serde(deserialize_with = "empty_if_null")]
    pub business_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub first_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub last_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub display_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub trade: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub city: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub state: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub country: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub license_number: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub profile_image_url: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub phone: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub zip: String,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContractorProfile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::BusinessName => &self.business_name,
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::DisplayName => &self.display_name,
            ProfileField::Trade => &self.trade,
            ProfileField::City => &self.city,
            ProfileField::State => &self.state,
            ProfileField::Country => &self.country,
            ProfileField::LicenseNumber => &self.license_number,
            ProfileField::ProfileImageUrl => &self.profile_image_url,
            ProfileField::Phone => &self.phone,
            ProfileField::Zip => &self.zip,
        }
    }

    pub fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::BusinessName => &mut self.business_name,
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::DisplayName => &mut self.display_name,
            ProfileField::Trade => &mut self.trade,
            ProfileField::City => &mut self.city,
            ProfileField::State => &mut self.state,
            ProfileField::Country => &mut self.country,
            ProfileField::LicenseNumber => &mut self.license_number,
            ProfileField::ProfileImageUrl => &mut self.profile_image_url,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Zip => &mut self.zip,
        }
    }
}

/// Addressable attributes of a [`ContractorProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    BusinessName,
    FirstName,
    LastName,
    DisplayName,
    Trade,
    City,
    State,
    Country,
    LicenseNumber,
    ProfileImageUrl,
    Phone,
    Zip,
}

impl ProfileField {
    pub const ALL: [ProfileField; 12] = [
        ProfileField::BusinessName,
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::DisplayName,
        ProfileField::Trade,
        ProfileField::City,
        ProfileField::State,
        ProfileField::Country,
        ProfileField::LicenseNumber,
        ProfileField::ProfileImageUrl,
        ProfileField::Phone,
        ProfileField::Zip,
    ];

    /// Storage key of the attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessName => "business_name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::DisplayName => "display_name",
            Self::Trade => "trade",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::LicenseNumber => "license_number",
            Self::ProfileImageUrl => "profile_image_url",
            Self::Phone => "phone",
            Self::Zip => "zip",
        }
    }

    /// Human readable name, e.g. `business name`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_attributes_become_empty() {
        let raw = r#"{
            "business_name": "Acme Plumbing",
            "phone": null,
            "zip": "78701"
        }"#;

        let profile: ContractorProfile =
            serde_json::from_str(raw).expect("profile deserializes");
        assert_eq!(profile.business_name, "Acme Plumbing");
        assert_eq!(profile.phone, "");
        assert_eq!(profile.trade, "");
        assert_eq!(profile.zip, "78701");
    }

    #[test]
    fn field_names_parse_with_either_separator() {
        assert_eq!(
            "license-number".parse::<ProfileField>(),
            Ok(ProfileField::LicenseNumber)
        );
        assert_eq!("zip".parse::<ProfileField>(), Ok(ProfileField::Zip));
        assert!("email".parse::<ProfileField>().is_err());
    }

    #[test]
    fn get_mut_addresses_the_same_attribute_as_get() {
        let mut profile = ContractorProfile::default();
        for field in ProfileField::ALL {
            *profile.get_mut(field) = field.as_str().to_string();
        }
        for field in ProfileField::ALL {
            assert_eq!(profile.get(field), field.as_str());
        }
        assert_eq!(ProfileField::BusinessName.label(), "business name");
    }
}
