//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::DomainResult;

/// System-assigned user identifier.
pub type UserId = i64;

/// Region classification tag.
///
/// The set of regions is owned by the caller; the store only requires the
/// tag to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Region(s.to_string())
    }
}

impl From<String> for Region {
    fn from(s: String) -> Self {
        Region(s)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<String>,
    pub region: Region,
    pub amount: i64,
}

impl User {
    /// Build a stored record from its id and mutable fields
    pub fn from_details(id: UserId, details: UserDetails) -> Self {
        Self {
            id,
            name: details.name,
            phone_number: details.phone_number,
            identity_number: details.identity_number,
            region: details.region,
            amount: details.amount,
        }
    }

    /// Copy of every mutable field
    pub fn details(&self) -> UserDetails {
        UserDetails {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            identity_number: self.identity_number.clone(),
            region: self.region.clone(),
            amount: self.amount,
        }
    }

    /// Replace every mutable field, keeping the id
    pub fn apply(&mut self, details: UserDetails) {
        self.name = details.name;
        self.phone_number = details.phone_number;
        self.identity_number = details.identity_number;
        self.region = details.region;
        self.amount = details.amount;
    }
}

/// Mutable user fields, used both as a creation candidate and as the full
/// replacement set for an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserDetails {
    /// Display name
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// External identity number, unique when present
    #[serde(default)]
    #[validate(length(max = 16, message = "identity number must be at most 16 characters"))]
    pub identity_number: Option<String>,
    /// Region tag
    #[validate(custom(function = "validate_region"))]
    pub region: Region,
    /// Monetary amount
    pub amount: i64,
}

impl UserDetails {
    pub fn new(name: impl Into<String>, region: impl Into<Region>, amount: i64) -> Self {
        Self {
            name: name.into(),
            phone_number: None,
            identity_number: None,
            region: region.into(),
            amount,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_identity_number(mut self, identity_number: impl Into<String>) -> Self {
        self.identity_number = Some(identity_number.into());
        self
    }

    /// Normalize the identity number and check the field rules.
    ///
    /// An empty identity number becomes `None` so it never takes part in the
    /// uniqueness check. Every other field is kept exactly as given.
    pub fn validated(mut self) -> DomainResult<Self> {
        self.identity_number = self.identity_number.filter(|n| !n.is_empty());
        self.validate()?;
        Ok(self)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    not_blank(name, "name")
}

fn validate_region(region: &Region) -> Result<(), ValidationError> {
    not_blank(region.as_str(), "region")
}

fn not_blank(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(field);
        err.message = Some(format!("{} must not be blank", field).into());
        return Err(err);
    }
    Ok(())
}
