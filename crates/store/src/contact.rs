//! Contact records and the input schema they are built from.

use bson::oid::ObjectId;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::StoreError;

/// Minimum number of characters a contact name must have.
pub const MIN_NAME_LEN: usize = 3;

/// Store-assigned identifier of a contact.
///
/// Wraps a document-database object id and renders as 24 lowercase hex
/// characters, both in `Display` and on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(ObjectId);

impl ContactId {
    /// Mint a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Anything that is not exactly 24 hex characters is rejected with
    /// [`StoreError::InvalidId`].
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ContactId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for ContactId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(DeError::custom)
    }
}

/// A persisted phonebook entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

/// Raw create input as it arrives from a caller. Either field may be missing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NewContact {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub number: Option<String>,
}

/// Accept strings, numbers and booleans, storing the latter two in their
/// text form. `null` reads as absent.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Uint(u64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Int(n) => n.to_string(),
        Scalar::Uint(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl NewContact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }

    /// True when both fields are present and non-empty.
    ///
    /// Only a cheap presence check; [`NewContact::validate`] is the
    /// authoritative schema.
    pub fn has_required_fields(&self) -> bool {
        matches!(&self.name, Some(n) if !n.is_empty())
            && matches!(&self.number, Some(n) if !n.is_empty())
    }

    /// Check the input against the contact schema.
    pub fn validate(self) -> Result<ValidContact, ValidationError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ValidationError::MissingName),
        };
        let actual = name.chars().count();
        if actual < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort {
                min: MIN_NAME_LEN,
                actual,
            });
        }
        let number = match self.number {
            Some(number) if !number.is_empty() => number,
            _ => return Err(ValidationError::MissingNumber),
        };
        Ok(ValidContact { name, number })
    }
}

/// Input that passed [`NewContact::validate`]. Cannot be built any other way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidContact {
    name: String,
    number: String,
}

impl ValidContact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Attach an identifier, producing the record to persist.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            number: self.number,
        }
    }
}

/// Reasons a create input is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("name must be at least {min} characters long (got {actual})")]
    NameTooShort { min: usize, actual: usize },
    #[error("number is required")]
    MissingNumber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_three_character_name() {
        let valid = NewContact::new("Ada", "12345").validate().expect("valid");
        assert_eq!(valid.name(), "Ada");
        assert_eq!(valid.number(), "12345");
    }

    #[test]
    fn validate_rejects_short_and_missing_fields() {
        assert_eq!(
            NewContact::new("Al", "111").validate(),
            Err(ValidationError::NameTooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            NewContact::new("", "111").validate(),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            NewContact {
                name: Some("Grace".into()),
                number: None
            }
            .validate(),
            Err(ValidationError::MissingNumber)
        );
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // two characters, four bytes
        assert!(NewContact::new("Øø", "1").validate().is_err());
        assert!(NewContact::new("Åsa", "1").validate().is_ok());
    }

    #[test]
    fn presence_check_ignores_length() {
        assert!(NewContact::new("Al", "111").has_required_fields());
        assert!(!NewContact::default().has_required_fields());
        assert!(!NewContact::new("Ada", "").has_required_fields());
    }

    #[test]
    fn numeric_fields_deserialize_as_text() {
        let input: NewContact =
            serde_json::from_str(r#"{"name":"Ada","number":12345}"#).expect("numbers accepted");
        assert_eq!(input, NewContact::new("Ada", "12345"));

        let input: NewContact = serde_json::from_str(r#"{"name":null,"number":1.5}"#).unwrap();
        assert_eq!(input.name, None);
        assert_eq!(input.number.as_deref(), Some("1.5"));

        let input: NewContact = serde_json::from_str("{}").unwrap();
        assert_eq!(input, NewContact::default());

        assert!(serde_json::from_str::<NewContact>(r#"{"name":["Ada"]}"#).is_err());
    }

    #[test]
    fn contact_id_parses_hex_and_rejects_garbage() {
        let id = ContactId::parse("000000000000000000000000").expect("well formed");
        assert_eq!(id.to_string(), "000000000000000000000000");
        assert!(matches!(
            ContactId::parse("not-a-valid-id"),
            Err(StoreError::InvalidId(raw)) if raw == "not-a-valid-id"
        ));
        assert!(ContactId::parse("abc").is_err());
    }

    #[test]
    fn contact_serializes_id_as_plain_string() {
        let id = ContactId::generate();
        let contact = NewContact::new("Ada", "12345")
            .validate()
            .unwrap()
            .into_contact(id);
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], serde_json::Value::String(id.to_string()));
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["number"], "12345");
    }
}
