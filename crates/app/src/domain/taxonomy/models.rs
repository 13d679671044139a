//! Taxonomy Models

use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Brand UUID
pub type BrandUuid = TypedUuid<Brand>;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Brand Model
#[derive(Debug, Clone)]
pub struct Brand {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category Model
#[derive(Debug, Clone)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New brand/category payload. The slug is derived from the name when not
/// supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaxon {
    pub name: String,
    pub slug: Option<String>,
}

/// Brand/category rename payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// A reference to a brand or category as submitted by a client: either the
/// UUID itself or a human-readable name to resolve. The alternation stays
/// explicit; nothing downstream guesses from context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonRef {
    Uuid(Uuid),
    Name(String),
}

impl TaxonRef {
    /// Classify a raw client value: a well-formed UUID is a direct
    /// reference, anything else is treated as a name to look up.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();

        match Uuid::try_parse(value) {
            Ok(uuid) => Self::Uuid(uuid),
            Err(_) => Self::Name(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_strings_parse_to_the_uuid_arm() {
        let raw = "0190b37e-6a2b-7c3d-8e4f-a1b2c3d4e5f6";

        assert_eq!(
            TaxonRef::parse(raw),
            TaxonRef::Uuid(raw.parse().unwrap())
        );
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(
            TaxonRef::parse("  Sneakers "),
            TaxonRef::Name("Sneakers".to_string())
        );
    }
}
