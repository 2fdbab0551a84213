//! Update specifications for single-document mutations.
//!
//! The accessor expresses three mutation kinds: merging fields into a
//! document, removing a field, and incrementing a numeric field. They are a
//! discriminated union rather than a raw update map so a malformed
//! combination cannot be constructed.

use bson::{Bson, Document};

/// A single-document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSpec {
    /// Merges the given fields into the document (field-level set). Fields
    /// not named are left untouched.
    Set(Document),
    /// Removes the named field entirely. The document itself survives.
    Unset(String),
    /// Adds the delta to the named numeric field, creating it at the delta
    /// value if absent.
    Inc(String, i64),
}

impl UpdateSpec {
    /// Merges all fields of `fields` into the matched document.
    pub fn set(fields: Document) -> Self {
        UpdateSpec::Set(fields)
    }

    /// Sets a single field to the given value.
    pub fn set_field(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        let mut fields = Document::new();
        fields.insert(field.into(), value.into());
        UpdateSpec::Set(fields)
    }

    /// Removes the named field.
    pub fn unset(field: impl Into<String>) -> Self {
        UpdateSpec::Unset(field.into())
    }

    /// Increments the named field by `delta`.
    pub fn inc(field: impl Into<String>, delta: i64) -> Self {
        UpdateSpec::Inc(field.into(), delta)
    }
}
