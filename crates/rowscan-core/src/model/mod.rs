//! Static, derive-generated description of record types.
//!
//! The model is the compile-time replacement for runtime struct inspection:
//! the resolver indexes it once per record type and never looks at field
//! values.

use crate::naming::NamingStrategy;
use std::borrow::Cow;

///
/// RecordModel
/// Minimal, macro-generated model for one record type.
///

#[derive(Debug)]
pub struct RecordModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Ordered field list; index positions are the access-path steps.
    pub fields: &'static [FieldModel],
}

impl RecordModel {
    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.ident == ident)
    }
}

///
/// FieldModel
///

#[derive(Debug)]
pub struct FieldModel {
    /// Rust field identifier, without any raw-identifier prefix.
    pub ident: &'static str,
    /// Explicit column tag; bypasses the naming strategy when present.
    pub column: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldModel {
    /// Lookup key this field answers to under `naming`.
    #[must_use]
    pub fn column_key(&self, naming: &dyn NamingStrategy) -> Cow<'static, str> {
        match self.column {
            Some(column) => Cow::Borrowed(column),
            None => Cow::Owned(naming.column_key(self.ident)),
        }
    }
}

///
/// FieldKind
///
/// Shape of one field, decided by the derive from the declared type.
///

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    /// Plain value; the column must not be NULL.
    Required,
    /// `Option<T>` value; NULL decodes to `None`.
    Optional,
    /// Nested record whose fields are addressable through this one.
    Embedded(EmbeddedModel),
}

impl FieldKind {
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Embedded(_))
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        match self {
            Self::Required => false,
            Self::Optional => true,
            Self::Embedded(embedded) => embedded.optional,
        }
    }
}

///
/// EmbeddedModel
///

#[derive(Clone, Copy, Debug)]
pub struct EmbeddedModel {
    pub model: &'static RecordModel,
    /// Declared as `Option<Inner>`; allocated on first write.
    pub optional: bool,
    /// Children answer to their own keys instead of `parent.child`.
    pub flatten: bool,
}
