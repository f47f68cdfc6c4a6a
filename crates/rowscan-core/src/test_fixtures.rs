//! Record types shared by the in-crate test modules.

use crate::{
    model::{EmbeddedModel, FieldKind, FieldModel, RecordModel},
    traits::{FieldMut, Record, RecordFields},
};
use chrono::{DateTime, Utc};
use rowscan_derive::Record;

///
/// TestEntity
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct TestEntity {
    pub(crate) id: String,
    pub(crate) some_data: String,
    pub(crate) created_at: DateTime<Utc>,
}

///
/// TestMissingField
/// `TestEntity` without `some_data`.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct TestMissingField {
    pub(crate) id: String,
    pub(crate) created_at: DateTime<Utc>,
}

///
/// Audit
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Audit {
    pub(crate) created_by: String,
    pub(crate) updated_by: Option<String>,
}

///
/// Address
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Address {
    pub(crate) street: String,
    pub(crate) city: String,
}

///
/// Account
///
/// Keys: `id`, `full_name`, `created_by`, `updated_by`, `address.street`,
/// `address.city`.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Account {
    pub(crate) id: i64,

    #[scan(rename = "full_name")]
    pub(crate) name: String,

    #[scan(skip)]
    pub(crate) cached: Option<String>,

    #[scan(flatten)]
    pub(crate) audit: Audit,

    #[scan(embed)]
    pub(crate) address: Option<Address>,
}

///
/// Ledger
/// Two levels of prefixed embedding.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Ledger {
    pub(crate) balance: i64,

    #[scan(embed)]
    pub(crate) account: Account,
}

///
/// Shadowed
/// A flattened child also declares `id`; the outer field must win.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Shadowed {
    #[scan(flatten)]
    pub(crate) inner: ShadowInner,

    pub(crate) id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct ShadowInner {
    pub(crate) id: i64,
    pub(crate) label: String,
}

///
/// Keyword
/// Raw identifiers answer to their unprefixed names.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Keyword {
    pub(crate) r#type: String,
    pub(crate) r#ref: Option<i64>,
}

///
/// Mismatched
///
/// Hand-written record whose model claims an embedded record where the
/// field access hands out a scalar.
///

#[derive(Debug, Default)]
pub(crate) struct Mismatched {
    pub(crate) value: i64,
}

impl RecordFields for Mismatched {
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        vec![FieldMut::Value(&mut self.value)]
    }
}

impl Record for Mismatched {
    const MODEL: &'static RecordModel = &RecordModel {
        path: "test_fixtures::Mismatched",
        fields: &[FieldModel {
            ident: "value",
            column: None,
            kind: FieldKind::Embedded(EmbeddedModel {
                model: <Audit as Record>::MODEL,
                optional: false,
                flatten: false,
            }),
        }],
    };
}

/// Model that embeds itself, for the depth limit.
pub(crate) static SELF_EMBEDDING: RecordModel = RecordModel {
    path: "test_fixtures::SelfEmbedding",
    fields: &[FieldModel {
        ident: "next",
        column: None,
        kind: FieldKind::Embedded(EmbeddedModel {
            model: &SELF_EMBEDDING,
            optional: false,
            flatten: false,
        }),
    }],
};

pub(crate) fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
