//! Naming strategies: how a declared field name becomes a column key.

use convert_case::{Case, Casing};

///
/// NamingStrategy
///
/// Pure mapping from a Rust field identifier to the column name it matches.
/// Strategies are applied once, when a record type is indexed.
///

pub trait NamingStrategy: Send + Sync {
    fn column_key(&self, ident: &str) -> String;
}

///
/// SnakeCase
/// Default strategy: `createdAt`, `CreatedAt` and `created_at` all map to `created_at`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SnakeCase;

impl NamingStrategy for SnakeCase {
    fn column_key(&self, ident: &str) -> String {
        ident.to_case(Case::Snake)
    }
}

///
/// Lowercase
/// Lowercases the identifier and keeps everything else.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Lowercase;

impl NamingStrategy for Lowercase {
    fn column_key(&self, ident: &str) -> String {
        ident.to_lowercase()
    }
}

///
/// Verbatim
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl NamingStrategy for Verbatim {
    fn column_key(&self, ident: &str) -> String {
        ident.to_string()
    }
}

impl<F> NamingStrategy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn column_key(&self, ident: &str) -> String {
        self(ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_normalizes_mixed_identifiers() {
        assert_eq!(SnakeCase.column_key("created_at"), "created_at");
        assert_eq!(SnakeCase.column_key("createdAt"), "created_at");
        assert_eq!(SnakeCase.column_key("SomeData"), "some_data");
    }

    #[test]
    fn lowercase_keeps_word_boundaries_out() {
        assert_eq!(Lowercase.column_key("SomeData"), "somedata");
    }

    #[test]
    fn closures_act_as_strategies() {
        let upper = |ident: &str| ident.to_uppercase();

        assert_eq!(upper.column_key("id"), "ID");
        assert_eq!(Verbatim.column_key("someData"), "someData");
    }
}
