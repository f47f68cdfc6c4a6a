//! Field resolution: column names → access paths into a record type.

mod index;

#[cfg(test)]
mod tests;

use crate::{
    error::ScanError,
    naming::{NamingStrategy, SnakeCase},
    traits::Record,
};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

// re-exports
pub use index::FieldIndex;

static GLOBAL_MAPPER: LazyLock<Arc<Mapper>> = LazyLock::new(|| Arc::new(Mapper::new(SnakeCase)));

///
/// AccessPath
///
/// Field indices from the record root down to one scalar field. An empty
/// path means the column has no field on the destination.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccessPath {
    steps: Vec<usize>,
    optional: bool,
}

impl AccessPath {
    #[must_use]
    pub const fn new(steps: Vec<usize>, optional: bool) -> Self {
        Self { steps, optional }
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self {
            steps: Vec::new(),
            optional: false,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// The leaf is an `Option<T>` field.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

///
/// Mapper
///
/// Naming strategy plus the per-type field index cache built under it.
/// Shared across threads; indexes are built once and handed out as `Arc`s.
///

pub struct Mapper {
    naming: Box<dyn NamingStrategy>,
    indexes: RwLock<HashMap<TypeId, Arc<FieldIndex>>>,
}

impl Mapper {
    #[must_use]
    pub fn new(naming: impl NamingStrategy + 'static) -> Self {
        Self {
            naming: Box::new(naming),
            indexes: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide default mapper (snake_case naming).
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_MAPPER)
    }

    #[must_use]
    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    /// Field index for `R`, built on first use.
    pub fn index<R: Record>(&self) -> Result<Arc<FieldIndex>, ScanError> {
        let key = TypeId::of::<R>();

        if let Some(index) = self
            .indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(index));
        }

        let built = Arc::new(FieldIndex::build(R::MODEL, self.naming())?);
        tracing::debug!(
            destination = R::MODEL.path,
            keys = built.len(),
            "indexed record fields"
        );

        // a concurrent builder may have won; keep whichever landed first
        let mut indexes = self.indexes.write().unwrap_or_else(PoisonError::into_inner);
        let index = indexes.entry(key).or_insert(built);

        Ok(Arc::clone(index))
    }

    /// One access path per column, in column order.
    pub fn resolve<R: Record, S: AsRef<str>>(
        &self,
        columns: &[S],
    ) -> Result<Vec<AccessPath>, ScanError> {
        Ok(self.index::<R>()?.resolve(columns))
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .indexes
            .read()
            .map_or(0, |indexes| indexes.len());

        f.debug_struct("Mapper").field("cached", &cached).finish()
    }
}
