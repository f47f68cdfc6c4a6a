use crate::{
    MAX_EMBED_DEPTH,
    error::ScanError,
    model::{FieldKind, RecordModel},
    naming::NamingStrategy,
    resolve::AccessPath,
};
use std::collections::{HashMap, VecDeque, hash_map::Entry};

///
/// FieldIndex
///
/// Column-key lookup table for one record type under one naming strategy.
/// Built breadth-first, so the shallowest field claiming a key wins and ties
/// go to declaration order.
///

#[derive(Debug)]
pub struct FieldIndex {
    destination: &'static str,
    entries: HashMap<String, AccessPath>,
}

// One record level waiting to be indexed.
struct PendingLevel {
    model: &'static RecordModel,
    prefix: Option<String>,
    steps: Vec<usize>,
}

impl FieldIndex {
    pub fn build(model: &'static RecordModel, naming: &dyn NamingStrategy) -> Result<Self, ScanError> {
        let mut entries = HashMap::new();
        let mut queue = VecDeque::from([PendingLevel {
            model,
            prefix: None,
            steps: Vec::new(),
        }]);

        while let Some(level) = queue.pop_front() {
            if level.steps.len() >= MAX_EMBED_DEPTH {
                return Err(ScanError::invalid_destination(
                    model.path,
                    format!("embedded records nest deeper than {MAX_EMBED_DEPTH} levels"),
                ));
            }

            for (index, field) in level.model.fields.iter().enumerate() {
                let mut steps = level.steps.clone();
                steps.push(index);

                let key = field.column_key(naming);
                let key = match &level.prefix {
                    Some(prefix) => format!("{prefix}.{key}"),
                    None => key.into_owned(),
                };

                match field.kind {
                    FieldKind::Embedded(embedded) => {
                        let prefix = if embedded.flatten {
                            level.prefix.clone()
                        } else {
                            Some(key)
                        };
                        queue.push_back(PendingLevel {
                            model: embedded.model,
                            prefix,
                            steps,
                        });
                    }
                    kind => {
                        if let Entry::Vacant(slot) = entries.entry(key) {
                            slot.insert(AccessPath::new(steps, kind.is_optional()));
                        }
                    }
                }
            }
        }

        Ok(Self {
            destination: model.path,
            entries,
        })
    }

    #[must_use]
    pub const fn destination(&self) -> &'static str {
        self.destination
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Access path for one column; empty when no field answers to it.
    #[must_use]
    pub fn lookup(&self, column: &str) -> AccessPath {
        self.entries.get(column).cloned().unwrap_or_default()
    }

    /// One access path per column, in column order.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, columns: &[S]) -> Vec<AccessPath> {
        columns
            .iter()
            .map(|column| self.lookup(column.as_ref()))
            .collect()
    }
}
