//! Row materialization: access paths → scan targets on one record instance.

#[cfg(test)]
mod tests;

use crate::{
    cursor::{RowCursor, ScanTarget},
    error::ScanError,
    resolve::AccessPath,
    traits::{FieldMut, FieldSlot, RecordFields},
};
use std::mem;

///
/// FieldNode
///
/// Lazily expanded view of a record's fields. A nested record is only split
/// into its own fields (and, when optional, allocated) once a path walks
/// through it.
///

enum FieldNode<'a> {
    Pending(FieldMut<'a>),
    Expanded(Vec<FieldNode<'a>>),
    Taken,
}

// Why a path failed to land on a scalar slot.
enum Walk<'a> {
    Slot(&'a mut dyn FieldSlot),
    AlreadyTaken,
    Layout(&'static str),
}

fn expand(record: &mut dyn RecordFields) -> Vec<FieldNode<'_>> {
    record
        .fields_mut()
        .into_iter()
        .map(FieldNode::Pending)
        .collect()
}

fn take_slot<'a>(nodes: &mut [FieldNode<'a>], steps: &[usize]) -> Walk<'a> {
    let Some((&head, rest)) = steps.split_first() else {
        return Walk::Layout("empty access path");
    };
    let Some(node) = nodes.get_mut(head) else {
        return Walk::Layout("access path step beyond the record's fields");
    };

    if rest.is_empty() {
        return match mem::replace(node, FieldNode::Taken) {
            FieldNode::Pending(FieldMut::Value(slot)) => Walk::Slot(slot),
            FieldNode::Taken => Walk::AlreadyTaken,
            other => {
                *node = other;
                Walk::Layout("access path ends on a nested record")
            }
        };
    }

    // descend, expanding the nested record on first visit
    let expanded = match mem::replace(node, FieldNode::Taken) {
        FieldNode::Pending(FieldMut::Record(record)) => expand(record),
        FieldNode::Pending(FieldMut::OptionalRecord(record)) => {
            expand(record.get_or_insert_default())
        }
        FieldNode::Expanded(children) => children,
        FieldNode::Pending(FieldMut::Value(slot)) => {
            *node = FieldNode::Pending(FieldMut::Value(slot));
            return Walk::Layout("access path continues past a scalar field");
        }
        FieldNode::Taken => return Walk::Layout("access path continues past a scalar field"),
    };
    *node = FieldNode::Expanded(expanded);

    match node {
        FieldNode::Expanded(children) => take_slot(children, rest),
        _ => Walk::Layout("nested record failed to expand"),
    }
}

/// Build one scan target per access path on `record`.
///
/// Missing paths become discard targets. When several columns resolve to the
/// same field the last one wins and the earlier ones are discarded.
pub fn build_targets<'a>(
    record: &'a mut dyn RecordFields,
    paths: &[AccessPath],
    destination: &'static str,
) -> Result<Vec<ScanTarget<'a>>, ScanError> {
    let mut nodes = expand(record);
    let mut targets = Vec::with_capacity(paths.len());

    for path in paths.iter().rev() {
        if path.is_missing() {
            targets.push(ScanTarget::Discard);
            continue;
        }

        match take_slot(&mut nodes, path.steps()) {
            Walk::Slot(slot) => targets.push(ScanTarget::Field(slot)),
            Walk::AlreadyTaken => targets.push(ScanTarget::Discard),
            Walk::Layout(reason) => {
                return Err(ScanError::invalid_destination(
                    destination,
                    format!("{reason} (path {:?})", path.steps()),
                ));
            }
        }
    }
    targets.reverse();

    Ok(targets)
}

/// Decode the cursor's current row into `record` through `paths`.
pub fn materialize_row<C>(
    cursor: &mut C,
    record: &mut dyn RecordFields,
    paths: &[AccessPath],
    destination: &'static str,
    row: u64,
) -> Result<(), ScanError>
where
    C: RowCursor + ?Sized,
{
    let mut targets = build_targets(record, paths, destination)?;

    cursor
        .decode_into(&mut targets)
        .map_err(|err| ScanError::decode(row, err))
}
