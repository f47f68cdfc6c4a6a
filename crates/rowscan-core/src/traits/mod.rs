use crate::{
    model::RecordModel,
    value::{DecodeError, Value},
};

// -----------------------------------------------------------------------------
// Standard re-exports for `traits::X` ergonomics
// -----------------------------------------------------------------------------

pub use crate::value::FromValue;

// ============================================================================
// FIELD ACCESS
// ============================================================================
//
// Object-safe write side of a record. The derive hands out disjoint mutable
// borrows of every field at once; the materializer picks the ones a result
// set actually targets.
//

///
/// FieldSlot
///
/// One writable scalar location. Every `FromValue` type is a slot.
///

pub trait FieldSlot {
    fn assign(&mut self, value: Value) -> Result<(), DecodeError>;
}

impl<T: FromValue> FieldSlot for T {
    fn assign(&mut self, value: Value) -> Result<(), DecodeError> {
        *self = T::from_value(value)?;

        Ok(())
    }
}

///
/// FieldMut
///
/// Mutable view of one field, in model order.
///

pub enum FieldMut<'a> {
    Value(&'a mut dyn FieldSlot),
    Record(&'a mut dyn RecordFields),
    OptionalRecord(&'a mut dyn OptionalRecord),
}

///
/// RecordFields
///
/// `fields_mut` must yield exactly one entry per `Record::MODEL` field, in
/// the same order, with the variant matching the field's kind.
///

pub trait RecordFields {
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

///
/// OptionalRecord
/// An `Option<Inner>` embedded record, allocated on first write.
///

pub trait OptionalRecord {
    fn get_or_insert_default(&mut self) -> &mut dyn RecordFields;
}

impl<R: Record> OptionalRecord for Option<R> {
    fn get_or_insert_default(&mut self) -> &mut dyn RecordFields {
        self.get_or_insert_with(R::default)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

///
/// Record
///
/// A statically declared destination for scanned rows. Usually derived with
/// `#[derive(Record)]`; `Default` supplies the fresh instance each row is
/// decoded into.
///

pub trait Record: RecordFields + Default + 'static {
    const MODEL: &'static RecordModel;
}

///
/// ScanElement
///
/// Element type of a multi-record destination: the record itself or a boxed
/// record. The derive implements both shapes.
///

pub trait ScanElement: Sized {
    type Record: Record;

    fn from_record(record: Self::Record) -> Self;
}
