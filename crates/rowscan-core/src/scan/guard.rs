use crate::cursor::RowCursor;
use std::ops::{Deref, DerefMut};

///
/// CursorGuard
///
/// Owns the cursor for one scan call and releases it exactly once on drop,
/// whichever way the call exits.
///

pub(crate) struct CursorGuard<C: RowCursor> {
    cursor: C,
}

impl<C: RowCursor> CursorGuard<C> {
    pub(crate) const fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C: RowCursor> Deref for CursorGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.cursor
    }
}

impl<C: RowCursor> DerefMut for CursorGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.cursor
    }
}

impl<C: RowCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        self.cursor.release();
        tracing::trace!("cursor released");
    }
}
