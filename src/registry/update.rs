//! The view handed to presenters and observers on every update.

use super::config::StaticText;
use crate::operation::Operation;

/// One operation update, as seen by presenters and observers.
///
/// Overall operations that absorbed this update already include the new
/// value when the update is delivered.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate<'a> {
    operations: &'a [Operation],
    index: usize,
    absorbed: bool,
    static_text: Option<StaticText>,
}

impl<'a> ProgressUpdate<'a> {
    pub(crate) fn new(
        operations: &'a [Operation],
        index: usize,
        absorbed: bool,
        static_text: Option<StaticText>,
    ) -> Self {
        Self {
            operations,
            index,
            absorbed,
            static_text,
        }
    }

    /// The operation that changed.
    pub fn operation(&self) -> &'a Operation {
        let operations = self.operations;
        &operations[self.index]
    }

    /// Overall operations that absorbed this update, nearest first.
    pub fn overall(&self) -> impl Iterator<Item = &'a Operation> + 'a {
        let operations = self.operations;
        let older: &'a [Operation] = if self.absorbed {
            &operations[..self.index]
        } else {
            &[]
        };
        older.iter().rev().filter(|op| op.is_overall())
    }

    /// Every live operation, most recently registered first.
    pub fn operations(&self) -> impl Iterator<Item = &'a Operation> + 'a {
        let operations = self.operations;
        operations.iter().rev()
    }

    /// Banner currently shown, if any.
    pub fn static_text(&self) -> Option<StaticText> {
        self.static_text
    }
}
