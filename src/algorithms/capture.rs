use std::convert::Infallible;
use std::ops::Range;

use crate::algorithms::hook::AlignHook;
use crate::edit::Operation;

/// Utility enum to capture an alignment operation by index.
///
/// This is used by [`Capture`](crate::algorithms::Capture).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "op", rename_all = "snake_case")
)]
pub enum EditOp {
    /// A segment is equal (see [`AlignHook::equal`])
    Equal {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
    /// A segment was deleted (see [`AlignHook::delete`])
    Delete {
        old_index: usize,
        old_len: usize,
        new_index: usize,
    },
    /// A segment was inserted (see [`AlignHook::insert`])
    Insert {
        old_index: usize,
        new_index: usize,
        new_len: usize,
    },
    /// A segment was substituted (see [`AlignHook::substitute`])
    Substitute {
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    },
    /// A segment was transposed (see [`AlignHook::transpose`])
    Transpose {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
}

impl EditOp {
    /// Returns the operation of this op.
    pub fn operation(&self) -> Operation {
        self.as_tag_tuple().0
    }

    /// Returns the old range.
    pub fn old_range(&self) -> Range<usize> {
        self.as_tag_tuple().1
    }

    /// Returns the new range.
    pub fn new_range(&self) -> Range<usize> {
        self.as_tag_tuple().2
    }

    /// Transform the op into a tuple of operation and ranges.
    ///
    /// This is useful when operating on slices.  The returned format is
    /// `(operation, i1..i2, j1..j2)`:
    ///
    /// * `Equal`: `a[i1..i2]` matches `b[j1..j2]`
    /// * `Delete`: `a[i1..i2]` should be deleted (`j1 == j2` in this case).
    /// * `Insert`: `b[j1..j2]` should be inserted at `a[i1..i2]` (`i1 == i2` in this case).
    /// * `Substitute`: `a[i1..i2]` should be replaced by `b[j1..j2]`.
    /// * `Transpose`: `a[i1..i2]` is a permutation of `b[j1..j2]`.
    pub fn as_tag_tuple(&self) -> (Operation, Range<usize>, Range<usize>) {
        match *self {
            EditOp::Equal {
                old_index,
                new_index,
                len,
            } => (
                Operation::Equal,
                old_index..old_index + len,
                new_index..new_index + len,
            ),
            EditOp::Delete {
                old_index,
                old_len,
                new_index,
            } => (
                Operation::Delete,
                old_index..old_index + old_len,
                new_index..new_index,
            ),
            EditOp::Insert {
                old_index,
                new_index,
                new_len,
            } => (
                Operation::Insert,
                old_index..old_index,
                new_index..new_index + new_len,
            ),
            EditOp::Substitute {
                old_index,
                old_len,
                new_index,
                new_len,
            } => (
                Operation::Substitute,
                old_index..old_index + old_len,
                new_index..new_index + new_len,
            ),
            EditOp::Transpose {
                old_index,
                new_index,
                len,
            } => (
                Operation::Transpose,
                old_index..old_index + len,
                new_index..new_index + len,
            ),
        }
    }
}

/// An [`AlignHook`] that captures all operations.
#[derive(Default, Clone)]
pub struct Capture(Vec<EditOp>);

impl Capture {
    /// Creates a new capture hook.
    pub fn new() -> Capture {
        Capture::default()
    }

    /// Converts the capture hook into a vector of ops.
    pub fn into_ops(self) -> Vec<EditOp> {
        self.0
    }

    /// Accesses the captured operations.
    pub fn ops(&self) -> &[EditOp] {
        &self.0
    }
}

impl AlignHook for Capture {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.0.push(EditOp::Equal {
            old_index,
            new_index,
            len,
        });
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(EditOp::Delete {
            old_index,
            old_len,
            new_index,
        });
        Ok(())
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(EditOp::Insert {
            old_index,
            new_index,
            new_len,
        });
        Ok(())
    }

    fn substitute(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(EditOp::Substitute {
            old_index,
            old_len,
            new_index,
            new_len,
        });
        Ok(())
    }

    fn transpose(
        &mut self,
        old_index: usize,
        new_index: usize,
        len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(EditOp::Transpose {
            old_index,
            new_index,
            len,
        });
        Ok(())
    }
}

#[test]
fn test_tag_tuples() {
    let op = EditOp::Delete {
        old_index: 3,
        old_len: 2,
        new_index: 1,
    };
    assert_eq!(op.as_tag_tuple(), (Operation::Delete, 3..5, 1..1));
    let op = EditOp::Transpose {
        old_index: 0,
        new_index: 1,
        len: 3,
    };
    assert_eq!(op.operation(), Operation::Transpose);
    assert_eq!(op.old_range(), 0..3);
    assert_eq!(op.new_range(), 1..4);
}
