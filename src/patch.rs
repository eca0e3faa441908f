//! Applying and reverting edit scripts.
//!
//! An edit remembers where it happened in the source (for applying) and in
//! the target (for reverting).  Applying a single edit splices its target
//! tokens in place of its source tokens; reverting does the opposite.
//!
//! When several edits are applied to the same base sequence the positions
//! of later edits would shift as earlier ones change the length.  [`Patch`]
//! avoids this by working from the highest position downward.
//!
//! ```rust
//! use aligner::{Aligner, Patch};
//!
//! let source = vec!["the", "guy", "is", "here"];
//! let target = vec!["is", "the", "guy", "there"];
//! let alignment = Aligner::damerau_levenshtein().align(&source, &target);
//! let patch = Patch::new(alignment.into_edits());
//! assert_eq!(patch.apply_to(&source).unwrap(), target);
//! assert_eq!(patch.undo_from(&target).unwrap(), source);
//! ```
use thiserror::Error;

use crate::edit::{Edit, Operation};

/// Errors produced when patching sequences.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The edit refers to a span that does not exist in the sequence.
    #[error("edit at position {position} spanning {span} tokens does not fit a sequence of length {len}")]
    PositionOutOfBounds {
        position: usize,
        span: usize,
        len: usize,
    },
}

fn check_bounds(position: usize, span: usize, len: usize) -> Result<(), PatchError> {
    match position.checked_add(span) {
        Some(end) if end <= len => Ok(()),
        _ => Err(PatchError::PositionOutOfBounds {
            position,
            span,
            len,
        }),
    }
}

/// Replaces `remove` tokens at `position` with `tokens`.
fn splice<T: Clone>(
    seq: &[T],
    position: usize,
    remove: usize,
    tokens: &[T],
) -> Result<Vec<T>, PatchError> {
    check_bounds(position, remove, seq.len())?;
    let mut rv = Vec::with_capacity(seq.len() - remove + tokens.len());
    rv.extend_from_slice(&seq[..position]);
    rv.extend_from_slice(tokens);
    rv.extend_from_slice(&seq[position + remove..]);
    Ok(rv)
}

/// Applies a single edit to `seq` by its source position.
///
/// Equal edits leave the sequence untouched but are still required to fit.
pub fn apply<T: Clone>(edit: &Edit<T>, seq: &[T]) -> Result<Vec<T>, PatchError> {
    let source = edit.source();
    let target = edit.target();
    match edit.operation() {
        Operation::Equal => {
            check_bounds(source.position(), source.len(), seq.len())?;
            Ok(seq.to_vec())
        }
        Operation::Insert => splice(seq, source.position(), 0, target.tokens()),
        Operation::Delete => splice(seq, source.position(), source.len(), &[]),
        Operation::Substitute | Operation::Transpose => {
            splice(seq, source.position(), source.len(), target.tokens())
        }
    }
}

/// Reverts a single edit from `seq` by its target position.
pub fn undo<T: Clone>(edit: &Edit<T>, seq: &[T]) -> Result<Vec<T>, PatchError> {
    let source = edit.source();
    let target = edit.target();
    match edit.operation() {
        Operation::Equal => {
            check_bounds(target.position(), target.len(), seq.len())?;
            Ok(seq.to_vec())
        }
        Operation::Insert => splice(seq, target.position(), target.len(), &[]),
        Operation::Delete => splice(seq, target.position(), 0, source.tokens()),
        Operation::Substitute | Operation::Transpose => {
            splice(seq, target.position(), target.len(), source.tokens())
        }
    }
}

/// An ordered collection of edits that can be applied as a whole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch<T> {
    edits: Vec<Edit<T>>,
}

impl<T> Default for Patch<T> {
    fn default() -> Patch<T> {
        Patch { edits: Vec::new() }
    }
}

impl<T> Patch<T> {
    /// Creates a patch, ordering the edits by position.
    pub fn new(mut edits: Vec<Edit<T>>) -> Patch<T> {
        edits.sort_by_key(|edit| edit.sort_key());
        Patch { edits }
    }

    /// Adds another edit keeping the order.
    pub fn add(&mut self, edit: Edit<T>) {
        let key = edit.sort_key();
        let idx = self.edits.partition_point(|other| other.sort_key() <= key);
        self.edits.insert(idx, edit);
    }

    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

impl<T: Clone> Patch<T> {
    /// Applies all edits to `seq`, starting with the last one.
    pub fn apply_to(&self, seq: &[T]) -> Result<Vec<T>, PatchError> {
        let mut rv = seq.to_vec();
        for edit in self.edits.iter().rev() {
            rv = apply(edit, &rv)?;
        }
        Ok(rv)
    }

    /// Reverts all edits from `seq`, starting with the last one.
    pub fn undo_from(&self, seq: &[T]) -> Result<Vec<T>, PatchError> {
        let mut rv = seq.to_vec();
        for edit in self.edits.iter().rev() {
            rv = undo(edit, &rv)?;
        }
        Ok(rv)
    }
}

impl<T> FromIterator<Edit<T>> for Patch<T> {
    fn from_iter<I: IntoIterator<Item = Edit<T>>>(iter: I) -> Patch<T> {
        Patch::new(iter.into_iter().collect())
    }
}

#[test]
fn test_apply_insert() {
    let seq = vec!["hello", "hi", "there"];
    let edit = Edit::insert(vec!["hi"]).at(1, 1);
    assert_eq!(apply(&edit, &seq).unwrap(), vec!["hello", "hi", "hi", "there"]);
}

#[test]
fn test_apply_delete() {
    let seq = vec!["hello", "hi", "there"];
    let edit = Edit::delete(vec!["hi"]).at(1, 1);
    assert_eq!(apply(&edit, &seq).unwrap(), vec!["hello", "there"]);
}

#[test]
fn test_apply_substitute() {
    let seq = vec!["hello", "hi", "there"];
    let edit = Edit::substitute(vec!["hi", "there"], vec!["shalom"]).at(1, 1);
    assert_eq!(apply(&edit, &seq).unwrap(), vec!["hello", "shalom"]);
    assert_eq!(
        undo(&edit, &["hello", "shalom"]).unwrap(),
        vec!["hello", "hi", "there"]
    );
}

#[test]
fn test_out_of_bounds() {
    let seq = vec![1, 2];
    let edit = Edit::insert(vec![3]).at(5, 5);
    assert_eq!(
        apply(&edit, &seq),
        Err(PatchError::PositionOutOfBounds {
            position: 5,
            span: 0,
            len: 2
        })
    );
    let edit = Edit::delete(vec![2, 3]).at(1, 1);
    assert!(apply(&edit, &seq).is_err());
    let edit = Edit::equal(vec![2], vec![2]).at(1, 7);
    assert!(apply(&edit, &seq).is_ok());
    assert!(undo(&edit, &seq).is_err());
}

#[test]
fn test_error_display() {
    let err = PatchError::PositionOutOfBounds {
        position: 5,
        span: 1,
        len: 2,
    };
    assert_eq!(
        err.to_string(),
        "edit at position 5 spanning 1 tokens does not fit a sequence of length 2"
    );
}

#[test]
fn test_patch_add_keeps_order() {
    let mut patch = Patch::default();
    patch.add(Edit::delete(vec![3]).at(2, 2));
    patch.add(Edit::insert(vec![0]).at(0, 0));
    patch.add(Edit::substitute(vec![2], vec![5]).at(1, 1));
    let positions = patch
        .edits()
        .iter()
        .map(|edit| edit.source().position())
        .collect::<Vec<_>>();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(patch.apply_to(&[1, 2, 3]).unwrap(), vec![0, 1, 5]);
}
