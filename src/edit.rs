//! Positioned edit values.
//!
//! An [`Edit`] pairs an [`Operation`] with a [`Segment`] of the source and a
//! [`Segment`] of the target.  Segments carry the index at which their span
//! starts in the sequence they were taken from, so an empty segment still
//! tells you where an insertion or deletion happens.
use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Errors produced when merging segments or edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The two sides do not touch.
    #[error("segments at {left} and {right} are not adjacent")]
    NotAdjacent { left: usize, right: usize },
}

/// The kind of change an [`Edit`] encodes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Operation {
    /// The source and target spans match.
    Equal,
    /// The target span is missing from the source.
    Insert,
    /// The source span is not present in the target.
    Delete,
    /// The source span is replaced by the target span.
    Substitute,
    /// The source span is a reordering of the target span.
    Transpose,
}

impl Operation {
    /// Returns the single character marker used when rendering edits.
    pub fn marker(self) -> char {
        match self {
            Operation::Equal => ' ',
            Operation::Insert => '+',
            Operation::Delete => '-',
            Operation::Substitute => '~',
            Operation::Transpose => '%',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Operation::Equal => "equal",
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Substitute => "substitute",
            Operation::Transpose => "transpose",
        })
    }
}

/// A contiguous span of tokens anchored at a position.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<T> {
    position: usize,
    tokens: Vec<T>,
}

impl<T> Segment<T> {
    /// Creates a segment starting at `position`.
    pub fn new(position: usize, tokens: Vec<T>) -> Segment<T> {
        Segment { position, tokens }
    }

    /// Creates a segment without tokens anchored at `position`.
    pub fn empty(position: usize) -> Segment<T> {
        Segment {
            position,
            tokens: Vec::new(),
        }
    }

    /// The index of the first token in the originating sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The index one past the last token.
    pub fn end(&self) -> usize {
        self.position + self.tokens.len()
    }

    /// The range of indexes this segment covers.
    pub fn indices(&self) -> Range<usize> {
        self.position..self.end()
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<T> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.tokens.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tokens.iter()
    }

    /// Maps every token keeping the position.
    pub fn map<R, F: FnMut(&T) -> R>(&self, f: F) -> Segment<R> {
        Segment {
            position: self.position,
            tokens: self.tokens.iter().map(f).collect(),
        }
    }

    /// Picks the tokens at this segment's indexes out of another sequence.
    ///
    /// This is useful when an alignment was computed over a projection of
    /// the real data (for instance lowercased words) and the segment should
    /// be expressed in terms of the original items.
    ///
    /// # Panics
    ///
    /// Panics if the segment reaches past the end of `items`.
    pub fn select<R: Clone>(&self, items: &[R]) -> Segment<R> {
        Segment {
            position: self.position,
            tokens: items[self.indices()].to_vec(),
        }
    }

    /// Checks if `other` starts where this segment ends or the other way round.
    pub fn is_adjacent_to(&self, other: &Segment<T>) -> bool {
        self.end() == other.position || other.end() == self.position
    }
}

impl<T: Clone> Segment<T> {
    /// Concatenates two adjacent segments.
    ///
    /// The order of the arguments does not matter, the segment with the
    /// lower position comes first.  Merging a segment with itself returns a
    /// copy of it.
    pub fn merge_with(&self, other: &Segment<T>) -> Result<Segment<T>, MergeError>
    where
        T: PartialEq,
    {
        if self == other {
            return Ok(self.clone());
        }
        let (left, right) = if self.position <= other.position {
            (self, other)
        } else {
            (other, self)
        };
        if left.end() != right.position {
            return Err(MergeError::NotAdjacent {
                left: left.position,
                right: right.position,
            });
        }
        let mut tokens = left.tokens.clone();
        tokens.extend_from_slice(&right.tokens);
        Ok(Segment::new(left.position, tokens))
    }
}

impl<'a, T> IntoIterator for &'a Segment<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// A single step of an edit script.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit<T> {
    operation: Operation,
    source: Segment<T>,
    target: Segment<T>,
}

impl<T> Edit<T> {
    /// Creates an edit from its parts.
    ///
    /// No validation happens here, it's up to the caller to pair segments
    /// that make sense for the operation.
    pub fn new(operation: Operation, source: Segment<T>, target: Segment<T>) -> Edit<T> {
        Edit {
            operation,
            source,
            target,
        }
    }

    /// Starts an equal edit, see [`Unplaced::at`].
    pub fn equal(source: Vec<T>, target: Vec<T>) -> Unplaced<T> {
        Unplaced::new(Operation::Equal, source, target)
    }

    /// Starts an insert edit, see [`Unplaced::at`].
    pub fn insert(target: Vec<T>) -> Unplaced<T> {
        Unplaced::new(Operation::Insert, Vec::new(), target)
    }

    /// Starts a delete edit, see [`Unplaced::at`].
    pub fn delete(source: Vec<T>) -> Unplaced<T> {
        Unplaced::new(Operation::Delete, source, Vec::new())
    }

    /// Starts a substitute edit, see [`Unplaced::at`].
    pub fn substitute(source: Vec<T>, target: Vec<T>) -> Unplaced<T> {
        Unplaced::new(Operation::Substitute, source, target)
    }

    /// Starts a transpose edit, see [`Unplaced::at`].
    pub fn transpose(source: Vec<T>, target: Vec<T>) -> Unplaced<T> {
        Unplaced::new(Operation::Transpose, source, target)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn source(&self) -> &Segment<T> {
        &self.source
    }

    pub fn target(&self) -> &Segment<T> {
        &self.target
    }

    /// Splits the edit into its parts.
    pub fn into_parts(self) -> (Operation, Segment<T>, Segment<T>) {
        (self.operation, self.source, self.target)
    }

    /// Returns `true` unless this is an [`Operation::Equal`] edit.
    pub fn is_change(&self) -> bool {
        self.operation != Operation::Equal
    }

    /// Iterates over the source tokens followed by the target tokens.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.source.iter().chain(self.target.iter())
    }

    /// Maps the tokens of both segments.
    pub fn map<R, F: FnMut(&T) -> R>(&self, mut f: F) -> Edit<R> {
        Edit {
            operation: self.operation,
            source: self.source.map(&mut f),
            target: self.target.map(&mut f),
        }
    }

    /// Re-expresses this edit over a different pair of sequences by index.
    ///
    /// # Panics
    ///
    /// Panics if a segment reaches past the end of the given sequence.
    pub fn project<R: Clone>(&self, source: &[R], target: &[R]) -> Edit<R> {
        Edit {
            operation: self.operation,
            source: self.source.select(source),
            target: self.target.select(target),
        }
    }

    /// The key edits are ordered by: source position, then target position.
    pub fn sort_key(&self) -> (usize, usize) {
        (self.source.position, self.target.position)
    }

    /// Is `other` directly to the right of this edit in both sequences?
    pub fn is_left_sibling_of<U>(&self, other: &Edit<U>) -> bool {
        self.source.end() == other.source.position && self.target.end() == other.target.position
    }
}

impl<T: Clone + PartialEq> Edit<T> {
    /// Merges two adjacent edits into one.
    ///
    /// The call is symmetric: the edit that comes first in the sequences is
    /// picked as the left side.  If both operations agree the merged edit
    /// keeps it, any other combination turns into a substitution.
    pub fn merge_with(&self, other: &Edit<T>) -> Result<Edit<T>, MergeError> {
        if self == other {
            return Ok(self.clone());
        }
        let (left, right) = if self.sort_key() <= other.sort_key() {
            (self, other)
        } else {
            (other, self)
        };
        if !left.is_left_sibling_of(right) {
            return Err(MergeError::NotAdjacent {
                left: left.source.position,
                right: right.source.position,
            });
        }
        let operation = if left.operation == right.operation {
            left.operation
        } else {
            Operation::Substitute
        };
        let mut source = left.source.clone();
        source.tokens.extend_from_slice(&right.source.tokens);
        let mut target = left.target.clone();
        target.tokens.extend_from_slice(&right.target.tokens);
        Ok(Edit::new(operation, source, target))
    }
}

impl<T: fmt::Display> fmt::Display for Edit<T> {
    /// Renders the edit with a marker, the positions and the tokens.
    ///
    /// The output looks like `~1:1 [a] -> [b]` and is mostly meant for
    /// debugging and terminal output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{} [",
            self.operation.marker(),
            self.source.position,
            self.target.position
        )?;
        write_tokens(f, &self.source.tokens)?;
        f.write_str("] -> [")?;
        write_tokens(f, &self.target.tokens)?;
        f.write_str("]")
    }
}

fn write_tokens<T: fmt::Display>(f: &mut fmt::Formatter<'_>, tokens: &[T]) -> fmt::Result {
    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", token)?;
    }
    Ok(())
}

/// An edit that is still missing its positions.
///
/// Created by the shortcut constructors on [`Edit`].
#[derive(Debug, Clone)]
pub struct Unplaced<T> {
    operation: Operation,
    source: Vec<T>,
    target: Vec<T>,
}

impl<T> Unplaced<T> {
    fn new(operation: Operation, source: Vec<T>, target: Vec<T>) -> Unplaced<T> {
        Unplaced {
            operation,
            source,
            target,
        }
    }

    /// Anchors the edit in the source and target sequences.
    pub fn at(self, source_position: usize, target_position: usize) -> Edit<T> {
        Edit::new(
            self.operation,
            Segment::new(source_position, self.source),
            Segment::new(target_position, self.target),
        )
    }
}

#[test]
fn test_segment_basics() {
    let seg = Segment::new(2, vec!['a', 'b', 'c']);
    assert_eq!(seg.len(), 3);
    assert_eq!(seg.end(), 5);
    assert_eq!(seg.indices(), 2..5);
    assert_eq!(seg.first(), Some(&'a'));
    assert_eq!(seg.last(), Some(&'c'));
    assert_eq!(seg.map(|c| c.to_ascii_uppercase()).tokens(), &['A', 'B', 'C']);

    let empty = Segment::<char>::empty(4);
    assert!(empty.is_empty());
    assert_eq!(empty.position(), 4);
    assert_eq!(empty.end(), 4);
    assert_ne!(empty, Segment::empty(5));
}

#[test]
fn test_segment_merge() {
    let left = Segment::new(0, vec![1, 2]);
    let right = Segment::new(2, vec![3]);
    let merged = Segment::new(0, vec![1, 2, 3]);
    assert_eq!(left.merge_with(&right).unwrap(), merged);
    assert_eq!(right.merge_with(&left).unwrap(), merged);
    assert!(left.is_adjacent_to(&right));

    let far = Segment::new(5, vec![9]);
    let err = left.merge_with(&far).unwrap_err();
    assert_eq!(err, MergeError::NotAdjacent { left: 0, right: 5 });
    assert_eq!(err.to_string(), "segments at 0 and 5 are not adjacent");
}

#[test]
fn test_merge_is_symmetrical() {
    let left = Edit::delete(vec!["i"]).at(0, 0);
    let right = Edit::insert(vec!["s"]).at(1, 0);
    let expected = Edit::substitute(vec!["i"], vec!["s"]).at(0, 0);
    assert_eq!(left.merge_with(&right).unwrap(), expected);
    assert_eq!(right.merge_with(&left).unwrap(), expected);
}

#[test]
fn test_merge_keeps_shared_operation() {
    let left = Edit::equal(vec![1], vec![1]).at(0, 0);
    let right = Edit::equal(vec![2], vec![2]).at(1, 1);
    assert_eq!(
        left.merge_with(&right).unwrap(),
        Edit::equal(vec![1, 2], vec![1, 2]).at(0, 0)
    );
    let unrelated = Edit::equal(vec![3], vec![3]).at(4, 4);
    assert_eq!(
        left.merge_with(&unrelated),
        Err(MergeError::NotAdjacent { left: 0, right: 4 })
    );
}

#[test]
fn test_project() {
    let edit = Edit::substitute(vec![2, 3], vec![5]).at(1, 1);
    let projected = edit.project(&["1", "2", "3"], &["4", "5", "6"]);
    assert_eq!(projected, Edit::substitute(vec!["2", "3"], vec!["5"]).at(1, 1));
    assert_eq!(
        edit.map(|x| x * 10),
        Edit::substitute(vec![20, 30], vec![50]).at(1, 1)
    );
}

#[test]
fn test_display() {
    let edit = Edit::transpose(vec!["guy", "is"], vec!["is", "guy"]).at(0, 0);
    assert_eq!(edit.to_string(), "%0:0 [guy, is] -> [is, guy]");
    let edit = Edit::insert(vec!["x"]).at(3, 2);
    assert_eq!(edit.to_string(), "+3:2 [] -> [x]");
}
