use std::cmp::Ordering;
use std::fmt;

use crate::algorithms::{capture_align, EditOp};
use crate::alignment::{normalize, Alignment};
use crate::edit::{Edit, Segment};
use crate::metrics::{CostModel, Equalizer, Metric, Orderer};

/// A builder type config for more complex uses of [`Aligner`].
///
/// Starts out as a plain Levenshtein configuration: unit costs, value
/// equality and no transpositions.
pub struct AlignerConfig<'f, T> {
    costs: CostModel<'f, T>,
    equalizer: Equalizer<'f, T>,
    orderer: Option<Orderer<'f, T>>,
}

impl<'f, T: PartialEq + 'f> Default for AlignerConfig<'f, T> {
    fn default() -> AlignerConfig<'f, T> {
        AlignerConfig {
            costs: CostModel::default(),
            equalizer: Equalizer::default(),
            orderer: None,
        }
    }
}

impl<'f, T> AlignerConfig<'f, T> {
    /// Changes the predicate deciding if two tokens are equal.
    ///
    /// The default is value equality.
    pub fn equalizer<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'f,
    {
        self.equalizer = Equalizer::new(f);
        self
    }

    /// Enables transpositions using the given order.
    ///
    /// The order is only used to check if two spans are permutations of
    /// each other, it does not have to agree with the equalizer.
    pub fn orderer<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'f,
    {
        self.orderer = Some(Orderer::new(f));
        self
    }

    /// Enables transpositions using the natural order of the tokens.
    pub fn natural_order(&mut self) -> &mut Self
    where
        T: Ord + 'f,
    {
        self.orderer = Some(Orderer::natural());
        self
    }

    /// Disables transpositions again.
    pub fn no_transpositions(&mut self) -> &mut Self {
        self.orderer = None;
        self
    }

    /// Changes the cost of deleting a source token.
    ///
    /// The default cost is `1.0`.
    pub fn delete_cost<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'f,
    {
        self.costs = self.costs.clone().with_delete(f);
        self
    }

    /// Changes the cost of inserting a target token.
    ///
    /// The default cost is `1.0`.
    pub fn insert_cost<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'f,
    {
        self.costs = self.costs.clone().with_insert(f);
        self
    }

    /// Changes the cost of replacing a source token with a target token.
    ///
    /// The default cost is `1.0`.
    pub fn substitute_cost<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&T, &T) -> f64 + Send + Sync + 'f,
    {
        self.costs = self.costs.clone().with_substitute(f);
        self
    }

    /// Changes the cost of a transposition.
    ///
    /// The default cost is the span length minus one.  This has no effect
    /// unless transpositions are enabled.
    pub fn transpose_cost<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[T], &[T]) -> f64 + Send + Sync + 'f,
    {
        self.costs = self.costs.clone().with_transpose(f);
        self
    }

    /// Creates an [`Aligner`] from this config.
    pub fn build(&self) -> Aligner<'f, T> {
        Aligner::from_metric(Metric::new(
            self.costs.clone(),
            self.equalizer.clone(),
            self.orderer.clone(),
        ))
    }

    /// Shortcut for building an aligner and aligning two slices with it.
    pub fn align(&self, source: &[T], target: &[T]) -> Alignment<T>
    where
        T: Clone,
    {
        self.build().align(source, target)
    }
}

impl<'f, T> fmt::Debug for AlignerConfig<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignerConfig")
            .field("transpositions", &self.orderer.is_some())
            .finish()
    }
}

/// Computes minimum-cost alignments between two sequences.
///
/// An aligner holds no mutable state.  It can be reused for any number of
/// alignments and shared between threads.
///
/// ```rust
/// use aligner::{Aligner, Operation};
///
/// let aligner = Aligner::damerau_levenshtein();
/// let alignment = aligner.align(&["guy", "is"], &["is", "guy"]);
/// assert_eq!(alignment.cost(), 1.0);
/// assert_eq!(alignment.edits()[0].operation(), Operation::Transpose);
/// ```
pub struct Aligner<'f, T> {
    metric: Metric<'f, T>,
}

impl<'f, T> Aligner<'f, T> {
    /// Returns the default [`AlignerConfig`].
    pub fn configure() -> AlignerConfig<'f, T>
    where
        T: PartialEq + 'f,
    {
        AlignerConfig::default()
    }

    /// A Levenshtein aligner with unit costs and value equality.
    pub fn levenshtein() -> Aligner<'f, T>
    where
        T: PartialEq + 'f,
    {
        Aligner::from_metric(Metric::default())
    }

    /// A Damerau-Levenshtein aligner with unit costs, value equality and
    /// transpositions detected by the natural order of the tokens.
    pub fn damerau_levenshtein() -> Aligner<'f, T>
    where
        T: Ord + 'f,
    {
        Aligner::configure().natural_order().build()
    }

    /// Creates an aligner from a fully assembled metric.
    pub fn from_metric(metric: Metric<'f, T>) -> Aligner<'f, T> {
        Aligner { metric }
    }

    pub fn metric(&self) -> &Metric<'f, T> {
        &self.metric
    }

    /// Aligns two slices returning the index based ops and the total cost.
    ///
    /// Unlike [`align`](Self::align) this does not clone any tokens.
    pub fn align_ops(&self, source: &[T], target: &[T]) -> (Vec<EditOp>, f64) {
        capture_align(source, target, &self.metric)
    }

    /// Aligns two slices.
    pub fn align(&self, source: &[T], target: &[T]) -> Alignment<T>
    where
        T: Clone,
    {
        let (ops, cost) = self.align_ops(source, target);
        let edits = ops
            .iter()
            .map(|op| make_edit(op, source, target))
            .collect::<Vec<_>>();
        tracing::debug!(cost, edits = edits.len(), "alignment finished");
        Alignment::new(edits, cost)
    }

    /// Returns the normalized distance between two slices.
    ///
    /// This is the same as `align(source, target).distance()` without
    /// materializing the edits.
    pub fn distance(&self, source: &[T], target: &[T]) -> f64 {
        let (_, cost) = self.align_ops(source, target);
        normalize(cost, source.len().max(target.len()))
    }
}

impl<'f, T> Clone for Aligner<'f, T> {
    fn clone(&self) -> Self {
        Aligner {
            metric: self.metric.clone(),
        }
    }
}

impl<'f, T> fmt::Debug for Aligner<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("transpositions", &self.metric.transpositions_enabled())
            .finish()
    }
}

fn make_edit<T: Clone>(op: &EditOp, source: &[T], target: &[T]) -> Edit<T> {
    let (operation, old_range, new_range) = op.as_tag_tuple();
    Edit::new(
        operation,
        Segment::new(old_range.start, source[old_range].to_vec()),
        Segment::new(new_range.start, target[new_range].to_vec()),
    )
}

#[test]
fn test_delete_insert_scenario() {
    let aligner = Aligner::configure()
        .natural_order()
        .substitute_cost(|_: &i32, _: &i32| f64::MAX)
        .build();
    let alignment = aligner.align(&[1, 3, 3], &[1, 2, 3]);
    assert_eq!(
        alignment.edits(),
        &[
            Edit::equal(vec![1], vec![1]).at(0, 0),
            Edit::delete(vec![3]).at(1, 1),
            Edit::insert(vec![2]).at(2, 1),
            Edit::equal(vec![3], vec![3]).at(2, 2),
        ]
    );
    assert_eq!(alignment.cost(), 2.0);
    assert_eq!(alignment.distance(), 2.0 / 3.0);
}

#[test]
fn test_transpose_scenario() {
    let alignment = Aligner::damerau_levenshtein().align(&["guy", "is"], &["is", "guy"]);
    assert_eq!(
        alignment.edits(),
        &[Edit::transpose(vec!["guy", "is"], vec!["is", "guy"]).at(0, 0)]
    );
    assert_eq!(alignment.cost(), 1.0);
    assert_eq!(alignment.distance(), 0.5);
}

#[test]
fn test_insert_into_empty_scenario() {
    let alignment = Aligner::levenshtein().align(&[], &["", "guy"]);
    assert_eq!(
        alignment.edits(),
        &[
            Edit::insert(vec![""]).at(0, 0),
            Edit::insert(vec!["guy"]).at(0, 1),
        ]
    );
    assert_eq!(alignment.cost(), 2.0);
    assert_eq!(alignment.distance(), 1.0);
}

#[test]
fn test_custom_equalizer() {
    let aligner = Aligner::configure()
        .equalizer(|a: &&str, b: &&str| a.eq_ignore_ascii_case(b))
        .build();
    let alignment = aligner.align(&["Hello", "World"], &["hello", "world"]);
    assert_eq!(alignment.cost(), 0.0);
    assert!(alignment.diffs().next().is_none());
    // the segments keep the tokens of their own side
    assert_eq!(alignment.edits()[0].source().tokens(), &["Hello"]);
    assert_eq!(alignment.edits()[0].target().tokens(), &["hello"]);
}

#[test]
fn test_case_folded_transposition() {
    let aligner = Aligner::configure()
        .orderer(|a: &&str, b: &&str| a.to_lowercase().cmp(&b.to_lowercase()))
        .build();
    let alignment = aligner.align(&["Guy", "is"], &["is", "guy"]);
    assert_eq!(alignment.len(), 1);
    assert_eq!(
        alignment.edits()[0],
        Edit::transpose(vec!["Guy", "is"], vec!["is", "guy"]).at(0, 0)
    );
}

#[test]
fn test_weighted_costs() {
    let aligner = Aligner::configure()
        .delete_cost(|_: &char| 0.25)
        .insert_cost(|_: &char| 0.25)
        .build();
    let alignment = aligner.align(&['a', 'b'], &['a', 'c']);
    assert_eq!(alignment.cost(), 0.5);
    assert_eq!(alignment.diffs().count(), 2);
    assert_eq!(aligner.distance(&['a', 'b'], &['a', 'c']), 0.25);
}

#[test]
fn test_no_transpositions() {
    let aligner = Aligner::configure().natural_order().no_transpositions().build();
    assert!(!aligner.metric().transpositions_enabled());
    let alignment = aligner.align(&[1, 2, 3, 4], &[2, 1, 4, 3]);
    assert!(alignment
        .iter()
        .all(|edit| edit.operation() != crate::Operation::Transpose));
}

#[test]
fn test_shared_between_threads() {
    let aligner = Aligner::<u8>::damerau_levenshtein();
    let expected = aligner.align(b"kitten", b"sitting");
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(aligner.align(b"kitten", b"sitting"), expected);
            });
        }
    });
    assert_eq!(expected.cost(), 3.0);
}

#[test]
fn test_distance_matches_alignment() {
    let aligner = Aligner::configure()
        .natural_order()
        .insert_cost(|_: &char| 0.5)
        .build();
    for (source, target) in [("", ""), ("abc", ""), ("acb", "abc"), ("kitten", "sitting")] {
        let source = source.chars().collect::<Vec<_>>();
        let target = target.chars().collect::<Vec<_>>();
        assert_eq!(
            aligner.distance(&source, &target),
            aligner.align(&source, &target).distance()
        );
    }
    assert_eq!(aligner.distance(&[], &[]), 0.0);
}
