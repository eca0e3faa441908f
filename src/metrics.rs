//! Cost functions and token comparison.
//!
//! The alignment engine never looks at tokens directly.  Everything it needs
//! to know goes through a [`Metric`]:
//!
//! * a [`CostModel`] pricing deletes, inserts, substitutions and
//!   transpositions,
//! * an [`Equalizer`] deciding if a source and a target token match,
//! * an optional [`Orderer`] which is only used to detect transpositions.
//!   Without one the engine computes plain Levenshtein alignments.
//!
//! All of these hold shared closures so a metric is cheap to clone and can
//! be used from multiple threads at once.
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type UnaryCost<'f, T> = Arc<dyn Fn(&T) -> f64 + Send + Sync + 'f>;
type BinaryCost<'f, T> = Arc<dyn Fn(&T, &T) -> f64 + Send + Sync + 'f>;
type SpanCost<'f, T> = Arc<dyn Fn(&[T], &[T]) -> f64 + Send + Sync + 'f>;

/// Prices the four non-matching transitions.
///
/// Costs are expected to be finite and non-negative.  This is not checked,
/// but negative or NaN costs void the minimum-cost guarantee of the engine.
pub struct CostModel<'f, T> {
    delete: UnaryCost<'f, T>,
    insert: UnaryCost<'f, T>,
    substitute: BinaryCost<'f, T>,
    transpose: SpanCost<'f, T>,
}

impl<'f, T: 'f> Default for CostModel<'f, T> {
    /// Unit costs for delete, insert and substitute, and `len - 1` for a
    /// transposition of `len` tokens.
    fn default() -> CostModel<'f, T> {
        CostModel {
            delete: Arc::new(|_: &T| 1.0),
            insert: Arc::new(|_: &T| 1.0),
            substitute: Arc::new(|_: &T, _: &T| 1.0),
            transpose: Arc::new(|old: &[T], _: &[T]| old.len() as f64 - 1.0),
        }
    }
}

impl<'f, T> CostModel<'f, T> {
    /// Replaces the delete cost.
    pub fn with_delete<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'f,
    {
        self.delete = Arc::new(f);
        self
    }

    /// Replaces the insert cost.
    pub fn with_insert<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'f,
    {
        self.insert = Arc::new(f);
        self
    }

    /// Replaces the substitution cost.
    pub fn with_substitute<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> f64 + Send + Sync + 'f,
    {
        self.substitute = Arc::new(f);
        self
    }

    /// Replaces the transposition cost.
    ///
    /// The function receives the source span and the target span, both of
    /// the same length and at least two tokens long.
    pub fn with_transpose<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T], &[T]) -> f64 + Send + Sync + 'f,
    {
        self.transpose = Arc::new(f);
        self
    }

    #[inline]
    pub fn delete_cost(&self, old: &T) -> f64 {
        (self.delete)(old)
    }

    #[inline]
    pub fn insert_cost(&self, new: &T) -> f64 {
        (self.insert)(new)
    }

    #[inline]
    pub fn substitute_cost(&self, old: &T, new: &T) -> f64 {
        (self.substitute)(old, new)
    }

    #[inline]
    pub fn transpose_cost(&self, old: &[T], new: &[T]) -> f64 {
        (self.transpose)(old, new)
    }
}

impl<'f, T> Clone for CostModel<'f, T> {
    fn clone(&self) -> Self {
        CostModel {
            delete: self.delete.clone(),
            insert: self.insert.clone(),
            substitute: self.substitute.clone(),
            transpose: self.transpose.clone(),
        }
    }
}

impl<'f, T> fmt::Debug for CostModel<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostModel").finish_non_exhaustive()
    }
}

/// Decides if a source token and a target token are an exact match.
pub struct Equalizer<'f, T>(Arc<dyn Fn(&T, &T) -> bool + Send + Sync + 'f>);

impl<'f, T> Equalizer<'f, T> {
    /// Wraps a custom equality predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'f,
    {
        Equalizer(Arc::new(f))
    }

    #[inline]
    pub fn is_equal(&self, old: &T, new: &T) -> bool {
        (self.0)(old, new)
    }
}

impl<'f, T: PartialEq + 'f> Default for Equalizer<'f, T> {
    /// Value equality.
    fn default() -> Equalizer<'f, T> {
        Equalizer::new(|a: &T, b: &T| a == b)
    }
}

impl<'f, T> Clone for Equalizer<'f, T> {
    fn clone(&self) -> Self {
        Equalizer(self.0.clone())
    }
}

impl<'f, T> fmt::Debug for Equalizer<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Equalizer")
    }
}

/// A total order over tokens used to detect transpositions.
///
/// The orderer and the [`Equalizer`] are independent.  They are allowed to
/// disagree, which makes it possible to for instance detect case-folded
/// transpositions while still requiring exact matches for equal tokens.
pub struct Orderer<'f, T>(Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync + 'f>);

impl<'f, T> Orderer<'f, T> {
    /// Wraps a custom comparison function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'f,
    {
        Orderer(Arc::new(f))
    }

    /// Orders tokens by their [`Ord`] implementation.
    pub fn natural() -> Self
    where
        T: Ord + 'f,
    {
        Orderer::new(|a: &T, b: &T| a.cmp(b))
    }

    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }

    #[inline]
    fn same(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Checks if two equally long spans are permutations of each other.
    ///
    /// Two token spans are compared pairwise, both straight and crossed, so
    /// that the common case does not need to sort.  Longer spans are sorted
    /// by this order and then compared element by element.  Spans of
    /// different lengths never match.
    pub fn is_transposition(&self, old: &[T], new: &[T]) -> bool {
        if old.len() != new.len() {
            return false;
        }
        if let ([a, b], [c, d]) = (old, new) {
            let identical = self.same(a, c) && self.same(b, d);
            let reversed = self.same(a, d) && self.same(b, c);
            return identical || reversed;
        }
        let mut old_sorted = old.iter().collect::<Vec<_>>();
        let mut new_sorted = new.iter().collect::<Vec<_>>();
        old_sorted.sort_by(|a, b| self.compare(a, b));
        new_sorted.sort_by(|a, b| self.compare(a, b));
        old_sorted
            .into_iter()
            .zip(new_sorted)
            .all(|(a, b)| self.same(a, b))
    }
}

impl<'f, T> Clone for Orderer<'f, T> {
    fn clone(&self) -> Self {
        Orderer(self.0.clone())
    }
}

impl<'f, T> fmt::Debug for Orderer<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Orderer")
    }
}

/// Everything the engine needs to score an alignment.
pub struct Metric<'f, T> {
    costs: CostModel<'f, T>,
    equalizer: Equalizer<'f, T>,
    orderer: Option<Orderer<'f, T>>,
}

impl<'f, T> Metric<'f, T> {
    /// Creates a metric from its parts.
    ///
    /// Passing `None` as orderer disables transpositions.
    pub fn new(
        costs: CostModel<'f, T>,
        equalizer: Equalizer<'f, T>,
        orderer: Option<Orderer<'f, T>>,
    ) -> Metric<'f, T> {
        Metric {
            costs,
            equalizer,
            orderer,
        }
    }

    pub fn costs(&self) -> &CostModel<'f, T> {
        &self.costs
    }

    pub fn equalizer(&self) -> &Equalizer<'f, T> {
        &self.equalizer
    }

    /// The orderer if transpositions are enabled.
    pub fn orderer(&self) -> Option<&Orderer<'f, T>> {
        self.orderer.as_ref()
    }

    pub fn transpositions_enabled(&self) -> bool {
        self.orderer.is_some()
    }
}

impl<'f, T> Clone for Metric<'f, T> {
    fn clone(&self) -> Self {
        Metric {
            costs: self.costs.clone(),
            equalizer: self.equalizer.clone(),
            orderer: self.orderer.clone(),
        }
    }
}

impl<'f, T> fmt::Debug for Metric<'f, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("costs", &self.costs)
            .field("equalizer", &self.equalizer)
            .field("orderer", &self.orderer)
            .finish()
    }
}

impl<'f, T: PartialEq + 'f> Default for Metric<'f, T> {
    /// Unit costs, value equality, no transpositions.
    fn default() -> Metric<'f, T> {
        Metric::new(CostModel::default(), Equalizer::default(), None)
    }
}

#[test]
fn test_default_costs() {
    let costs = CostModel::<char>::default();
    assert_eq!(costs.delete_cost(&'a'), 1.0);
    assert_eq!(costs.insert_cost(&'a'), 1.0);
    assert_eq!(costs.substitute_cost(&'a', &'b'), 1.0);
    assert_eq!(costs.transpose_cost(&['a', 'b'], &['b', 'a']), 1.0);
    assert_eq!(costs.transpose_cost(&['a', 'b', 'c'], &['c', 'a', 'b']), 2.0);
}

#[test]
fn test_custom_costs() {
    let costs = CostModel::<u32>::default()
        .with_delete(|x| *x as f64)
        .with_substitute(|_, _| 0.5);
    assert_eq!(costs.delete_cost(&7), 7.0);
    assert_eq!(costs.insert_cost(&7), 1.0);
    assert_eq!(costs.substitute_cost(&1, &2), 0.5);
}

#[test]
fn test_transposition_pairs() {
    let ord = Orderer::<i32>::natural();
    assert!(ord.is_transposition(&[1, 2], &[2, 1]));
    assert!(ord.is_transposition(&[1, 2], &[1, 2]));
    assert!(!ord.is_transposition(&[1, 2], &[1, 3]));
    assert!(!ord.is_transposition(&[1, 1], &[1, 2]));
}

#[test]
fn test_transposition_longer_spans() {
    let ord = Orderer::<i32>::natural();
    assert!(ord.is_transposition(&[1, 2, 3], &[3, 1, 2]));
    assert!(ord.is_transposition(&[1, 1, 2], &[2, 1, 1]));
    assert!(!ord.is_transposition(&[1, 1, 2], &[2, 2, 1]));
    assert!(!ord.is_transposition(&[1, 2, 3], &[1, 2]));
}

#[test]
fn test_orderer_independent_of_equality() {
    let ord = Orderer::<&str>::new(|a: &&str, b: &&str| a.to_lowercase().cmp(&b.to_lowercase()));
    assert!(ord.is_transposition(&["Foo", "bar"], &["BAR", "foo"]));
    let eq = Equalizer::<&str>::default();
    assert!(!eq.is_equal(&"Foo", &"foo"));
}
