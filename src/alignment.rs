use crate::edit::Edit;

/// Divides `cost` by `len`, treating an empty length as no distance.
pub(crate) fn normalize(cost: f64, len: usize) -> f64 {
    if len == 0 {
        0.0
    } else {
        cost / len as f64
    }
}

/// The result of aligning two sequences.
///
/// Holds the edit script, ordered left to right, and the total cost.  The
/// edits partition both sequences: concatenating the source segments gives
/// back the source, concatenating the target segments gives back the
/// target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment<T> {
    edits: Vec<Edit<T>>,
    cost: f64,
}

impl<T> Alignment<T> {
    /// Creates an alignment from an edit script and its cost.
    pub fn new(edits: Vec<Edit<T>>, cost: f64) -> Alignment<T> {
        Alignment { edits, cost }
    }

    /// All edits including the equal ones.
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<Edit<T>> {
        self.edits
    }

    /// Iterates over the edits that actually change something.
    pub fn diffs(&self) -> impl Iterator<Item = &Edit<T>> {
        self.edits.iter().filter(|edit| edit.is_change())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edit<T>> {
        self.edits.iter()
    }

    /// The number of edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The total cost of all operations.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Length of the source sequence.
    pub fn source_len(&self) -> usize {
        self.edits.iter().map(|edit| edit.source().len()).sum()
    }

    /// Length of the target sequence.
    pub fn target_len(&self) -> usize {
        self.edits.iter().map(|edit| edit.target().len()).sum()
    }

    /// The cost normalized by the length of the longer sequence.
    ///
    /// With unit costs this is in the range `0..=1`.  Two empty sequences
    /// have a distance of `0.0`.
    pub fn distance(&self) -> f64 {
        normalize(self.cost, self.source_len().max(self.target_len()))
    }

    /// The inverse of [`distance`](Self::distance).
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance()
    }

    /// The ratio `(max_len - cost) / max_len`.
    ///
    /// A ratio of `1.0` means the two sequences are a complete match.  Two
    /// empty sequences have a ratio of `1.0`.
    pub fn ratio(&self) -> f64 {
        let len = self.source_len().max(self.target_len());
        if len == 0 {
            1.0
        } else {
            (len as f64 - self.cost) / len as f64
        }
    }
}

impl<T: Clone> Alignment<T> {
    /// Rebuilds the source sequence from the edits.
    pub fn source(&self) -> Vec<T> {
        self.edits
            .iter()
            .flat_map(|edit| edit.source().iter().cloned())
            .collect()
    }

    /// Rebuilds the target sequence from the edits.
    pub fn target(&self) -> Vec<T> {
        self.edits
            .iter()
            .flat_map(|edit| edit.target().iter().cloned())
            .collect()
    }
}

impl<'a, T> IntoIterator for &'a Alignment<T> {
    type Item = &'a Edit<T>;
    type IntoIter = std::slice::Iter<'a, Edit<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

impl<T> IntoIterator for Alignment<T> {
    type Item = Edit<T>;
    type IntoIter = std::vec::IntoIter<Edit<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.into_iter()
    }
}

#[test]
fn test_metrics() {
    let alignment = Alignment::new(
        vec![
            Edit::equal(vec![1], vec![1]).at(0, 0),
            Edit::delete(vec![3]).at(1, 1),
            Edit::insert(vec![2]).at(2, 1),
            Edit::equal(vec![3], vec![3]).at(2, 2),
        ],
        2.0,
    );
    assert_eq!(alignment.source_len(), 3);
    assert_eq!(alignment.target_len(), 3);
    assert_eq!(alignment.distance(), 2.0 / 3.0);
    assert_eq!(alignment.similarity(), 1.0 - 2.0 / 3.0);
    assert_eq!(alignment.ratio(), 1.0 / 3.0);
    assert_eq!(alignment.diffs().count(), 2);
    assert_eq!(alignment.source(), vec![1, 3, 3]);
    assert_eq!(alignment.target(), vec![1, 2, 3]);
}

#[test]
fn test_empty() {
    let alignment = Alignment::<char>::new(vec![], 0.0);
    assert!(alignment.is_empty());
    assert_eq!(alignment.distance(), 0.0);
    assert_eq!(alignment.similarity(), 1.0);
    assert_eq!(alignment.ratio(), 1.0);
}
