//! Damerau-Levenshtein alignment with contiguous multi-token transpositions.
//!
//! * time: `O(MN)`, plus the transposition scan along the diagonal
//! * space `O(MN)`
//!
//! The engine fills a cost matrix row by row, remembers which transition
//! produced every cell and then walks back from the bottom right corner to
//! recover the edit script.  When the [`Metric`] carries no
//! [`Orderer`](crate::metrics::Orderer) transpositions are never considered
//! and the result is a plain Levenshtein alignment.
use crate::algorithms::{AlignHook, EditOp};
use crate::edit::Operation;
use crate::metrics::{CostModel, Metric, Orderer};

/// Aligns `old` against `new`, reporting the edit script to `d`.
///
/// The hook is invoked in left-to-right order, one call per matrix
/// transition, and the total cost of the alignment is returned.
pub fn align<T, D>(d: &mut D, old: &[T], new: &[T], metric: &Metric<'_, T>) -> Result<f64, D::Error>
where
    D: AlignHook,
{
    tracing::debug!(
        old_len = old.len(),
        new_len = new.len(),
        transpositions = metric.transpositions_enabled(),
        "building alignment matrix"
    );
    let matrix = make_matrix(old, new, metric);
    let cost = matrix.get(old.len(), new.len()).cost;

    for op in backtrack(&matrix, old.len(), new.len()) {
        match op {
            EditOp::Equal {
                old_index,
                new_index,
                len,
            } => d.equal(old_index, new_index, len)?,
            EditOp::Delete {
                old_index,
                old_len,
                new_index,
            } => d.delete(old_index, old_len, new_index)?,
            EditOp::Insert {
                old_index,
                new_index,
                new_len,
            } => d.insert(old_index, new_index, new_len)?,
            EditOp::Substitute {
                old_index,
                old_len,
                new_index,
                new_len,
            } => d.substitute(old_index, old_len, new_index, new_len)?,
            EditOp::Transpose {
                old_index,
                new_index,
                len,
            } => d.transpose(old_index, new_index, len)?,
        }
    }

    d.finish()?;
    Ok(cost)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    cost: f64,
    op: Operation,
    // number of tokens covered by a transposition, 1 otherwise
    span: usize,
}

impl Cell {
    fn new(cost: f64, op: Operation) -> Cell {
        Cell { cost, op, span: 1 }
    }
}

/// Cost and operation matrix of `(old_len + 1) * (new_len + 1)` cells.
struct Matrix {
    width: usize,
    cells: Vec<Cell>,
}

impl Matrix {
    fn new(old_len: usize, new_len: usize) -> Matrix {
        let width = new_len + 1;
        Matrix {
            width,
            cells: vec![Cell::new(0.0, Operation::Equal); (old_len + 1) * width],
        }
    }

    #[inline(always)]
    fn get(&self, i: usize, j: usize) -> Cell {
        self.cells[i * self.width + j]
    }

    #[inline(always)]
    fn cost(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).cost
    }

    #[inline(always)]
    fn set(&mut self, i: usize, j: usize, cell: Cell) {
        self.cells[i * self.width + j] = cell;
    }
}

fn make_matrix<T>(old: &[T], new: &[T], metric: &Metric<'_, T>) -> Matrix {
    let costs = metric.costs();
    let equalizer = metric.equalizer();
    let orderer = metric.orderer();
    let mut matrix = Matrix::new(old.len(), new.len());

    for i in 1..=old.len() {
        let cost = matrix.cost(i - 1, 0) + costs.delete_cost(&old[i - 1]);
        matrix.set(i, 0, Cell::new(cost, Operation::Delete));
    }
    for j in 1..=new.len() {
        let cost = matrix.cost(0, j - 1) + costs.insert_cost(&new[j - 1]);
        matrix.set(0, j, Cell::new(cost, Operation::Insert));
    }

    for i in 0..old.len() {
        for j in 0..new.len() {
            if equalizer.is_equal(&old[i], &new[j]) {
                let cost = matrix.cost(i, j);
                matrix.set(i + 1, j + 1, Cell::new(cost, Operation::Equal));
                continue;
            }

            let del_cost = matrix.cost(i, j + 1) + costs.delete_cost(&old[i]);
            let ins_cost = matrix.cost(i + 1, j) + costs.insert_cost(&new[j]);
            let sub_cost = matrix.cost(i, j) + costs.substitute_cost(&old[i], &new[j]);
            let transposition =
                orderer.and_then(|orderer| scan_transposition(&matrix, old, new, i, j, orderer, costs));

            // ties go to transpose, then substitute, then insert, then delete
            let mut best = Cell::new(sub_cost, Operation::Substitute);
            if let Some((cost, span)) = transposition {
                if cost <= best.cost {
                    best = Cell {
                        cost,
                        op: Operation::Transpose,
                        span,
                    };
                }
            }
            if ins_cost < best.cost {
                best = Cell::new(ins_cost, Operation::Insert);
            }
            if del_cost < best.cost {
                best = Cell::new(del_cost, Operation::Delete);
            }

            if best.op == Operation::Transpose {
                tracing::trace!(
                    old_index = i + 1 - best.span,
                    new_index = j + 1 - best.span,
                    len = best.span,
                    "transposition"
                );
            }
            matrix.set(i + 1, j + 1, best);
        }
    }

    matrix
}

/// Looks for a transposition ending at `old[i]` and `new[j]`.
///
/// Walks up the diagonal trying spans of increasing length and stops at the
/// first diagonal step that did not add any cost, as a transposition cannot
/// reach across a match.  Only the costs are compared, so a substitution
/// that costs nothing stops the scan just like an equal pair does.  Returns
/// the cost of the first permutation found together with its length.
fn scan_transposition<T>(
    matrix: &Matrix,
    old: &[T],
    new: &[T],
    i: usize,
    j: usize,
    orderer: &Orderer<'_, T>,
    costs: &CostModel<'_, T>,
) -> Option<(f64, usize)> {
    let mut k = 1;
    while k <= i && k <= j && matrix.cost(i - k + 1, j - k + 1) != matrix.cost(i - k, j - k) {
        let old_span = &old[i - k..=i];
        let new_span = &new[j - k..=j];
        if orderer.is_transposition(old_span, new_span) {
            let cost = matrix.cost(i - k, j - k) + costs.transpose_cost(old_span, new_span);
            return Some((cost, k + 1));
        }
        k += 1;
    }
    None
}

/// Walks the matrix back from `(old_len, new_len)` to the origin.
///
/// The ops are discovered right to left and returned left to right.
fn backtrack(matrix: &Matrix, old_len: usize, new_len: usize) -> Vec<EditOp> {
    let mut i = old_len;
    let mut j = new_len;
    let mut rv = Vec::with_capacity(old_len.max(new_len));

    while i + j != 0 {
        let cell = matrix.get(i, j);
        match cell.op {
            Operation::Equal => {
                rv.push(EditOp::Equal {
                    old_index: i - 1,
                    new_index: j - 1,
                    len: 1,
                });
                i -= 1;
                j -= 1;
            }
            Operation::Substitute => {
                rv.push(EditOp::Substitute {
                    old_index: i - 1,
                    old_len: 1,
                    new_index: j - 1,
                    new_len: 1,
                });
                i -= 1;
                j -= 1;
            }
            Operation::Delete => {
                rv.push(EditOp::Delete {
                    old_index: i - 1,
                    old_len: 1,
                    new_index: j,
                });
                i -= 1;
            }
            Operation::Insert => {
                rv.push(EditOp::Insert {
                    old_index: i,
                    new_index: j - 1,
                    new_len: 1,
                });
                j -= 1;
            }
            Operation::Transpose => {
                let k = cell.span;
                rv.push(EditOp::Transpose {
                    old_index: i - k,
                    new_index: j - k,
                    len: k,
                });
                i -= k;
                j -= k;
            }
        }
    }

    rv.reverse();
    rv
}

#[cfg(test)]
fn capture<T>(old: &[T], new: &[T], metric: &Metric<'_, T>) -> (Vec<EditOp>, f64) {
    let mut d = crate::algorithms::Capture::new();
    let cost = align(&mut d, old, new, metric).unwrap();
    (d.into_ops(), cost)
}

#[cfg(test)]
fn damerau<'f, T: Ord + 'f>() -> Metric<'f, T> {
    Metric::new(
        CostModel::default(),
        crate::metrics::Equalizer::default(),
        Some(Orderer::natural()),
    )
}

#[test]
fn test_matrix_edges() {
    let metric = Metric::new(
        CostModel::default()
            .with_delete(|_: &u32| 2.0)
            .with_insert(|_: &u32| 3.0),
        crate::metrics::Equalizer::default(),
        None,
    );
    let matrix = make_matrix(&[1, 2], &[1, 2, 3], &metric);
    assert_eq!(matrix.cost(1, 0), 2.0);
    assert_eq!(matrix.cost(2, 0), 4.0);
    assert_eq!(matrix.cost(0, 3), 9.0);
    assert_eq!(matrix.get(2, 0).op, Operation::Delete);
    assert_eq!(matrix.get(0, 1).op, Operation::Insert);
    assert_eq!(matrix.cost(2, 2), 0.0);
    assert_eq!(matrix.cost(2, 3), 3.0);
}

#[test]
fn test_delete_then_insert() {
    let metric = damerau::<u32>();
    let metric = Metric::new(
        metric.costs().clone().with_substitute(|_, _| f64::MAX),
        metric.equalizer().clone(),
        metric.orderer().cloned(),
    );
    let (ops, cost) = capture(&[1, 3, 3], &[1, 2, 3], &metric);
    assert_eq!(cost, 2.0);
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Equal {
            old_index: 0,
            new_index: 0,
            len: 1,
        },
        Delete {
            old_index: 1,
            old_len: 1,
            new_index: 1,
        },
        Insert {
            old_index: 2,
            new_index: 1,
            new_len: 1,
        },
        Equal {
            old_index: 2,
            new_index: 2,
            len: 1,
        },
    ]
    "###);
}

#[test]
fn test_substitute_with_unit_costs() {
    let (ops, cost) = capture(&[1, 3, 3], &[1, 2, 3], &Metric::default());
    assert_eq!(cost, 1.0);
    assert_eq!(
        ops,
        vec![
            EditOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1
            },
            EditOp::Substitute {
                old_index: 1,
                old_len: 1,
                new_index: 1,
                new_len: 1
            },
            EditOp::Equal {
                old_index: 2,
                new_index: 2,
                len: 1
            },
        ]
    );
}

#[test]
fn test_swap() {
    let (ops, cost) = capture(&["guy", "is"], &["is", "guy"], &damerau());
    assert_eq!(cost, 1.0);
    assert_eq!(
        ops,
        vec![EditOp::Transpose {
            old_index: 0,
            new_index: 0,
            len: 2
        }]
    );
}

#[test]
fn test_swap_without_orderer() {
    let (ops, cost) = capture(&["guy", "is"], &["is", "guy"], &Metric::default());
    assert_eq!(cost, 2.0);
    assert!(ops.iter().all(|op| op.operation() == Operation::Substitute));
    assert_eq!(ops.len(), 2);
}

#[test]
fn test_transposition_wins_tie_with_substitution() {
    // every transition reaches the last cell at cost 2
    let metric = Metric::new(
        CostModel::default().with_transpose(|_: &[&str], _: &[&str]| 2.0),
        crate::metrics::Equalizer::default(),
        Some(Orderer::natural()),
    );
    let matrix = make_matrix(&["a", "b"], &["b", "a"], &metric);
    assert_eq!(matrix.cost(1, 1) + 1.0, 2.0);
    assert_eq!(matrix.cost(2, 1) + 1.0, 2.0);
    assert_eq!(matrix.cost(1, 2) + 1.0, 2.0);

    let (ops, cost) = capture(&["a", "b"], &["b", "a"], &metric);
    assert_eq!(cost, 2.0);
    assert_eq!(
        ops,
        vec![EditOp::Transpose {
            old_index: 0,
            new_index: 0,
            len: 2
        }]
    );
}

#[test]
fn test_long_transposition_wins_tie() {
    // moving `c` to the front by insert and delete costs as much as the rotation
    let (ops, cost) = capture(&['a', 'b', 'c'], &['c', 'a', 'b'], &damerau());
    assert_eq!(cost, 2.0);
    assert_eq!(
        ops,
        vec![EditOp::Transpose {
            old_index: 0,
            new_index: 0,
            len: 3
        }]
    );
}

#[test]
fn test_transposition_stops_at_match() {
    let (ops, cost) = capture(&['a', 'x', 'b'], &['b', 'x', 'a'], &damerau());
    assert_eq!(cost, 2.0);
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Substitute {
            old_index: 0,
            old_len: 1,
            new_index: 0,
            new_len: 1,
        },
        Equal {
            old_index: 1,
            new_index: 1,
            len: 1,
        },
        Substitute {
            old_index: 2,
            old_len: 1,
            new_index: 2,
            new_len: 1,
        },
    ]
    "###);
}

#[test]
fn test_free_substitution_stops_transposition_scan() {
    // `x` and `y` sort the same, so without the stop `axb -> bya` would be
    // a three wide transposition tying with the substitutions
    let fold = |c: char| if c == 'y' { 'x' } else { c };
    let metric = Metric::new(
        CostModel::default().with_substitute(|a: &char, b: &char| {
            if (*a, *b) == ('x', 'y') {
                0.0
            } else {
                1.0
            }
        }),
        crate::metrics::Equalizer::default(),
        Some(Orderer::new(move |a: &char, b: &char| fold(*a).cmp(&fold(*b)))),
    );
    let (ops, cost) = capture(&['a', 'x', 'b'], &['b', 'y', 'a'], &metric);
    assert_eq!(cost, 2.0);
    assert_eq!(ops.len(), 3);
    assert!(ops.iter().all(|op| op.operation() == Operation::Substitute));
}

#[test]
fn test_insert_beats_delete() {
    let metric = Metric::new(
        CostModel::default().with_substitute(|_: &char, _: &char| 5.0),
        crate::metrics::Equalizer::default(),
        None,
    );
    let (ops, cost) = capture(&['a'], &['b'], &metric);
    assert_eq!(cost, 2.0);
    assert_eq!(
        ops,
        vec![
            EditOp::Delete {
                old_index: 0,
                old_len: 1,
                new_index: 0
            },
            EditOp::Insert {
                old_index: 1,
                new_index: 0,
                new_len: 1
            },
        ]
    );
}

#[test]
fn test_empty_sides() {
    let (ops, cost) = capture::<&str>(&[], &["", "guy"], &Metric::default());
    assert_eq!(cost, 2.0);
    assert_eq!(
        ops,
        vec![
            EditOp::Insert {
                old_index: 0,
                new_index: 0,
                new_len: 1
            },
            EditOp::Insert {
                old_index: 0,
                new_index: 1,
                new_len: 1
            },
        ]
    );

    let (ops, cost) = capture::<u8>(&[], &[], &Metric::default());
    assert!(ops.is_empty());
    assert_eq!(cost, 0.0);
}

#[test]
fn test_hook_error_stops_alignment() {
    struct FailOnInsert(usize);

    impl AlignHook for FailOnInsert {
        type Error = usize;

        fn equal(&mut self, _: usize, _: usize, _: usize) -> Result<(), usize> {
            self.0 += 1;
            Ok(())
        }

        fn insert(&mut self, _: usize, new_index: usize, _: usize) -> Result<(), usize> {
            Err(new_index)
        }
    }

    let mut d = FailOnInsert(0);
    let rv = align(&mut d, &[1, 2], &[1, 2, 3], &Metric::default());
    assert_eq!(rv, Err(2));
    assert_eq!(d.0, 2);
}
