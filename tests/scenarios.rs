use aligner::algorithms::{capture_align, EditOp};
use aligner::metrics::Metric;
use aligner::{Aligner, Edit, Operation, Patch, PatchError};

#[test]
fn test_delete_and_insert_when_substitution_is_forbidden() {
    let alignment = Aligner::configure()
        .natural_order()
        .substitute_cost(|_: &u32, _: &u32| f64::MAX)
        .build()
        .align(&[1, 3, 3], &[1, 2, 3]);
    let ops = alignment
        .iter()
        .map(|edit| {
            (
                edit.operation(),
                edit.source().position(),
                edit.target().position(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        ops,
        vec![
            (Operation::Equal, 0, 0),
            (Operation::Delete, 1, 1),
            (Operation::Insert, 2, 1),
            (Operation::Equal, 2, 2),
        ]
    );
    assert_eq!(alignment.cost(), 2.0);
    assert_eq!(alignment.distance(), 2.0 / 3.0);
}

#[test]
fn test_word_swap() {
    let alignment = Aligner::damerau_levenshtein().align(&["guy", "is"], &["is", "guy"]);
    assert_eq!(
        alignment.into_edits(),
        vec![Edit::transpose(vec!["guy", "is"], vec!["is", "guy"]).at(0, 0)]
    );
}

#[test]
fn test_insert_into_nothing() {
    let alignment = Aligner::levenshtein().align(&[], &["", "guy"]);
    assert_eq!(alignment.cost(), 2.0);
    assert_eq!(alignment.distance(), 1.0);
    for (idx, edit) in alignment.iter().enumerate() {
        assert_eq!(edit.operation(), Operation::Insert);
        assert_eq!(edit.source().position(), 0);
        assert!(edit.source().is_empty());
        assert_eq!(edit.target().position(), idx);
    }
}

#[test]
fn test_asymmetric_costs() {
    let aligner = Aligner::configure()
        .delete_cost(|_: &char| 3.0)
        .substitute_cost(|_: &char, _: &char| 10.0)
        .build();
    let forward = aligner.align(&['a', 'b'], &['a']);
    let backward = aligner.align(&['a'], &['a', 'b']);
    assert_eq!(forward.cost(), 3.0);
    assert_eq!(backward.cost(), 1.0);
}

#[test]
fn test_low_level_ops() {
    let (ops, cost) = capture_align(&[1, 2, 3], &[1, 3], &Metric::default());
    assert_eq!(cost, 1.0);
    assert_eq!(
        ops,
        vec![
            EditOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1
            },
            EditOp::Delete {
                old_index: 1,
                old_len: 1,
                new_index: 1
            },
            EditOp::Equal {
                old_index: 2,
                new_index: 1,
                len: 1
            },
        ]
    );
}

#[test]
fn test_patch_rejects_foreign_sequence() {
    let alignment = Aligner::levenshtein().align(&[1, 2, 3, 4], &[1, 2, 3, 5]);
    let patch = alignment.into_iter().collect::<Patch<_>>();
    assert_eq!(patch.apply_to(&[1, 2, 3, 4]).unwrap(), vec![1, 2, 3, 5]);
    assert!(matches!(
        patch.apply_to(&[1, 2]),
        Err(PatchError::PositionOutOfBounds { .. })
    ));
}

#[test]
#[cfg(feature = "serde")]
fn test_serde() {
    let alignment = Aligner::damerau_levenshtein().align(&["a", "b"], &["b", "a"]);
    let json = serde_json::to_string(&alignment).unwrap();
    assert_eq!(
        json,
        r#"{"edits":[{"operation":"transpose","source":{"position":0,"tokens":["a","b"]},"target":{"position":0,"tokens":["b","a"]}}],"cost":1.0}"#
    );

    let (ops, _) = Aligner::levenshtein().align_ops(&[1], &[2]);
    let json = serde_json::to_string(&ops).unwrap();
    assert_eq!(
        json,
        r#"[{"op":"substitute","old_index":0,"old_len":1,"new_index":0,"new_len":1}]"#
    );
}
