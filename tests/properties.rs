use aligner::{Aligner, Operation, Patch};
use proptest::prelude::*;

fn small_seq() -> impl Strategy<Value = Vec<u8>> {
    // a tiny alphabet produces plenty of matches and transpositions
    prop::collection::vec(0u8..4, 0..12)
}

proptest! {
    #[test]
    fn test_self_alignment_is_free(seq in small_seq()) {
        let alignment = Aligner::damerau_levenshtein().align(&seq, &seq);
        prop_assert_eq!(alignment.cost(), 0.0);
        prop_assert!(alignment.iter().all(|edit| edit.operation() == Operation::Equal));
        prop_assert_eq!(alignment.len(), seq.len());
    }

    #[test]
    fn test_edits_partition_both_sides(old in small_seq(), new in small_seq()) {
        for aligner in [Aligner::levenshtein(), Aligner::damerau_levenshtein()] {
            let alignment = aligner.align(&old, &new);
            prop_assert_eq!(alignment.source(), old.clone());
            prop_assert_eq!(alignment.target(), new.clone());
            if let Some(first) = alignment.edits().first() {
                prop_assert_eq!(first.source().position(), 0);
                prop_assert_eq!(first.target().position(), 0);
            }
            for pair in alignment.edits().windows(2) {
                prop_assert!(pair[0].is_left_sibling_of(&pair[1]));
            }
        }
    }

    #[test]
    fn test_edit_shapes(old in small_seq(), new in small_seq()) {
        let alignment = Aligner::damerau_levenshtein().align(&old, &new);
        for edit in alignment.edits() {
            let (s, t) = (edit.source().len(), edit.target().len());
            match edit.operation() {
                Operation::Equal | Operation::Substitute => {
                    prop_assert_eq!((s, t), (1, 1));
                }
                Operation::Insert => {
                    prop_assert_eq!((s, t), (0, 1));
                }
                Operation::Delete => {
                    prop_assert_eq!((s, t), (1, 0));
                }
                Operation::Transpose => {
                    prop_assert!(s >= 2);
                    prop_assert_eq!(s, t);
                }
            }
        }
    }

    #[test]
    fn test_unit_distance_in_range(old in small_seq(), new in small_seq()) {
        for aligner in [Aligner::levenshtein(), Aligner::damerau_levenshtein()] {
            let distance = aligner.align(&old, &new).distance();
            prop_assert!((0.0..=1.0).contains(&distance));
        }
    }

    #[test]
    fn test_deterministic(old in small_seq(), new in small_seq()) {
        let aligner = Aligner::damerau_levenshtein();
        prop_assert_eq!(aligner.align(&old, &new), aligner.align(&old, &new));
    }

    #[test]
    fn test_no_orderer_no_transpositions(old in small_seq(), new in small_seq()) {
        let alignment = Aligner::levenshtein().align(&old, &new);
        prop_assert!(alignment.iter().all(|edit| edit.operation() != Operation::Transpose));
    }

    #[test]
    fn test_transpositions_never_cost_more(old in small_seq(), new in small_seq()) {
        let plain = Aligner::levenshtein().align(&old, &new).cost();
        let damerau = Aligner::damerau_levenshtein().align(&old, &new).cost();
        prop_assert!(damerau <= plain);
    }

    #[test]
    fn test_patch_roundtrip(old in small_seq(), new in small_seq()) {
        let alignment = Aligner::damerau_levenshtein().align(&old, &new);
        let patch = Patch::new(alignment.into_edits());
        prop_assert_eq!(patch.apply_to(&old).unwrap(), new.clone());
        prop_assert_eq!(patch.undo_from(&new).unwrap(), old);
    }
}
