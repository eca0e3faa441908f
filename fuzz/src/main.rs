#![allow(clippy::all)]

use afl::fuzz;
use aligner::{Aligner, Patch};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
enum FuzzVariant {
    Levenshtein(Vec<u8>, Vec<u8>),
    Damerau(Vec<u8>, Vec<u8>),
    Weighted(Vec<u8>, Vec<u8>),
}

fn check(aligner: &Aligner<'_, u8>, old: &[u8], new: &[u8]) {
    let alignment = aligner.align(old, new);
    assert_eq!(alignment.source(), old);
    assert_eq!(alignment.target(), new);
    for pair in alignment.edits().windows(2) {
        assert!(pair[0].is_left_sibling_of(&pair[1]));
    }
    let patch = Patch::new(alignment.into_edits());
    assert_eq!(patch.apply_to(old).unwrap(), new);
    assert_eq!(patch.undo_from(new).unwrap(), old);
}

fn main() {
    fuzz!(|data: FuzzVariant| {
        match data {
            FuzzVariant::Levenshtein(old, new) => {
                check(&Aligner::levenshtein(), &old, &new);
            }
            FuzzVariant::Damerau(old, new) => {
                check(&Aligner::damerau_levenshtein(), &old, &new);
            }
            FuzzVariant::Weighted(old, new) => {
                let aligner = Aligner::configure()
                    .natural_order()
                    .substitute_cost(|a: &u8, b: &u8| (*a as f64 - *b as f64).abs() / 255.0)
                    .transpose_cost(|old: &[u8], _: &[u8]| old.len() as f64 * 0.4)
                    .build();
                check(&aligner, &old, &new);
            }
        };
    });
}
