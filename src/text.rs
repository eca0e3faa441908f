//! Text alignment utilities.
//!
//! This tokenizes strings into characters, words or (with the `unicode`
//! feature) graphemes and unicode words, and aligns the tokens with a given
//! [`Aligner`].  The word and grapheme tokens borrow from the input strings.
//!
//! ```rust
//! use aligner::Aligner;
//! use aligner::text::align_words;
//!
//! let aligner = Aligner::damerau_levenshtein();
//! let alignment = align_words(&aligner, "the guy is here", "is the guy here");
//! assert_eq!(alignment.cost(), 2.0);
//! ```
#![cfg(feature = "text")]
use crate::aligner::Aligner;
use crate::alignment::Alignment;

/// Aligns two strings character by character.
pub fn align_chars(aligner: &Aligner<'_, char>, old: &str, new: &str) -> Alignment<char> {
    let old = old.chars().collect::<Vec<_>>();
    let new = new.chars().collect::<Vec<_>>();
    aligner.align(&old, &new)
}

/// Aligns two strings word by word.
///
/// Words are separated by whitespace, the whitespace itself is dropped.
pub fn align_words<'x>(
    aligner: &Aligner<'_, &'x str>,
    old: &'x str,
    new: &'x str,
) -> Alignment<&'x str> {
    let old = old.split_whitespace().collect::<Vec<_>>();
    let new = new.split_whitespace().collect::<Vec<_>>();
    aligner.align(&old, &new)
}

/// Aligns two strings grapheme by grapheme.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn align_graphemes<'x>(
    aligner: &Aligner<'_, &'x str>,
    old: &'x str,
    new: &'x str,
) -> Alignment<&'x str> {
    use unicode_segmentation::UnicodeSegmentation;
    let old = old.graphemes(true).collect::<Vec<_>>();
    let new = new.graphemes(true).collect::<Vec<_>>();
    aligner.align(&old, &new)
}

/// Aligns two strings by unicode words.
///
/// Punctuation and whitespace are not part of the tokens.  This requires
/// the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn align_unicode_words<'x>(
    aligner: &Aligner<'_, &'x str>,
    old: &'x str,
    new: &'x str,
) -> Alignment<&'x str> {
    use unicode_segmentation::UnicodeSegmentation;
    let old = old.unicode_words().collect::<Vec<_>>();
    let new = new.unicode_words().collect::<Vec<_>>();
    aligner.align(&old, &new)
}

/// Return a measure of character level similarity in the range `0..=1`.
///
/// This is the [`ratio`](Alignment::ratio) of a Levenshtein alignment of
/// the characters of both strings.  Two empty strings are a complete match.
pub fn char_edit_ratio(old: &str, new: &str) -> f64 {
    align_chars(&Aligner::levenshtein(), old, new).ratio()
}

#[test]
fn test_align_chars() {
    let alignment = align_chars(&Aligner::damerau_levenshtein(), "acb", "abc");
    insta::assert_debug_snapshot!(alignment.edits(), @r###"
    [
        Edit {
            operation: Equal,
            source: Segment {
                position: 0,
                tokens: [
                    'a',
                ],
            },
            target: Segment {
                position: 0,
                tokens: [
                    'a',
                ],
            },
        },
        Edit {
            operation: Transpose,
            source: Segment {
                position: 1,
                tokens: [
                    'c',
                    'b',
                ],
            },
            target: Segment {
                position: 1,
                tokens: [
                    'b',
                    'c',
                ],
            },
        },
    ]
    "###);
}

#[test]
fn test_align_words() {
    let alignment = align_words(&Aligner::levenshtein(), "foo  bar\nbaz", "foo bor baz");
    let rendered = alignment
        .iter()
        .map(|edit| edit.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        rendered,
        vec![" 0:0 [foo] -> [foo]", "~1:1 [bar] -> [bor]", " 2:2 [baz] -> [baz]"]
    );
}

#[test]
fn test_char_edit_ratio() {
    assert_eq!(char_edit_ratio("", ""), 1.0);
    assert_eq!(char_edit_ratio("abcd", "abcd"), 1.0);
    assert_eq!(char_edit_ratio("abcd", "abce"), 0.75);
    assert_eq!(char_edit_ratio("ab", ""), 0.0);
}

#[test]
#[cfg(feature = "unicode")]
fn test_align_graphemes() {
    let aligner = Aligner::levenshtein();
    let alignment = align_graphemes(&aligner, "cafe\u{301}", "cafe");
    assert_eq!(alignment.cost(), 1.0);
    assert_eq!(alignment.diffs().count(), 1);
    assert_eq!(alignment.source_len(), 4);
}

#[test]
#[cfg(feature = "unicode")]
fn test_align_unicode_words() {
    let aligner = Aligner::damerau_levenshtein();
    let alignment = align_unicode_words(&aligner, "Hello, big world!", "Hello world, big!");
    assert_eq!(alignment.cost(), 1.0);
    assert_eq!(alignment.target(), vec!["Hello", "world", "big"]);
}
