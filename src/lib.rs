//! This crate computes minimum-cost alignments between two sequences.
//!
//! It generalizes the Levenshtein distance with contiguous transpositions
//! (Damerau-Levenshtein) and fully pluggable cost functions.  Instead of
//! only returning a number it produces a positioned edit script which can
//! be inspected, rendered or applied to other sequences.
//!
//! ```rust
//! use aligner::{Aligner, Operation};
//!
//! let aligner = Aligner::damerau_levenshtein();
//! let alignment = aligner.align(&["the", "guy", "is", "here"], &["the", "is", "guy", "here"]);
//! for edit in alignment.diffs() {
//!     assert_eq!(edit.operation(), Operation::Transpose);
//!     assert_eq!(edit.source().position(), 1);
//! }
//! assert_eq!(alignment.distance(), 0.25);
//! ```
//!
//! # Components
//!
//! * [`Aligner`]: the entry point.  Comes with two presets
//!   ([`Aligner::levenshtein`] and [`Aligner::damerau_levenshtein`]) and a
//!   builder for custom costs ([`Aligner::configure`]).
//! * [`Alignment`]: the result, an ordered list of [`Edit`]s plus the total
//!   cost and derived metrics.
//! * [`algorithms`]: the low level engine operating on indexes through an
//!   [`AlignHook`](algorithms::AlignHook).
//! * [`metrics`]: the cost model, equality predicate and the order used to
//!   detect transpositions.
//! * [`patch`]: applies edit scripts to sequences and reverts them.
//! * [`text`]: helpers to align strings by characters or words.
//!
//! # Features
//!
//! * `text`: enables the text utilities.  This is enabled by default.
//! * `unicode`: adds grapheme and unicode word tokenization to the text
//!   utilities.
//! * `serde`: implements serialization for edits, ops and alignments.
mod aligner;
mod alignment;
mod edit;

pub mod algorithms;
pub mod metrics;
pub mod patch;
#[cfg(feature = "text")]
pub mod text;

pub use self::aligner::{Aligner, AlignerConfig};
pub use self::alignment::Alignment;
pub use self::edit::{Edit, MergeError, Operation, Segment, Unplaced};
pub use self::patch::{Patch, PatchError};
