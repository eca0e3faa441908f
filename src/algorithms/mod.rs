//! The alignment engine.
//!
//! The implementation in this module is relatively low level and exposes
//! the most generic bounds possible.  To use it you would typically go
//! through [`Aligner`](crate::Aligner) which returns owned edits with the
//! aligned tokens, but direct access can be useful when only indexes are
//! needed.
//!
//! The engine is driven through an [`AlignHook`].  As the alignment is
//! recovered from the cost matrix the hook is invoked with the indexes of
//! the affected spans, left to right.  The hook does not get access to the
//! tokens themselves.  [`Capture`] is a hook that records the calls as
//! [`EditOp`] values.

// general traits and utilities
mod capture;
mod hook;

pub use capture::*;
pub use hook::*;

pub mod damerau;

use crate::metrics::Metric;

/// Aligns two slices with the given hook.
///
/// Returns the total cost of the alignment.
pub fn align_slices<D, T>(d: &mut D, old: &[T], new: &[T], metric: &Metric<'_, T>) -> Result<f64, D::Error>
where
    D: AlignHook,
{
    damerau::align(d, old, new, metric)
}

/// Aligns two slices capturing the ops.
///
/// This is like [`align_slices`] but instead of using an arbitrary hook
/// this will always use [`Capture`] and return the captured [`EditOp`]s
/// together with the total cost.
pub fn capture_align<T>(old: &[T], new: &[T], metric: &Metric<'_, T>) -> (Vec<EditOp>, f64) {
    let mut d = Capture::new();
    let cost = match align_slices(&mut d, old, new, metric) {
        Ok(cost) => cost,
        Err(never) => match never {},
    };
    (d.into_ops(), cost)
}
