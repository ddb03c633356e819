// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Back-to-front ordering for painter's-algorithm drawing
//!
//! Faces are ordered by descending depth. Depths within [`DEPTH_EPSILON`] of
//! each other count as equal and keep their input order, so repeated runs
//! over the same walls always composite the same way.

use crate::face::AxonFace;

/// Depth difference below which two faces are treated as level
pub const DEPTH_EPSILON: f64 = 1e-10;

/// Stable sort by descending depth
pub fn depth_sort(faces: Vec<AxonFace>) -> Vec<AxonFace> {
    depth_sort_with_tolerance(faces, DEPTH_EPSILON)
}

pub fn depth_sort_with_tolerance(faces: Vec<AxonFace>, tolerance: f64) -> Vec<AxonFace> {
    merge_sort(faces, &|a: &AxonFace, b: &AxonFace| a.depth - b.depth > tolerance)
}

/// Stable merge sort driven by a "must come before" predicate.
///
/// A tolerance comparison is not a total order, which the slice sorts are
/// allowed to reject. Merging only lets the right run overtake the left run
/// when the predicate holds, so near-equal items never swap.
fn merge_sort<T, F>(mut items: Vec<T>, precedes: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, precedes);
    let right = merge_sort(right, precedes);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => precedes(r, l),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }

    merged
}
