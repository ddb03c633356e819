// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Centerline offsetting: parallel boundaries at half the wall thickness
//!
//! Each segment contributes the perpendicular `(-dy, dx) / len`. Interior
//! vertices (and every vertex of a closed loop) use the renormalized average
//! of their two adjacent segment normals, which mitres the corners instead of
//! leaving a step at each turn.
//!
//! The `left` boundary is the centerline moved against the normal and the
//! `right` boundary is moved along it, so a wall running along +X has its
//! `left` side at lower Y.

use crate::vector::{points_coincide, POINT_EPSILON};
use nalgebra::{Point2, Vector2};

/// Normal used for zero-length segments
const DEFAULT_NORMAL: Vector2<f64> = Vector2::new(0.0, 1.0);

/// The two boundaries of a thick centerline, one point per centerline vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetLines {
    pub left: Vec<Point2<f64>>,
    pub right: Vec<Point2<f64>>,
}

/// Offset `centerline` by `thickness / 2` on both sides.
///
/// Centerlines with fewer than two points have no direction and produce empty
/// boundaries.
pub fn offset_centerline(centerline: &[Point2<f64>], thickness: f64) -> OffsetLines {
    if centerline.len() < 2 {
        return OffsetLines::default();
    }

    let half = thickness / 2.0;
    let normals = vertex_normals(centerline);

    let left = centerline
        .iter()
        .zip(&normals)
        .map(|(p, n)| p - n * half)
        .collect();
    let right = centerline
        .iter()
        .zip(&normals)
        .map(|(p, n)| p + n * half)
        .collect();

    OffsetLines { left, right }
}

/// A centerline is a closed loop when it has at least three points and its
/// last point repeats the first.
pub fn is_closed_loop(centerline: &[Point2<f64>]) -> bool {
    match (centerline.first(), centerline.last()) {
        (Some(first), Some(last)) if centerline.len() >= 3 => {
            points_coincide(first, last, POINT_EPSILON)
        }
        _ => false,
    }
}

/// Unit perpendicular of the segment `a -> b`
pub fn segment_normal(a: &Point2<f64>, b: &Point2<f64>) -> Vector2<f64> {
    let d = b - a;
    Vector2::new(-d.y, d.x)
        .try_normalize(POINT_EPSILON)
        .unwrap_or(DEFAULT_NORMAL)
}

/// Averaged normal at a corner between two segments.
///
/// Opposing normals (a hairpin) cancel out; the incoming normal is kept then.
fn mitre_normal(incoming: Vector2<f64>, outgoing: Vector2<f64>) -> Vector2<f64> {
    (incoming + outgoing)
        .try_normalize(POINT_EPSILON)
        .unwrap_or(incoming)
}

fn vertex_normals(centerline: &[Point2<f64>]) -> Vec<Vector2<f64>> {
    if is_closed_loop(centerline) {
        // Work on the distinct vertices, the wrap-around edge joins last to first
        let ring = &centerline[..centerline.len() - 1];
        let n = ring.len();
        let edges: Vec<_> = (0..n)
            .map(|i| segment_normal(&ring[i], &ring[(i + 1) % n]))
            .collect();

        let mut normals: Vec<_> = (0..n)
            .map(|i| mitre_normal(edges[(i + n - 1) % n], edges[i]))
            .collect();
        normals.push(normals[0]);
        normals
    } else {
        let edges: Vec<_> = centerline
            .windows(2)
            .map(|w| segment_normal(&w[0], &w[1]))
            .collect();
        let last = centerline.len() - 1;

        (0..centerline.len())
            .map(|i| {
                if i == 0 {
                    edges[0]
                } else if i == last {
                    edges[last - 1]
                } else {
                    mitre_normal(edges[i - 1], edges[i])
                }
            })
            .collect()
    }
}
