// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D/3D primitives shared by every pipeline stage
//!
//! Points are nalgebra `Point2<f64>` / `Point3<f64>`. Both are `Copy`, so a
//! stage always works on its own copy of a vertex and can never modify a
//! corner that a sibling face still refers to.

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Distance below which two points are considered the same vertex
pub const POINT_EPSILON: f64 = 1e-10;

/// Euclidean distance between two 2D points
#[inline]
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (b - a).norm()
}

/// True when `a` and `b` lie within `tolerance` of each other
#[inline]
pub fn points_coincide(a: &Point2<f64>, b: &Point2<f64>, tolerance: f64) -> bool {
    distance(a, b) <= tolerance
}

/// True when both coordinates are finite numbers
#[inline]
pub fn is_finite_point(p: &Point2<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Signed polygon area using the shoelace formula.
///
/// Positive for counter-clockwise rings. A repeated closing point contributes
/// nothing, so open and closed rings give the same result.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x * points[j].y;
        twice_area -= points[j].x * points[i].y;
    }

    twice_area / 2.0
}

/// Unsigned polygon area
#[inline]
pub fn polygon_area(points: &[Point2<f64>]) -> f64 {
    signed_area(points).abs()
}

/// True when the ring repeats its first point (within `tolerance`) at the end
pub fn is_closed_ring(points: &[Point2<f64>], tolerance: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => points_coincide(first, last, tolerance),
        _ => false,
    }
}

/// Drops the repeated closing point of a ring, if any
pub fn open_ring(points: &[Point2<f64>]) -> &[Point2<f64>] {
    if points.len() >= 2 && is_closed_ring(points, POINT_EPSILON) {
        &points[..points.len() - 1]
    } else {
        points
    }
}

/// Mean Z of a set of 3D points, 0.0 for an empty set
pub fn average_z(points: &[Point3<f64>]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.z).sum::<f64>() / points.len() as f64
}

/// Unit normal of the plane through `a`, `b`, `c` (right-hand rule).
///
/// Collinear or coincident points fall back to +Z.
pub fn plane_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(POINT_EPSILON)
        .unwrap_or_else(Vector3::z)
}

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bounds2 {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds2 {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounding box of all finite points, `None` if there are none
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2<f64>>,
    {
        points
            .into_iter()
            .filter(|p| is_finite_point(p))
            .fold(None, |bounds: Option<Bounds2>, p| {
                Some(match bounds {
                    None => Bounds2::new(p.x, p.x, p.y, p.y),
                    Some(b) => Bounds2::new(
                        b.min_x.min(p.x),
                        b.max_x.max(p.x),
                        b.min_y.min(p.y),
                        b.max_y.max(p.y),
                    ),
                })
            })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Containment test with `tolerance` slack on every side
    pub fn contains(&self, p: &Point2<f64>, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }
}
