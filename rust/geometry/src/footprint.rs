// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall footprints: one closed, counter-clockwise ring per wall

use crate::vector::{is_closed_ring, signed_area, POINT_EPSILON};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Merge the two offset boundaries of a wall into a closed CCW polygon.
///
/// The ring walks out along `left` and back along `right`. Returns an empty
/// polygon if either side is empty.
pub fn build_footprint(left: &[Point2<f64>], right: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }

    let mut ring: Vec<Point2<f64>> = left
        .iter()
        .chain(right.iter().rev())
        .copied()
        .collect();

    if !is_closed_ring(&ring, POINT_EPSILON) {
        ring.push(ring[0]);
    }

    // Extrusion derives side normals from the winding
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }

    ring
}

/// Result of [`validate_footprint`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FootprintValidity {
    pub valid: bool,
    /// Signed area of the ring
    pub area: f64,
    /// The ring does not end on its first point
    pub has_gaps: bool,
}

/// Check that a footprint is a usable closed polygon
pub fn validate_footprint(polygon: &[Point2<f64>]) -> FootprintValidity {
    let area = signed_area(polygon);
    let has_gaps = !polygon.is_empty() && !is_closed_ring(polygon, POINT_EPSILON);

    // A closed quad (4 points including the repeated start) is the smallest wall outline
    let valid = polygon.len() >= 4 && area > 0.0;

    FootprintValidity {
        valid,
        area,
        has_gaps,
    }
}
