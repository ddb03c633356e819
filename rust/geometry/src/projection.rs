// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-angle axonometric projection
//!
//! `x' = x cos(a) - y cos(b)` and `y' = x sin(a) + y sin(b) - z`. Points are
//! taken by value, so projecting can never alter a vertex that another face
//! shares.

use crate::face::{AxonFace, Face};
use crate::vector::average_z;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Default angle of both plan axes against the horizontal, in degrees
pub const DEFAULT_AXON_ANGLE_DEG: f64 = 30.0;

/// Parallel projection with independent angles for the X and Y axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AxonometricProjection {
    pub alpha_deg: f64,
    pub beta_deg: f64,
}

impl Default for AxonometricProjection {
    fn default() -> Self {
        Self {
            alpha_deg: DEFAULT_AXON_ANGLE_DEG,
            beta_deg: DEFAULT_AXON_ANGLE_DEG,
        }
    }
}

impl AxonometricProjection {
    pub fn new(alpha_deg: f64, beta_deg: f64) -> Self {
        Self {
            alpha_deg,
            beta_deg,
        }
    }

    #[inline]
    pub fn project(&self, point: Point3<f64>) -> Point2<f64> {
        let (sin_a, cos_a) = self.alpha_deg.to_radians().sin_cos();
        let (sin_b, cos_b) = self.beta_deg.to_radians().sin_cos();

        Point2::new(
            point.x * cos_a - point.y * cos_b,
            point.x * sin_a + point.y * sin_b - point.z,
        )
    }

    /// Project every point independently
    pub fn project_all(&self, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
        points.iter().map(|p| self.project(*p)).collect()
    }

    /// Project a face, recording the mean source Z as its depth
    pub fn project_face(&self, face: &Face) -> AxonFace {
        AxonFace {
            vertices: self.project_all(&face.vertices),
            depth: average_z(&face.vertices),
            normal: face.normal,
            style: face.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_unit_axes() {
        let projection = AxonometricProjection::default();
        let cos30 = 30f64.to_radians().cos();

        assert_relative_eq!(projection.project(Point3::new(1.0, 0.0, 0.0)), Point2::new(cos30, 0.5));
        assert_relative_eq!(projection.project(Point3::new(0.0, 1.0, 0.0)), Point2::new(-cos30, 0.5));
        assert_relative_eq!(projection.project(Point3::new(0.0, 0.0, 1.0)), Point2::new(0.0, -1.0));
    }

    #[test]
    fn test_source_points_unchanged() {
        let projection = AxonometricProjection::default();
        let points = vec![Point3::new(1.5, -2.0, 3.0), Point3::new(0.0, 4.0, 2700.0)];
        let snapshot = points.clone();

        let projected = projection.project_all(&points);
        assert_eq!(projected.len(), 2);
        assert_eq!(points, snapshot);

        let p = Point3::new(7.0, 8.0, 9.0);
        let _ = projection.project(p);
        assert_eq!(p, Point3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_shared_vertex_projects_identically() {
        let projection = AxonometricProjection::default();
        let corner = Point3::new(2.0, 3.0, 1.0);
        let a = Face::new(vec![corner, Point3::new(2.0, 4.0, 1.0), Point3::new(3.0, 4.0, 1.0)], Vector3::z());
        let b = Face::new(vec![Point3::new(1.0, 3.0, 1.0), corner, Point3::new(1.0, 3.0, 0.0)], Vector3::x());

        let pa = projection.project_face(&a);
        let pb = projection.project_face(&b);
        assert_eq!(pa.vertices[0], pb.vertices[1]);
        assert_relative_eq!(pa.depth, 1.0);
        assert_relative_eq!(pb.depth, 2.0 / 3.0);
    }

    #[test]
    fn test_alternate_angles() {
        let projection = AxonometricProjection::new(0.0, 90.0);
        let p = projection.project(Point3::new(2.0, 3.0, 1.0));
        assert_relative_eq!(p, Point2::new(2.0, 2.0), epsilon = 1e-12);
    }
}
