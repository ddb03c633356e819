// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face records produced by extrusion and consumed by the renderer

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Coarse drawing style picked from the dominant axis of a face normal.
///
/// `Back` covers both downward faces and faces pointing to -Y; a line
/// renderer draws them the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FaceStyle {
    Top,
    Left,
    Right,
    Front,
    Back,
}

impl FaceStyle {
    /// Classify a normal. Z wins ties, then X wins over Y.
    pub fn from_normal(normal: &Vector3<f64>) -> Self {
        let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());

        if az >= ax && az >= ay {
            if normal.z > 0.0 {
                FaceStyle::Top
            } else {
                FaceStyle::Back
            }
        } else if ax >= ay {
            if normal.x > 0.0 {
                FaceStyle::Right
            } else {
                FaceStyle::Left
            }
        } else if normal.y > 0.0 {
            FaceStyle::Front
        } else {
            FaceStyle::Back
        }
    }
}

/// Planar 3D polygon with an outward unit normal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Face {
    pub vertices: Vec<Point3<f64>>,
    pub normal: Vector3<f64>,
    pub style: FaceStyle,
}

impl Face {
    /// Build a face, deriving its style from `normal`
    pub fn new(vertices: Vec<Point3<f64>>, normal: Vector3<f64>) -> Self {
        let style = FaceStyle::from_normal(&normal);
        Self {
            vertices,
            normal,
            style,
        }
    }
}

/// Projected face ready for painter's-algorithm drawing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxonFace {
    pub vertices: Vec<Point2<f64>>,
    /// Average Z of the source vertices
    pub depth: f64,
    pub normal: Vector3<f64>,
    pub style: FaceStyle,
}
