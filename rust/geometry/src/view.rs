// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View parameters shared by culling and projection

use crate::projection::AxonometricProjection;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Un-normalized direction towards the viewer
pub const DEFAULT_VIEW_DIRECTION: [f64; 3] = [1.0, 1.0, -1.0];

/// Faces whose normal is this far below perpendicular to the view are still kept
pub const CULL_TOLERANCE: f64 = 1e-6;

/// Fixed view used for every wall of a drawing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    pub view_direction: Vector3<f64>,
    pub cull_tolerance: f64,
    pub projection: AxonometricProjection,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_VIEW_DIRECTION;
        Self {
            view_direction: Vector3::new(x, y, z),
            cull_tolerance: CULL_TOLERANCE,
            projection: AxonometricProjection::default(),
        }
    }
}

impl ViewConfig {
    /// Unit view direction; a zero vector falls back to the default view
    pub fn unit_view_direction(&self) -> Vector3<f64> {
        self.view_direction.try_normalize(f64::EPSILON).unwrap_or_else(|| {
            let [x, y, z] = DEFAULT_VIEW_DIRECTION;
            Vector3::new(x, y, z).normalize()
        })
    }
}
