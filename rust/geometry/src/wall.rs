// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walls as the geometry pipeline sees them: a centerline with a cross-section

use crate::error::{Error, Result};
use crate::extrusion::extrude_footprint;
use crate::face::Face;
use crate::footprint::build_footprint;
use crate::offset::offset_centerline;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Wall centerline with thickness and height
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CenterlineWall {
    /// At least two points
    pub centerline: Vec<Point2<f64>>,
    pub thickness: f64,
    pub height: f64,
}

impl CenterlineWall {
    pub fn new(centerline: Vec<Point2<f64>>, thickness: f64, height: f64) -> Self {
        Self {
            centerline,
            thickness,
            height,
        }
    }

    /// Single-segment wall between two endpoints
    pub fn straight(start: Point2<f64>, end: Point2<f64>, thickness: f64, height: f64) -> Self {
        Self::new(vec![start, end], thickness, height)
    }

    /// Footprint polygon of this wall (closed, CCW)
    pub fn footprint(&self) -> Vec<Point2<f64>> {
        let lines = offset_centerline(&self.centerline, self.thickness);
        build_footprint(&lines.left, &lines.right)
    }
}

/// Extruded wall: its faces plus the parameters they were built from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallVolume {
    pub faces: Vec<Face>,
    pub centerline: Vec<Point2<f64>>,
    pub thickness: f64,
    pub height: f64,
}

impl WallVolume {
    /// Offset, close and extrude a wall
    pub fn from_wall(wall: &CenterlineWall) -> Result<Self> {
        if wall.centerline.len() < 2 {
            return Err(Error::DegenerateCenterline {
                points: wall.centerline.len(),
            });
        }

        let faces = extrude_footprint(&wall.footprint(), wall.height)?;

        Ok(Self {
            faces,
            centerline: wall.centerline.clone(),
            thickness: wall.thickness,
            height: wall.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_wall_volume() {
        let wall = CenterlineWall::straight(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
            2700.0,
        );
        let volume = WallVolume::from_wall(&wall).unwrap();

        assert_eq!(volume.faces.len(), 5);
        assert_eq!(volume.centerline, wall.centerline);
        assert_eq!(volume.height, 2700.0);
    }

    #[test]
    fn test_single_point_centerline_fails() {
        let wall = CenterlineWall::new(vec![Point2::new(1.0, 1.0)], 0.2, 2.7);
        assert_eq!(
            WallVolume::from_wall(&wall),
            Err(Error::DegenerateCenterline { points: 1 })
        );
    }

    #[test]
    fn test_zero_thickness_collapses() {
        // Both sides coincide and the ring already ends on its start
        let wall = CenterlineWall::straight(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 0.0, 1.0);
        let footprint = wall.footprint();
        assert_eq!(footprint.len(), 4);
        assert!(!crate::footprint::validate_footprint(&footprint).valid);
    }

    #[test]
    fn test_does_not_touch_source_wall() {
        let wall = CenterlineWall::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 0.0),
                Point2::new(5.0, 5.0),
            ],
            0.3,
            2.5,
        );
        let before = wall.clone();
        let _ = WallVolume::from_wall(&wall).unwrap();
        assert_eq!(wall, before);
    }
}
