// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - lifting 2D footprints into prism faces

use crate::error::{Error, Result};
use crate::face::Face;
use crate::vector::{open_ring, plane_normal};
use nalgebra::{Point2, Point3};

/// Extrude a footprint along +Z into a top face plus one quad per edge.
///
/// The footprint may repeat its first point at the end. Side quads are
/// `[bottom[i], bottom[i+1], top[i+1], top[i]]`, wrapping on the last edge.
/// A footprint with fewer than three distinct vertices is an error.
pub fn extrude_footprint(footprint: &[Point2<f64>], height: f64) -> Result<Vec<Face>> {
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidHeight(height));
    }

    let ring = open_ring(footprint);
    if ring.len() < 3 {
        return Err(Error::DegenerateFootprint {
            vertices: ring.len(),
        });
    }

    let bottom: Vec<Point3<f64>> = ring.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
    let top: Vec<Point3<f64>> = ring.iter().map(|p| Point3::new(p.x, p.y, height)).collect();

    let n = ring.len();
    let mut faces = Vec::with_capacity(n + 1);

    // Top cap always faces up regardless of footprint winding
    let mut top_normal = plane_normal(&top[0], &top[1], &top[2]);
    if top_normal.z < 0.0 {
        top_normal = -top_normal;
    }
    faces.push(Face::new(top.clone(), top_normal));

    for i in 0..n {
        let j = (i + 1) % n;
        let vertices = vec![bottom[i], bottom[j], top[j], top[i]];
        let normal = plane_normal(&vertices[0], &vertices[1], &vertices[2]);
        faces.push(Face::new(vertices, normal));
    }

    Ok(faces)
}
