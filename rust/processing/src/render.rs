// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinator for the per-wall geometry pipeline.
//!
//! Walls are independent until the final depth sort, so each one is offset,
//! extruded, culled and projected on the rayon pool. Results are gathered in
//! input order and sorted once over the whole set.

use axoplan_geometry::{depth_sort, render_wall, AxonFace, CenterlineWall};
use axoplan_topology::Wall;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;

/// A wall that produced no faces, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedWall {
    pub id: String,
    pub reason: String,
}

/// Depth-sorted faces of a floor plan, back to front.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenderedPlan {
    pub faces: Vec<AxonFace>,
    pub skipped: Vec<SkippedWall>,
}

/// Convert a topology wall into a single-segment centerline wall.
///
/// Unusable thicknesses and missing or non-positive heights fall back to the
/// configured defaults.
pub fn to_centerline_wall(wall: &Wall, config: &PipelineConfig) -> CenterlineWall {
    let scale = config.unit_scale;

    let thickness = if wall.thickness.is_finite() && wall.thickness > 0.0 {
        wall.thickness * scale
    } else {
        config.default_thickness
    };
    let height = wall
        .height
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(config.default_height);

    CenterlineWall::straight(
        (wall.start.coords * scale).into(),
        (wall.end.coords * scale).into(),
        thickness,
        height,
    )
}

/// Render every wall and depth-sort the combined faces.
///
/// A wall whose geometry cannot be built is logged and skipped; it never
/// stops the rest of the plan from rendering.
pub fn render_walls(walls: &[Wall], config: &PipelineConfig) -> RenderedPlan {
    let per_wall: Vec<_> = walls
        .par_iter()
        .map(|wall| render_wall(&to_centerline_wall(wall, config), &config.view))
        .collect();

    let mut faces = Vec::new();
    let mut skipped = Vec::new();

    for (wall, result) in walls.iter().zip(per_wall) {
        match result {
            Ok(wall_faces) => faces.extend(wall_faces),
            Err(e) => {
                tracing::warn!(wall_id = %wall.id, error = %e, "Skipping wall");
                skipped.push(SkippedWall {
                    id: wall.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(faces = faces.len(), "Depth sorting faces");
    let faces = depth_sort(faces);

    tracing::info!(
        walls = walls.len(),
        skipped = skipped.len(),
        faces = faces.len(),
        "Rendered walls"
    );

    RenderedPlan { faces, skipped }
}
