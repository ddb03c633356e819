// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-wall stages: extrude, cull, project
//!
//! Depth sorting is left to the caller because it has to run once over the
//! faces of every wall together.

use crate::culling::cull_back_faces;
use crate::error::Result;
use crate::face::AxonFace;
use crate::wall::{CenterlineWall, WallVolume};
use crate::view::ViewConfig;

/// Visible projected faces of one wall, in extrusion order
pub fn render_wall(wall: &CenterlineWall, view: &ViewConfig) -> Result<Vec<AxonFace>> {
    let volume = WallVolume::from_wall(wall)?;
    let visible = cull_back_faces(
        volume.faces,
        &view.unit_view_direction(),
        view.cull_tolerance,
    );

    Ok(visible
        .iter()
        .map(|face| view.projection.project_face(face))
        .collect())
}
