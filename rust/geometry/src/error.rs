// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning walls into faces
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Footprint has {vertices} distinct vertices, at least 3 are required")]
    DegenerateFootprint { vertices: usize },

    #[error("Centerline has {points} points, at least 2 are required")]
    DegenerateCenterline { points: usize },

    #[error("Invalid extrusion height: {0}")]
    InvalidHeight(f64),
}
