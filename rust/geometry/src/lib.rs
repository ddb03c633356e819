// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axoplan Geometry
//!
//! Turns wall centerlines into projected, depth-sorted faces for an
//! axonometric line drawing:
//!
//! 1. [`offset`] - parallel boundaries at half the wall thickness
//! 2. [`footprint`] - closed counter-clockwise outline
//! 3. [`extrusion`] - top and side faces of the wall prism
//! 4. [`culling`] - drop faces turned away from the view
//! 5. [`projection`] - fixed 30°/30° parallel projection
//! 6. [`depth_sort`] - stable back-to-front order
//!
//! Every stage takes its inputs by reference or by value and returns new
//! data; nothing is modified in place.

pub mod culling;
pub mod depth_sort;
pub mod error;
pub mod extrusion;
pub mod face;
pub mod footprint;
pub mod offset;
pub mod pipeline;
pub mod projection;
pub mod vector;
pub mod view;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use culling::{cull_back_faces, is_front_facing};
pub use depth_sort::{depth_sort, depth_sort_with_tolerance, DEPTH_EPSILON};
pub use error::{Error, Result};
pub use extrusion::extrude_footprint;
pub use face::{AxonFace, Face, FaceStyle};
pub use footprint::{build_footprint, validate_footprint, FootprintValidity};
pub use offset::{is_closed_loop, offset_centerline, OffsetLines};
pub use pipeline::render_wall;
pub use projection::AxonometricProjection;
pub use vector::{Bounds2, POINT_EPSILON};
pub use view::{ViewConfig, CULL_TOLERANCE, DEFAULT_VIEW_DIRECTION};
pub use wall::{CenterlineWall, WallVolume};
