// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-plan processing pipeline shared by the CLI and library callers.
//!
//! ```rust,ignore
//! use axoplan_processing::{repair_and_render, PipelineConfig};
//!
//! let output = repair_and_render(&record, &PipelineConfig::from_env())?;
//! for face in &output.rendered.faces {
//!     // draw back to front
//! }
//! ```

pub mod config;
pub mod error;
pub mod plan;
pub mod render;

pub use config::{PipelineConfig, DEFAULT_WALL_HEIGHT, DEFAULT_WALL_THICKNESS};
pub use error::{Error, Result};
pub use plan::{repair_and_render, PlanOutput};
pub use render::{render_walls, to_centerline_wall, RenderedPlan, SkippedWall};
