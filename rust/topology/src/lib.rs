// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Axoplan Topology
//!
//! Structural checks and heuristic cleanup for floor-plan records produced by
//! an upstream extraction step.
//!
//! Records arrive as loosely shaped JSON (`walls`, `rooms`, `openings`,
//! `meta`), so both entry points take a [`serde_json::Value`]:
//!
//! - [`validate`] reports every invariant violation with its JSON path.
//! - [`repair`] drops or defaults whatever is broken and returns a record
//!   that always decodes into [`FloorPlan`].
//!
//! Neither function fails.

pub mod error;
mod json;
pub mod record;
pub mod repair;
pub mod validate;

pub use error::{Error, Result};
pub use record::{FloorPlan, Meta, Opening, OpeningType, Room, Wall, WallType};
pub use repair::{
    repair, repair_with, repair_with_report, DropReason, RepairAction, RepairConfig, RepairReport,
};
pub use validate::{validate, validate_with, ValidationConfig, ValidationIssue, ValidationReport};
