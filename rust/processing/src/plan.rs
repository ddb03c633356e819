// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Repair-then-render for whole floor-plan records.

use axoplan_topology::{repair_with_report, validate_with, FloorPlan, RepairReport, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::render::{render_walls, RenderedPlan};

/// Everything produced for one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanOutput {
    /// Diagnostics for the record as received
    pub validation: ValidationReport,
    /// The repaired record
    pub record: Value,
    pub repairs: RepairReport,
    pub rendered: RenderedPlan,
}

/// Validate, repair and render a record.
///
/// Validation is diagnostic only; rendering always runs on the repaired
/// record.
pub fn repair_and_render(record: &Value, config: &PipelineConfig) -> Result<PlanOutput> {
    let validation = validate_with(record, &config.validation);
    if !validation.valid {
        tracing::debug!(
            errors = validation.errors.len(),
            "Record has structural problems, repairing"
        );
    }

    let (repaired, repairs) = repair_with_report(record, &config.repair);
    if !repairs.is_clean() {
        tracing::info!(
            actions = repairs.actions.len(),
            dropped = repairs.dropped().count(),
            "Repaired floor plan"
        );
    }

    let plan = FloorPlan::from_value(&repaired)?;
    tracing::debug!(
        walls = plan.walls.len(),
        rooms = plan.rooms.len(),
        openings = plan.openings.len(),
        "Decoded floor plan"
    );

    let rendered = render_walls(&plan.walls, config);

    Ok(PlanOutput {
        validation,
        record: repaired,
        repairs,
        rendered,
    })
}
