// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration: defaults, JSON files and environment overrides.

use axoplan_geometry::ViewConfig;
use axoplan_topology::{RepairConfig, ValidationConfig};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Wall height used when a wall does not carry one (mm)
pub const DEFAULT_WALL_HEIGHT: f64 = 2700.0;

/// Wall thickness used when a wall's own thickness is unusable (mm)
pub const DEFAULT_WALL_THICKNESS: f64 = 200.0;

/// Settings for the repair-then-render pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    pub default_height: f64,
    pub default_thickness: f64,
    /// Multiplier from plan units to model units, applied to wall endpoints
    /// and thicknesses before extrusion
    pub unit_scale: f64,
    pub view: ViewConfig,
    pub repair: RepairConfig,
    pub validation: ValidationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_WALL_HEIGHT,
            default_thickness: DEFAULT_WALL_THICKNESS,
            unit_scale: 1.0,
            view: ViewConfig::default(),
            repair: RepairConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `AXOPLAN_*` overrides read through `lookup`. Values that do not
    /// parse as numbers are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(height) = number("AXOPLAN_DEFAULT_HEIGHT") {
            self.default_height = height;
        }
        if let Some(thickness) = number("AXOPLAN_DEFAULT_THICKNESS") {
            self.default_thickness = thickness;
        }
        if let Some(scale) = number("AXOPLAN_UNIT_SCALE") {
            self.unit_scale = scale;
        }
        if let Some(alpha) = number("AXOPLAN_AXON_ALPHA") {
            self.view.projection.alpha_deg = alpha;
        }
        if let Some(beta) = number("AXOPLAN_AXON_BETA") {
            self.view.projection.beta_deg = beta;
        }

        self
    }
}
