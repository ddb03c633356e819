// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural validation of floor-plan records.
//!
//! The validator never fails and never stops at the first problem: every
//! violation is collected with the JSON path of the offending field. A stated
//! room area that disagrees with the polygon is only reported as a warning.

use axoplan_geometry::vector::{points_coincide, polygon_area, POINT_EPSILON};
use axoplan_geometry::Bounds2;
use nalgebra::Point2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::{describe, non_empty_str, positive_number, read_point};
use crate::record::{OpeningType, WallType};

/// Tolerances used by [`validate_with`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Closure tolerance as a fraction of the bounds width and height
    pub epsilon_ratio: f64,
    /// Lower limit of the tolerance, in plan units
    pub min_epsilon: f64,
    /// Relative difference between stated and computed room area that triggers a warning
    pub area_mismatch_ratio: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            epsilon_ratio: 0.01,
            min_epsilon: 0.01,
            area_mismatch_ratio: 0.01,
        }
    }
}

/// One problem found in a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    /// JSON path such as `walls[2].start`; empty for the record itself
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    /// Informational findings that do not affect `valid`
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a record with the default tolerances.
pub fn validate(record: &Value) -> ValidationReport {
    validate_with(record, &ValidationConfig::default())
}

pub fn validate_with(record: &Value, config: &ValidationConfig) -> ValidationReport {
    let mut validator = Validator::default();

    let Some(root) = record.as_object() else {
        validator.error(String::new(), "record must be an object");
        return validator.finish();
    };

    let walls = validator.array(root, "walls");
    let rooms = validator.array(root, "rooms");
    let openings = validator.array(root, "openings");

    let bounds = validator.bounds(root, walls, rooms);
    let epsilon = (config.epsilon_ratio * bounds.width())
        .max(config.epsilon_ratio * bounds.height())
        .max(config.min_epsilon);

    validator.meta(root);
    let wall_ids = validator.walls(walls, &bounds);
    validator.rooms(rooms, epsilon, config);
    validator.openings(openings, &wall_ids);

    validator.finish()
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    fn error(&mut self, path: String, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path,
            message: message.into(),
        });
    }

    fn warn(&mut self, path: String, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path,
            message: message.into(),
        });
    }

    fn finish(self) -> ValidationReport {
        ValidationReport {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    /// Required array member; reports and yields an empty slice otherwise
    fn array<'a>(&mut self, root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
        match root.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            other => {
                self.error(key.to_string(), format!("must be an array, found {}", describe(other)));
                &[]
            }
        }
    }

    /// Declared bounds, or the extent of all wall endpoints and room points
    fn bounds(&mut self, root: &Map<String, Value>, walls: &[Value], rooms: &[Value]) -> Bounds2 {
        if let Some(declared) = root.get("meta").and_then(|m| m.get("bounds")) {
            match declared_bounds(declared) {
                Some(bounds) => return bounds,
                None => self.error(
                    "meta.bounds".to_string(),
                    "must contain numeric minX <= maxX and minY <= maxY",
                ),
            }
        }

        let wall_points = walls.iter().flat_map(|w| {
            ["start", "end"]
                .into_iter()
                .filter_map(move |key| w.get(key).and_then(read_point))
        });
        let room_points = rooms.iter().flat_map(|r| {
            r.get("polygon")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(read_point)
        });
        let points: Vec<Point2<f64>> = wall_points.chain(room_points).collect();

        Bounds2::from_points(&points).unwrap_or_default()
    }

    fn meta(&mut self, root: &Map<String, Value>) {
        match root.get("meta") {
            Some(Value::Object(meta)) => {
                if positive_number(meta.get("scale")).is_none() {
                    self.error(
                        "meta.scale".to_string(),
                        format!("must be a positive number, found {}", describe(meta.get("scale"))),
                    );
                }
            }
            other => self.error("meta".to_string(), format!("must be an object, found {}", describe(other))),
        }
    }

    /// Checks every wall and returns the set of declared wall ids
    fn walls<'a>(&mut self, walls: &'a [Value], bounds: &Bounds2) -> FxHashSet<&'a str> {
        let mut ids = FxHashSet::default();

        for (i, wall) in walls.iter().enumerate() {
            let path = format!("walls[{}]", i);
            let Some(obj) = wall.as_object() else {
                self.error(path, "must be an object");
                continue;
            };

            match non_empty_str(obj.get("id")) {
                Some(id) => {
                    if !ids.insert(id) {
                        self.error(format!("{}.id", path), format!("duplicate wall id '{}'", id));
                    }
                }
                None => self.error(
                    format!("{}.id", path),
                    format!("must be a non-empty string, found {}", describe(obj.get("id"))),
                ),
            }

            for key in ["start", "end"] {
                let field = format!("{}.{}", path, key);
                match obj.get(key).and_then(read_point) {
                    Some(p) if !bounds.contains(&p, POINT_EPSILON) => self.error(
                        field,
                        format!("point ({}, {}) lies outside the plan bounds", p.x, p.y),
                    ),
                    Some(_) => {}
                    None => self.error(field, "must be a finite 2D point"),
                }
            }

            if positive_number(obj.get("thickness")).is_none() {
                self.error(
                    format!("{}.thickness", path),
                    format!("must be a positive number, found {}", describe(obj.get("thickness"))),
                );
            }

            if let Some(height) = obj.get("height") {
                if positive_number(Some(height)).is_none() {
                    self.error(
                        format!("{}.height", path),
                        format!(
                            "must be a positive number when present, found {}",
                            describe(Some(height))
                        ),
                    );
                }
            }

            let type_ok = obj
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t.parse::<WallType>().is_ok());
            if !type_ok {
                self.error(
                    format!("{}.type", path),
                    format!(
                        "must be one of exterior, interior, structural, partition; found {}",
                        describe(obj.get("type"))
                    ),
                );
            }
        }

        ids
    }

    fn rooms(&mut self, rooms: &[Value], epsilon: f64, config: &ValidationConfig) {
        for (i, room) in rooms.iter().enumerate() {
            let path = format!("rooms[{}]", i);
            let Some(obj) = room.as_object() else {
                self.error(path, "must be an object");
                continue;
            };

            if non_empty_str(obj.get("id")).is_none() {
                self.error(
                    format!("{}.id", path),
                    format!("must be a non-empty string, found {}", describe(obj.get("id"))),
                );
            }

            let polygon_path = format!("{}.polygon", path);
            let Some(raw) = obj.get("polygon").and_then(Value::as_array) else {
                self.error(polygon_path, "must be an array of points");
                continue;
            };

            let mut polygon = Vec::with_capacity(raw.len());
            for (j, value) in raw.iter().enumerate() {
                match read_point(value) {
                    Some(p) => polygon.push(p),
                    None => self.error(format!("{}[{}]", polygon_path, j), "must be a finite 2D point"),
                }
            }

            if polygon.len() < 3 {
                self.error(
                    polygon_path,
                    format!("must have at least 3 points, found {}", polygon.len()),
                );
                continue;
            }

            let first = polygon[0];
            let last = polygon[polygon.len() - 1];
            if !points_coincide(&first, &last, epsilon) {
                self.error(
                    polygon_path.clone(),
                    format!("is not closed: first and last points are more than {} apart", epsilon),
                );
            }

            let area = polygon_area(&polygon);
            if area <= 0.0 {
                self.error(polygon_path, "has zero area");
                continue;
            }

            let area_path = format!("{}.area_m2", path);
            match obj.get("area_m2").and_then(Value::as_f64) {
                Some(stated) if (stated - area).abs() > config.area_mismatch_ratio * area => self.warn(
                    area_path,
                    format!("stated area {} differs from polygon area {}", stated, area),
                ),
                Some(_) => {}
                None => self.warn(area_path, "is missing; polygon area is used instead"),
            }
        }
    }

    fn openings(&mut self, openings: &[Value], wall_ids: &FxHashSet<&str>) {
        for (i, opening) in openings.iter().enumerate() {
            let path = format!("openings[{}]", i);
            let Some(obj) = opening.as_object() else {
                self.error(path, "must be an object");
                continue;
            };

            if non_empty_str(obj.get("id")).is_none() {
                self.error(
                    format!("{}.id", path),
                    format!("must be a non-empty string, found {}", describe(obj.get("id"))),
                );
            }

            match obj.get("wallId").and_then(Value::as_str) {
                Some(wall_id) if wall_ids.contains(wall_id) => {}
                Some(wall_id) => self.error(
                    format!("{}.wallId", path),
                    format!("references unknown wall '{}'", wall_id),
                ),
                None => self.error(format!("{}.wallId", path), "must be a wall id string"),
            }

            let type_ok = obj
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t.parse::<OpeningType>().is_ok());
            if !type_ok {
                self.error(
                    format!("{}.type", path),
                    format!("must be one of door, window, opening; found {}", describe(obj.get("type"))),
                );
            }

            match obj.get("position").and_then(Value::as_f64) {
                Some(position) if (0.0..=1.0).contains(&position) => {}
                other => self.error(
                    format!("{}.position", path),
                    format!(
                        "must be a number between 0 and 1, found {}",
                        other.map_or_else(|| describe(obj.get("position")), |p| p.to_string())
                    ),
                ),
            }
        }
    }
}

fn declared_bounds(value: &Value) -> Option<Bounds2> {
    let read = |key: &str| value.get(key).and_then(Value::as_f64);
    let bounds = Bounds2::new(read("minX")?, read("maxX")?, read("minY")?, read("maxY")?);
    (bounds.is_finite() && bounds.min_x <= bounds.max_x && bounds.min_y <= bounds.max_y).then_some(bounds)
}
