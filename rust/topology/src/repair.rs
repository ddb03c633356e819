// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-effort cleanup of extracted floor-plan records.
//!
//! Repair never fails. Elements that cannot be salvaged are dropped, missing
//! or invalid fields get defaults, and every such decision is listed in the
//! [`RepairReport`] returned by [`repair_with_report`]. Repairing a repaired
//! record returns it unchanged.

use axoplan_geometry::vector::{distance, points_coincide, polygon_area};
use axoplan_geometry::Bounds2;
use nalgebra::Point2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::json::{non_empty_str, point_value, positive_number, read_point};
use crate::record::{OpeningType, WallType};

/// Thresholds and defaults used by [`repair_with_report`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RepairConfig {
    /// Walls shorter than this are dropped
    pub min_wall_length: f64,
    pub default_thickness: f64,
    pub default_scale: f64,
    /// Opening position used when none is given
    pub default_position: f64,
    /// Point-merge tolerance as a fraction of the plan diagonal
    pub epsilon_ratio: f64,
    /// Lower limit of the point-merge tolerance
    pub min_epsilon: f64,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            min_wall_length: 0.05,
            default_thickness: 0.25,
            default_scale: 0.01,
            default_position: 0.5,
            epsilon_ratio: 0.01,
            min_epsilon: 0.01,
        }
    }
}

/// Why an element was removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    NotAnObject,
    InvalidEndpoints,
    TooShort { length: f64 },
    DegeneratePolygon,
    MissingWallId,
    UnknownWall { wall_id: String },
}

/// A single change made while repairing. Paths index into the input record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RepairAction {
    Dropped { path: String, reason: DropReason },
    GeneratedId { path: String, id: String },
    Defaulted { path: String, value: Value },
    Clamped { path: String, from: f64, to: f64 },
    CleanedPolygon { path: String, removed_points: usize, closed: bool },
    RecomputedArea { path: String, from: Option<f64>, to: f64 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepairReport {
    pub actions: Vec<RepairAction>,
}

impl RepairReport {
    /// Nothing had to change
    pub fn is_clean(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn dropped(&self) -> impl Iterator<Item = (&str, &DropReason)> {
        self.actions.iter().filter_map(|a| match a {
            RepairAction::Dropped { path, reason } => Some((path.as_str(), reason)),
            _ => None,
        })
    }
}

/// Repair with default thresholds, discarding the report.
pub fn repair(record: &Value) -> Value {
    repair_with_report(record, &RepairConfig::default()).0
}

pub fn repair_with(record: &Value, config: &RepairConfig) -> Value {
    repair_with_report(record, config).0
}

/// Repair a record and list what was changed.
///
/// A value that is not a JSON object is returned as is.
pub fn repair_with_report(record: &Value, config: &RepairConfig) -> (Value, RepairReport) {
    let Some(root) = record.as_object() else {
        return (record.clone(), RepairReport::default());
    };

    let mut repairer = Repairer {
        config,
        report: RepairReport::default(),
    };

    let walls = repairer.walls(root.get("walls"));
    let epsilon = repairer.epsilon(&walls, root.get("rooms"));
    let rooms = repairer.rooms(root.get("rooms"), epsilon);
    let openings = repairer.openings(root.get("openings"), &walls);
    let meta = repairer.meta(root.get("meta"), &walls, &rooms);

    let mut repaired = root.clone();
    repaired.insert("walls".to_string(), into_array(walls));
    repaired.insert("rooms".to_string(), into_array(rooms));
    repaired.insert("openings".to_string(), into_array(openings));
    repaired.insert("meta".to_string(), Value::Object(meta));

    (Value::Object(repaired), repairer.report)
}

/// An element that survived repair
struct Kept {
    /// Position in the input array
    index: usize,
    id: Option<String>,
    /// Plan points (wall endpoints or the cleaned room ring)
    points: Vec<Point2<f64>>,
    fields: Map<String, Value>,
}

fn into_array(kept: Vec<Kept>) -> Value {
    Value::Array(kept.into_iter().map(|k| Value::Object(k.fields)).collect())
}

fn entries(section: Option<&Value>) -> &[Value] {
    section
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

struct Repairer<'c> {
    config: &'c RepairConfig,
    report: RepairReport,
}

impl Repairer<'_> {
    fn drop(&mut self, path: String, reason: DropReason) {
        self.report.actions.push(RepairAction::Dropped { path, reason });
    }

    fn defaulted(&mut self, path: String, value: Value) {
        self.report.actions.push(RepairAction::Defaulted { path, value });
    }

    fn walls(&mut self, section: Option<&Value>) -> Vec<Kept> {
        let mut kept = Vec::new();

        for (index, wall) in entries(section).iter().enumerate() {
            let path = format!("walls[{}]", index);
            let Some(obj) = wall.as_object() else {
                self.drop(path, DropReason::NotAnObject);
                continue;
            };

            let endpoints = obj
                .get("start")
                .and_then(read_point)
                .zip(obj.get("end").and_then(read_point));
            let Some((start, end)) = endpoints else {
                self.drop(path, DropReason::InvalidEndpoints);
                continue;
            };

            let length = distance(&start, &end);
            if length < self.config.min_wall_length {
                self.drop(path, DropReason::TooShort { length });
                continue;
            }

            let mut fields = obj.clone();
            fields.insert("start".to_string(), point_value(&start));
            fields.insert("end".to_string(), point_value(&end));

            let thickness = positive_number(obj.get("thickness")).unwrap_or_else(|| {
                self.defaulted(format!("{}.thickness", path), json!(self.config.default_thickness));
                self.config.default_thickness
            });
            fields.insert("thickness".to_string(), json!(thickness));

            let wall_type = obj
                .get("type")
                .and_then(Value::as_str)
                .and_then(|t| t.parse::<WallType>().ok())
                .unwrap_or_else(|| {
                    self.defaulted(format!("{}.type", path), json!(WallType::Interior.as_str()));
                    WallType::Interior
                });
            fields.insert("type".to_string(), json!(wall_type.as_str()));

            // Unusable heights are removed so the pipeline default applies
            if obj.contains_key("height") && positive_number(obj.get("height")).is_none() {
                fields.remove("height");
                self.defaulted(format!("{}.height", path), Value::Null);
            }

            kept.push(Kept {
                index,
                id: non_empty_str(obj.get("id")).map(str::to_string),
                points: vec![start, end],
                fields,
            });
        }

        self.assign_ids("wall", "walls", &mut kept);
        kept
    }

    /// Merge tolerance from the extent of the kept walls, or of the raw room
    /// points when there are no walls
    fn epsilon(&self, walls: &[Kept], rooms: Option<&Value>) -> f64 {
        let bounds = Bounds2::from_points(walls.iter().flat_map(|w| w.points.iter()))
            .or_else(|| {
                let points: Vec<Point2<f64>> = entries(rooms)
                    .iter()
                    .filter_map(|r| r.get("polygon").and_then(Value::as_array))
                    .flatten()
                    .filter_map(read_point)
                    .collect();
                Bounds2::from_points(&points)
            });

        bounds
            .map_or(0.0, |b| b.diagonal() * self.config.epsilon_ratio)
            .max(self.config.min_epsilon)
    }

    fn rooms(&mut self, section: Option<&Value>, epsilon: f64) -> Vec<Kept> {
        let mut kept = Vec::new();

        for (index, room) in entries(section).iter().enumerate() {
            let path = format!("rooms[{}]", index);
            let Some(obj) = room.as_object() else {
                self.drop(path, DropReason::NotAnObject);
                continue;
            };

            let raw = entries(obj.get("polygon"));
            let points: Vec<Point2<f64>> = raw.iter().filter_map(read_point).collect();

            let Some(cleaned) = clean_ring(&points, epsilon) else {
                self.drop(path, DropReason::DegeneratePolygon);
                continue;
            };

            let removed_points = (raw.len() + usize::from(!cleaned.was_closed))
                .saturating_sub(cleaned.ring.len());
            if cleaned.ring != points || points.len() != raw.len() {
                self.report.actions.push(RepairAction::CleanedPolygon {
                    path: format!("{}.polygon", path),
                    removed_points,
                    closed: !cleaned.was_closed,
                });
            }

            let stated = obj.get("area_m2").and_then(Value::as_f64);
            if stated != Some(cleaned.area) {
                self.report.actions.push(RepairAction::RecomputedArea {
                    path: format!("{}.area_m2", path),
                    from: stated,
                    to: cleaned.area,
                });
            }

            let mut fields = obj.clone();
            fields.insert(
                "polygon".to_string(),
                Value::Array(cleaned.ring.iter().map(point_value).collect()),
            );
            fields.insert("area_m2".to_string(), json!(cleaned.area));

            kept.push(Kept {
                index,
                id: non_empty_str(obj.get("id")).map(str::to_string),
                points: cleaned.ring,
                fields,
            });
        }

        self.assign_ids("room", "rooms", &mut kept);
        kept
    }

    fn openings(&mut self, section: Option<&Value>, walls: &[Kept]) -> Vec<Kept> {
        let wall_ids: FxHashSet<&str> = walls.iter().filter_map(|w| w.id.as_deref()).collect();
        let mut kept = Vec::new();

        for (index, opening) in entries(section).iter().enumerate() {
            let path = format!("openings[{}]", index);
            let Some(obj) = opening.as_object() else {
                self.drop(path, DropReason::NotAnObject);
                continue;
            };

            match obj.get("wallId").and_then(Value::as_str) {
                Some(wall_id) if wall_ids.contains(wall_id) => {}
                Some(wall_id) => {
                    let wall_id = wall_id.to_string();
                    self.drop(path, DropReason::UnknownWall { wall_id });
                    continue;
                }
                None => {
                    self.drop(path, DropReason::MissingWallId);
                    continue;
                }
            }

            let mut fields = obj.clone();

            let position = match obj.get("position").and_then(Value::as_f64) {
                Some(raw) => {
                    let clamped = raw.clamp(0.0, 1.0);
                    if clamped != raw {
                        self.report.actions.push(RepairAction::Clamped {
                            path: format!("{}.position", path),
                            from: raw,
                            to: clamped,
                        });
                    }
                    clamped
                }
                None => {
                    self.defaulted(format!("{}.position", path), json!(self.config.default_position));
                    self.config.default_position
                }
            };
            fields.insert("position".to_string(), json!(position));

            let opening_type = obj
                .get("type")
                .and_then(Value::as_str)
                .and_then(|t| t.parse::<OpeningType>().ok())
                .unwrap_or_else(|| {
                    self.defaulted(format!("{}.type", path), json!(OpeningType::Opening.as_str()));
                    OpeningType::Opening
                });
            fields.insert("type".to_string(), json!(opening_type.as_str()));

            kept.push(Kept {
                index,
                id: non_empty_str(obj.get("id")).map(str::to_string),
                points: Vec::new(),
                fields,
            });
        }

        self.assign_ids("opening", "openings", &mut kept);
        kept
    }

    fn meta(&mut self, section: Option<&Value>, walls: &[Kept], rooms: &[Kept]) -> Map<String, Value> {
        let mut meta = section.and_then(Value::as_object).cloned().unwrap_or_default();

        let scale = positive_number(meta.get("scale")).unwrap_or_else(|| {
            self.defaulted("meta.scale".to_string(), json!(self.config.default_scale));
            self.config.default_scale
        });
        meta.insert("scale".to_string(), json!(scale));

        let bounds = Bounds2::from_points(walls.iter().chain(rooms).flat_map(|k| k.points.iter()))
            .unwrap_or_default();
        meta.insert(
            "bounds".to_string(),
            json!({
                "minX": bounds.min_x,
                "maxX": bounds.max_x,
                "minY": bounds.min_y,
                "maxY": bounds.max_y,
            }),
        );

        meta
    }

    /// The first element claiming an id keeps it; the rest get `{prefix}-N`.
    fn assign_ids(&mut self, prefix: &str, section: &str, kept: &mut [Kept]) {
        let mut taken: FxHashSet<String> = FxHashSet::default();
        let mut missing = Vec::new();

        for (k, entry) in kept.iter().enumerate() {
            match &entry.id {
                Some(id) if taken.insert(id.clone()) => {}
                _ => missing.push(k),
            }
        }

        let mut counter = 0;
        for k in missing {
            let id = loop {
                counter += 1;
                let candidate = format!("{}-{}", prefix, counter);
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(id.clone());

            let entry = &mut kept[k];
            self.report.actions.push(RepairAction::GeneratedId {
                path: format!("{}[{}].id", section, entry.index),
                id: id.clone(),
            });
            entry.fields.insert("id".to_string(), Value::String(id.clone()));
            entry.id = Some(id);
        }
    }
}

struct CleanRing {
    /// Closed ring, last point equal to the first
    ring: Vec<Point2<f64>>,
    area: f64,
    was_closed: bool,
}

/// Collapse consecutive near-duplicates and close the ring exactly.
///
/// A ring whose ends already lie within `epsilon` has its last point replaced
/// by an exact copy of the first. Returns `None` when fewer than three
/// distinct points or no area remain.
fn clean_ring(points: &[Point2<f64>], epsilon: f64) -> Option<CleanRing> {
    let was_closed = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => points_coincide(first, last, epsilon),
        _ => false,
    };

    let mut ring: Vec<Point2<f64>> = Vec::with_capacity(points.len() + 1);
    for p in points {
        if ring.last().map_or(true, |q| !points_coincide(q, p, epsilon)) {
            ring.push(*p);
        }
    }

    while ring.len() > 1 && points_coincide(&ring[0], &ring[ring.len() - 1], epsilon) {
        ring.pop();
    }

    if ring.len() < 3 {
        return None;
    }

    let area = polygon_area(&ring);
    if area <= 0.0 {
        return None;
    }

    ring.push(ring[0]);
    Some(CleanRing {
        ring,
        area,
        was_closed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FloorPlan;
    use approx::assert_relative_eq;

    fn wall(id: &str, start: [f64; 2], end: [f64; 2]) -> Value {
        json!({"id": id, "start": start, "end": end, "thickness": 0.25, "type": "exterior"})
    }

    #[test]
    fn test_duplicate_room_point_is_collapsed() {
        let record = json!({
            "walls": [],
            "rooms": [{"id": "r1", "polygon": [[0, 0], [10, 0], [10, 0], [0, 8], [0, 0]], "area_m2": 80}],
            "openings": [],
            "meta": {"scale": 0.01}
        });

        let repaired = repair(&record);
        let room = &repaired["rooms"][0];
        assert_eq!(room["polygon"], json!([[0.0, 0.0], [10.0, 0.0], [0.0, 8.0], [0.0, 0.0]]));
        assert_relative_eq!(room["area_m2"].as_f64().unwrap(), 40.0);
    }

    #[test]
    fn test_short_wall_dropped() {
        let record = json!({
            "walls": [wall("tiny", [0.0, 0.0], [0.01, 0.0]), wall("long", [0.0, 0.0], [10.0, 0.0])],
            "rooms": [],
            "openings": [],
            "meta": {"scale": 0.01}
        });

        let (repaired, report) = repair_with_report(&record, &RepairConfig::default());
        let walls = repaired["walls"].as_array().unwrap();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0]["id"], "long");

        let dropped: Vec<_> = report.dropped().collect();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].0, "walls[0]");
        assert!(matches!(dropped[0].1, DropReason::TooShort { .. }));
    }

    #[test]
    fn test_bad_height_removed() {
        let mut bad = wall("w1", [0.0, 0.0], [10.0, 0.0]);
        bad["height"] = json!("2.7m");
        let mut good = wall("w2", [0.0, 0.0], [0.0, 8.0]);
        good["height"] = json!(3.0);
        let record = json!({"walls": [bad, good], "rooms": [], "openings": []});

        let (repaired, report) = repair_with_report(&record, &RepairConfig::default());
        let walls = repaired["walls"].as_array().unwrap();
        assert!(walls[0].get("height").is_none());
        assert_eq!(walls[1]["height"], json!(3.0));
        assert!(report.actions.contains(&RepairAction::Defaulted {
            path: "walls[0].height".to_string(),
            value: Value::Null,
        }));

        let plan = FloorPlan::from_value(&repaired).unwrap();
        assert_eq!(plan.walls[0].height, None);
        assert_eq!(plan.walls[1].height, Some(3.0));
    }

    #[test]
    fn test_wall_defaults() {
        let record = json!({
            "walls": [
                {"start": [0, 0], "end": [5, 0], "thickness": -2, "type": "glass"},
                {"id": "a", "start": [0, 0], "end": [0, 5]},
                {"id": "a", "start": [5, 0], "end": [5, 5], "thickness": 0.1, "type": "partition"},
                {"id": "b", "start": [0, "bad"], "end": [5, 5]},
                "not a wall"
            ]
        });

        let repaired = repair(&record);
        let walls = repaired["walls"].as_array().unwrap();
        assert_eq!(walls.len(), 3);

        assert_eq!(walls[0]["id"], "wall-1");
        assert_eq!(walls[0]["thickness"], json!(0.25));
        assert_eq!(walls[0]["type"], "interior");
        assert_eq!(walls[1]["id"], "a");
        // Duplicate id gets a fresh one
        assert_eq!(walls[2]["id"], "wall-2");
        assert_eq!(walls[2]["type"], "partition");
    }

    #[test]
    fn test_generated_ids_skip_taken_ones() {
        let record = json!({
            "walls": [
                {"start": [0, 0], "end": [5, 0]},
                {"id": "wall-1", "start": [0, 0], "end": [0, 5]}
            ]
        });

        let repaired = repair(&record);
        assert_eq!(repaired["walls"][0]["id"], "wall-2");
        assert_eq!(repaired["walls"][1]["id"], "wall-1");
    }

    #[test]
    fn test_room_closure_and_drop() {
        let record = json!({
            "walls": [wall("w1", [0.0, 0.0], [10.0, 0.0]), wall("w2", [10.0, 0.0], [10.0, 8.0])],
            "rooms": [
                {"id": "open", "polygon": [[0, 0], [10, 0], [10, 8], [0, 8]]},
                {"id": "nearly", "polygon": [[0, 0], [10, 0], [10, 8], [0, 8], [0.001, 0.001]], "area_m2": 80},
                {"id": "line", "polygon": [[0, 0], [5, 0], [10, 0], [0, 0]], "area_m2": 3},
                {"polygon": "nope"}
            ]
        });

        let (repaired, report) = repair_with_report(&record, &RepairConfig::default());
        let rooms = repaired["rooms"].as_array().unwrap();
        assert_eq!(rooms.len(), 2);

        let expected = json!([[0.0, 0.0], [10.0, 0.0], [10.0, 8.0], [0.0, 8.0], [0.0, 0.0]]);
        assert_eq!(rooms[0]["polygon"], expected);
        assert_eq!(rooms[1]["polygon"], expected);
        assert_eq!(rooms[0]["area_m2"], json!(80.0));

        assert!(report.actions.contains(&RepairAction::CleanedPolygon {
            path: "rooms[0].polygon".to_string(),
            removed_points: 0,
            closed: true,
        }));
        assert_eq!(report.dropped().count(), 2);
    }

    #[test]
    fn test_openings_follow_kept_walls() {
        let record = json!({
            "walls": [wall("w1", [0.0, 0.0], [10.0, 0.0]), wall("gone", [0.0, 0.0], [0.0, 0.001])],
            "openings": [
                {"id": "o1", "wallId": "w1", "type": "door", "position": 1.7},
                {"id": "o2", "wallId": "gone", "type": "window", "position": 0.2},
                {"wallId": "w1", "type": "hatch"},
                {"id": "o4", "type": "door", "position": 0.3}
            ]
        });

        let (repaired, report) = repair_with_report(&record, &RepairConfig::default());
        let openings = repaired["openings"].as_array().unwrap();
        assert_eq!(openings.len(), 2);

        assert_eq!(openings[0]["position"], json!(1.0));
        assert_eq!(openings[1]["id"], "opening-1");
        assert_eq!(openings[1]["position"], json!(0.5));
        assert_eq!(openings[1]["type"], "opening");

        let reasons: Vec<_> = report.dropped().map(|(_, r)| r.clone()).collect();
        assert_eq!(reasons.len(), 3);
        assert!(matches!(reasons[0], DropReason::TooShort { .. }));
        assert_eq!(reasons[1], DropReason::UnknownWall { wall_id: "gone".to_string() });
        assert_eq!(reasons[2], DropReason::MissingWallId);
    }

    #[test]
    fn test_meta_defaults_and_bounds() {
        let record = json!({
            "walls": [wall("w1", [1.0, 2.0], [6.0, 2.0])],
            "rooms": [{"id": "r", "polygon": [[0, 0], [4, 0], [4, 9], [0, 0]]}],
            "meta": {"scale": -1, "bounds": {"minX": -100, "maxX": 100, "minY": -100, "maxY": 100}, "source": "scan"}
        });

        let repaired = repair(&record);
        assert_eq!(repaired["meta"]["scale"], json!(0.01));
        assert_eq!(repaired["meta"]["source"], "scan");
        assert_eq!(
            repaired["meta"]["bounds"],
            json!({"minX": 0.0, "maxX": 6.0, "minY": 0.0, "maxY": 9.0})
        );
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(repair(&json!("plan")), json!("plan"));
        assert_eq!(repair(&Value::Null), Value::Null);

        let repaired = repair(&json!({"walls": 3}));
        assert_eq!(repaired["walls"], json!([]));
        assert_eq!(repaired["rooms"], json!([]));
        assert_eq!(repaired["openings"], json!([]));
        assert_eq!(repaired["meta"]["scale"], json!(0.01));
        assert_eq!(
            repaired["meta"]["bounds"],
            json!({"minX": 0.0, "maxX": 0.0, "minY": 0.0, "maxY": 0.0})
        );
    }

    #[test]
    fn test_clean_record_reports_nothing() {
        let record = json!({
            "walls": [wall("w1", [0.0, 0.0], [10.0, 0.0])],
            "rooms": [{"id": "r1", "polygon": [[0.0, 0.0], [10.0, 0.0], [10.0, 8.0], [0.0, 8.0], [0.0, 0.0]], "area_m2": 80.0}],
            "openings": [{"id": "o1", "wallId": "w1", "type": "window", "position": 0.5}],
            "meta": {"scale": 0.01, "bounds": {"minX": 0.0, "maxX": 10.0, "minY": 0.0, "maxY": 8.0}}
        });

        let (repaired, report) = repair_with_report(&record, &RepairConfig::default());
        assert!(report.is_clean(), "{:?}", report.actions);
        assert_eq!(repaired, record);
    }
}
