// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Properties every repaired record must satisfy, checked over a set of
//! deliberately messy inputs.

use axoplan_geometry::vector::{points_coincide, polygon_area};
use axoplan_topology::{repair, validate, FloorPlan};
use serde_json::{json, Value};

fn messy_records() -> Vec<Value> {
    vec![
        json!({
            "walls": [
                {"id": "w1", "start": [0, 0], "end": [10, 0], "thickness": 0.25, "type": "exterior"},
                {"id": "w2", "start": [10, 0], "end": [10, 0.02], "thickness": 0.25, "type": "exterior"},
                {"start": {"x": 10, "y": 0}, "end": {"x": 10, "y": 8}, "type": "load-bearing"},
                {"id": "w1", "start": [0, 8], "end": [10, 8], "thickness": "thick"},
                {"id": "w5", "start": [0, null], "end": [0, 8]}
            ],
            "rooms": [
                {"id": "r1", "polygon": [[0, 0], [10, 0], [10, 0.001], [10, 8], [0, 8], [0.05, 0.0]], "area_m2": 12},
                {"polygon": [[0, 0], [5, 5]]},
                {"id": "r3", "polygon": [[1, 1], [3, 1], [3, 3], [1, 3]]},
                {"id": "r4", "polygon": [[2, 2], [2, 2], [2, 2.001], [2, 2]]},
                42
            ],
            "openings": [
                {"id": "o1", "wallId": "w1", "type": "door", "position": -0.3},
                {"id": "o2", "wallId": "w2", "type": "window", "position": 0.5},
                {"id": "o3", "wallId": "wall-1", "type": "skylight", "position": "middle"},
                {"wallId": 7}
            ],
            "meta": {"scale": 0}
        }),
        json!({
            "rooms": [{"id": "lonely", "polygon": [[0, 0], [4, 0], [4, 0.02], [4, 3], [0, 3], [0.01, 0.01]]}]
        }),
        json!({"walls": "none", "rooms": null, "openings": {}, "meta": []}),
        json!({}),
        json!({
            "walls": [{"id": "a", "start": [-5, -5], "end": [5, 5], "thickness": 0.3, "type": "structural"}],
            "rooms": [{"id": "cw", "polygon": [[0, 0], [0, 4], [4, 4], [4, 0], [0, 0]], "area_m2": 16}],
            "openings": [{"id": "x", "wallId": "a", "type": "opening", "position": 0.5}],
            "meta": {"scale": 0.02, "bounds": {"minX": 0, "maxX": 1, "minY": 0, "maxY": 1}},
            "source": "vectorizer"
        }),
        json!({
            "walls": [
                {"id": "h1", "start": [0, 0], "end": [6, 0], "thickness": 0.2, "type": "exterior", "height": "2.7m"},
                {"id": "h2", "start": [6, 0], "end": [6, 4], "thickness": 0.2, "type": "exterior", "height": 3},
                {"id": "h3", "start": [6, 4], "end": [0, 4], "thickness": 0.2, "type": "exterior", "height": -1},
                {"id": "h4", "start": [0, 4], "end": [0, 0], "thickness": 0.2, "type": "exterior", "height": null}
            ],
            "rooms": [],
            "openings": [{"id": "d", "wallId": "h1", "type": "door", "position": 0.5}],
            "meta": {"scale": 0.01}
        }),
    ]
}

#[test]
fn test_repair_is_idempotent() {
    for record in messy_records() {
        let once = repair(&record);
        let twice = repair(&once);
        assert_eq!(once, twice, "input: {}", record);
    }
}

#[test]
fn test_repaired_rooms_are_closed_with_positive_area() {
    for record in messy_records() {
        let plan = FloorPlan::from_value(&repair(&record)).unwrap();
        for room in &plan.rooms {
            let first = room.polygon.first().unwrap();
            let last = room.polygon.last().unwrap();
            assert!(points_coincide(first, last, 0.01), "room {} is open", room.id);

            assert!(room.area_m2 > 0.0);
            assert!((room.area_m2 - polygon_area(&room.polygon)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_repaired_openings_reference_kept_walls() {
    for record in messy_records() {
        let plan = FloorPlan::from_value(&repair(&record)).unwrap();
        for opening in &plan.openings {
            assert!(plan.wall(&opening.wall_id).is_some());
            assert!((0.0..=1.0).contains(&opening.position));
        }
    }
}

#[test]
fn test_repaired_walls_meet_minimum_length() {
    for record in messy_records() {
        let plan = FloorPlan::from_value(&repair(&record)).unwrap();
        for wall in &plan.walls {
            assert!(wall.length() >= 0.05);
            assert!(wall.thickness > 0.0);
        }
    }
}

#[test]
fn test_repaired_records_pass_validation() {
    for record in messy_records() {
        let report = validate(&repair(&record));
        assert!(report.valid, "{:?}", report.errors);
    }
}

#[test]
fn test_first_record_survivors() {
    let plan = FloorPlan::from_value(&repair(&messy_records()[0])).unwrap();

    let wall_ids: Vec<_> = plan.walls.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(wall_ids, vec!["w1", "wall-1", "wall-2"]);

    let room_ids: Vec<_> = plan.rooms.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(room_ids, vec!["r1", "r3"]);

    let opening_ids: Vec<_> = plan.openings.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(opening_ids, vec!["o1", "o3"]);
    assert_eq!(plan.openings[0].position, 0.0);
    assert_eq!(plan.meta.scale, 0.01);
}

#[test]
fn test_unusable_heights_are_removed() {
    for record in messy_records() {
        let repaired = repair(&record);
        let plan = FloorPlan::from_value(&repaired).unwrap();
        for wall in &plan.walls {
            assert!(wall.height.map_or(true, |h| h.is_finite() && h > 0.0));
        }
    }

    let plan = FloorPlan::from_value(&repair(&messy_records()[5])).unwrap();
    let heights: Vec<_> = plan.walls.iter().map(|w| w.height).collect();
    assert_eq!(heights, vec![None, Some(3.0), None, None]);
    assert_eq!(plan.openings.len(), 1);
}
