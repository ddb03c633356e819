// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strongly typed floor-plan record.
//!
//! Upstream extraction hands over loosely shaped JSON; [`crate::validate`]
//! and [`crate::repair`] work on that form. A repaired record always decodes
//! into [`FloorPlan`].

use axoplan_geometry::vector::{distance, polygon_area};
use axoplan_geometry::Bounds2;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::Result;

/// Structural role of a wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    Exterior,
    Interior,
    Structural,
    Partition,
}

impl WallType {
    pub const ALL: [WallType; 4] = [
        WallType::Exterior,
        WallType::Interior,
        WallType::Structural,
        WallType::Partition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallType::Exterior => "exterior",
            WallType::Interior => "interior",
            WallType::Structural => "structural",
            WallType::Partition => "partition",
        }
    }
}

impl FromStr for WallType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WallType::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// Kind of opening hosted by a wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    Door,
    Window,
    Opening,
}

impl OpeningType {
    pub const ALL: [OpeningType; 3] = [OpeningType::Door, OpeningType::Window, OpeningType::Opening];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningType::Door => "door",
            OpeningType::Window => "window",
            OpeningType::Opening => "opening",
        }
    }
}

impl FromStr for OpeningType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OpeningType::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// Straight wall between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wall {
    pub id: String,
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    pub thickness: f64,
    #[serde(rename = "type")]
    pub wall_type: WallType,
    /// Extrusion height, when the extraction step knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Wall {
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }
}

/// Room outline; the polygon repeats its first point at the end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    pub polygon: Vec<Point2<f64>>,
    pub area_m2: f64,
}

impl Room {
    /// Shoelace area of the outline
    pub fn computed_area(&self) -> f64 {
        polygon_area(&self.polygon)
    }
}

/// Door, window or plain opening at a fractional position along its wall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub id: String,
    #[serde(rename = "wallId")]
    pub wall_id: String,
    #[serde(rename = "type")]
    pub opening_type: OpeningType,
    /// 0.0 at the wall start, 1.0 at its end
    pub position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    pub scale: f64,
    pub bounds: Bounds2,
}

/// Complete floor-plan record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloorPlan {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub openings: Vec<Opening>,
    pub meta: Meta,
}

impl FloorPlan {
    /// Decode a well-formed (for example repaired) record
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// Plan position of an opening, interpolated along its host wall
    pub fn opening_location(&self, opening: &Opening) -> Option<Point2<f64>> {
        let wall = self.wall(&opening.wall_id)?;
        Some(wall.start + (wall.end - wall.start) * opening.position)
    }
}
