// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient readers for loosely typed record fields.

use nalgebra::Point2;
use serde_json::{json, Value};

/// Reads `[x, y]` or `{ "x": .., "y": .. }` as a finite 2D point.
pub(crate) fn read_point(value: &Value) -> Option<Point2<f64>> {
    let (x, y) = match value {
        Value::Array(items) => match items.as_slice() {
            [x, y] => (x.as_f64()?, y.as_f64()?),
            _ => return None,
        },
        Value::Object(map) => (map.get("x")?.as_f64()?, map.get("y")?.as_f64()?),
        _ => return None,
    };

    (x.is_finite() && y.is_finite()).then(|| Point2::new(x, y))
}

pub(crate) fn point_value(p: &Point2<f64>) -> Value {
    json!([p.x, p.y])
}

/// A finite number strictly greater than zero.
pub(crate) fn positive_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Human-readable rendering of a JSON value for messages.
pub(crate) fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::String(s)) => format!("'{}'", s),
        Some(other) => other.to_string(),
    }
}
