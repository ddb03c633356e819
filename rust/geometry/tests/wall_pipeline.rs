// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-wall checks through the public API.

use approx::assert_relative_eq;
use axoplan_geometry::{
    depth_sort, render_wall, AxonometricProjection, CenterlineWall, FaceStyle, Point2, ViewConfig,
    WallVolume,
};

fn l_wall() -> CenterlineWall {
    CenterlineWall::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            Point2::new(4000.0, 3000.0),
        ],
        200.0,
        2700.0,
    )
}

#[test]
fn test_l_wall_has_mitred_outline() {
    let footprint = l_wall().footprint();

    // Three points per side plus the closing point
    assert_eq!(footprint.len(), 7);
    assert_eq!(footprint.first(), footprint.last());

    let volume = WallVolume::from_wall(&l_wall()).unwrap();
    assert_eq!(volume.faces.len(), 7);
    assert_eq!(volume.faces[0].style, FaceStyle::Top);
}

#[test]
fn test_only_viewer_facing_sides_survive() {
    let faces = render_wall(&l_wall(), &ViewConfig::default()).unwrap();

    assert!(!faces.is_empty());
    for face in &faces {
        assert!(matches!(face.style, FaceStyle::Right | FaceStyle::Front));
        assert_relative_eq!(face.depth, 1350.0, epsilon = 1e-9);
    }
}

#[test]
fn test_closed_room_wall() {
    let wall = CenterlineWall::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(5000.0, 0.0),
            Point2::new(5000.0, 4000.0),
            Point2::new(0.0, 4000.0),
            Point2::new(0.0, 0.0),
        ],
        250.0,
        3000.0,
    );

    let volume = WallVolume::from_wall(&wall).unwrap();
    let sides: Vec<_> = volume.faces.iter().skip(1).collect();
    assert!(sides.iter().all(|f| f.normal.z.abs() < 1e-9));
    assert!(render_wall(&wall, &ViewConfig::default()).is_ok());
}

#[test]
fn test_alternate_projection() {
    let view = ViewConfig {
        projection: AxonometricProjection::new(45.0, 45.0),
        ..ViewConfig::default()
    };
    let wall = CenterlineWall::straight(
        Point2::new(0.0, 0.0),
        Point2::new(1000.0, 0.0),
        100.0,
        1000.0,
    );

    let default_faces = render_wall(&wall, &ViewConfig::default()).unwrap();
    let faces = render_wall(&wall, &view).unwrap();

    assert_eq!(faces.len(), default_faces.len());
    assert_ne!(faces[0].vertices, default_faces[0].vertices);
    let half = 45f64.to_radians().cos();
    let p = faces[0].vertices[0];
    assert_relative_eq!(p.x, 1000.0 * half + 50.0 * half, epsilon = 1e-9);
}

#[test]
fn test_sorting_several_walls() {
    let mut faces = Vec::new();
    for (i, height) in [1000.0, 3000.0, 2000.0].iter().enumerate() {
        let x = i as f64 * 1000.0;
        let wall = CenterlineWall::straight(
            Point2::new(x, 0.0),
            Point2::new(x, 2000.0),
            100.0,
            *height,
        );
        faces.extend(render_wall(&wall, &ViewConfig::default()).unwrap());
    }

    let sorted = depth_sort(faces);
    let depths: Vec<_> = sorted.iter().map(|f| f.depth).collect();
    assert_eq!(depths, vec![1500.0, 1500.0, 1000.0, 1000.0, 500.0, 500.0]);
}
