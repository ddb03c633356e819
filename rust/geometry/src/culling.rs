// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Back-face culling against the fixed view direction

use crate::face::Face;
use nalgebra::Vector3;

/// True when the face is visible from `view_direction` (unit length).
///
/// Faces almost perpendicular to the view are kept so they do not flicker in
/// and out between walls.
#[inline]
pub fn is_front_facing(face: &Face, view_direction: &Vector3<f64>, tolerance: f64) -> bool {
    face.normal.dot(view_direction) > -tolerance
}

/// Keep only the faces visible from `view_direction`
pub fn cull_back_faces(faces: Vec<Face>, view_direction: &Vector3<f64>, tolerance: f64) -> Vec<Face> {
    faces
        .into_iter()
        .filter(|face| is_front_facing(face, view_direction, tolerance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceStyle;
    use crate::view::{ViewConfig, CULL_TOLERANCE};
    use nalgebra::Point3;

    fn face_with_normal(normal: Vector3<f64>) -> Face {
        Face::new(vec![Point3::origin(); 3], normal)
    }

    #[test]
    fn test_default_view_keeps_plus_x_plus_y_minus_z() {
        let view = ViewConfig::default().unit_view_direction();
        let faces = vec![
            face_with_normal(Vector3::x()),
            face_with_normal(-Vector3::x()),
            face_with_normal(Vector3::y()),
            face_with_normal(-Vector3::y()),
            face_with_normal(Vector3::z()),
            face_with_normal(-Vector3::z()),
        ];

        let kept = cull_back_faces(faces, &view, CULL_TOLERANCE);
        let styles: Vec<_> = kept.iter().map(|f| f.style).collect();
        assert_eq!(styles, vec![FaceStyle::Right, FaceStyle::Front, FaceStyle::Back]);
    }

    #[test]
    fn test_perpendicular_face_is_kept() {
        let view = Vector3::new(1.0, 0.0, 0.0);
        let grazing = face_with_normal(Vector3::new(-1e-9, 1.0, 0.0).normalize());
        assert!(is_front_facing(&grazing, &view, CULL_TOLERANCE));

        let behind = face_with_normal(Vector3::new(-1e-3, 1.0, 0.0).normalize());
        assert!(!is_front_facing(&behind, &view, CULL_TOLERANCE));
    }

    #[test]
    fn test_zero_view_direction_falls_back() {
        let config = ViewConfig {
            view_direction: Vector3::zeros(),
            ..ViewConfig::default()
        };
        assert_eq!(
            config.unit_view_direction(),
            ViewConfig::default().unit_view_direction()
        );
    }
}
