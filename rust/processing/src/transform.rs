// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-level affine coordinate transform
//!
//! Maps a level's native coordinates into the shared drawing space:
//! translation + rotation + independent X/Y scale, applied as one combined
//! linear map. Invalid transforms (zero scale, non-finite parameters,
//! rotation outside ±360°) are never applied; callers fall back to the
//! identity.

use serde::{Deserialize, Serialize};
use sxf_lite_core::{Geometry, LocateDeclaration, Point2};

/// Affine transform declared by a `sfig_locate_feature` record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub rotation_degrees: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl LevelTransform {
    /// The no-op transform used for the paper level and as the fallback
    /// for unmatched or invalid declarations.
    pub const fn identity() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            rotation_degrees: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Validation guard: all five parameters finite, both scales non-zero,
    /// rotation within ±360°.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.rotation_degrees.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.scale_x != 0.0
            && self.scale_y != 0.0
            && self.rotation_degrees.abs() <= 360.0
    }

    /// Map a native point into drawing space.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let theta = self.rotation_degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        (
            self.origin_x + self.scale_x * x * cos - self.scale_y * y * sin,
            self.origin_y + self.scale_x * x * sin + self.scale_y * y * cos,
        )
    }

    /// Map a drawing-space point back to native coordinates.
    ///
    /// Exact inverse of [`apply`](Self::apply) for any valid transform; not
    /// used by the forward ingestion pipeline.
    #[inline]
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let theta = self.rotation_degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        // Inverse rotation is the transpose, then undo the per-axis scale
        (
            (dx * cos + dy * sin) / self.scale_x,
            (-dx * sin + dy * cos) / self.scale_y,
        )
    }

    #[inline]
    pub fn apply_point(&self, p: Point2) -> Point2 {
        let (x, y) = self.apply(p.x, p.y);
        Point2::new(x, y)
    }

    /// Transform every coordinate-bearing field of a geometry exactly once.
    pub fn transform_geometry(&self, geometry: &Geometry) -> Geometry {
        match geometry {
            Geometry::Line { start, end } => Geometry::Line {
                start: self.apply_point(*start),
                end: self.apply_point(*end),
            },
            Geometry::Arc { center, radius } => Geometry::Arc {
                center: self.apply_point(*center),
                radius: *radius,
            },
            Geometry::Point { position } => Geometry::Point {
                position: self.apply_point(*position),
            },
            Geometry::Polyline { vertices } => Geometry::Polyline {
                vertices: vertices.iter().map(|v| self.apply_point(*v)).collect(),
            },
            Geometry::None => Geometry::None,
        }
    }
}

impl Default for LevelTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&LocateDeclaration> for LevelTransform {
    fn from(decl: &LocateDeclaration) -> Self {
        Self {
            origin_x: decl.origin_x,
            origin_y: decl.origin_y,
            rotation_degrees: decl.rotation_degrees,
            scale_x: decl.scale_x,
            scale_y: decl.scale_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_noop() {
        let t = LevelTransform::identity();
        assert_eq!(t.apply(10.0, 20.0), (10.0, 20.0));
        assert_eq!(t.apply(-3.5, 0.0), (-3.5, 0.0));
    }

    #[test]
    fn test_scale_only() {
        let t = LevelTransform {
            scale_x: 2.0,
            scale_y: 3.0,
            ..LevelTransform::identity()
        };
        assert_eq!(t.apply(10.0, 20.0), (20.0, 60.0));
    }

    #[test]
    fn test_translation_only() {
        let t = LevelTransform {
            origin_x: 100.0,
            origin_y: 200.0,
            ..LevelTransform::identity()
        };
        assert_eq!(t.apply(10.0, 20.0), (110.0, 220.0));
    }

    #[test]
    fn test_pure_rotation_90() {
        let t = LevelTransform {
            rotation_degrees: 90.0,
            ..LevelTransform::identity()
        };
        let (x, y) = t.apply(10.0, 0.0);
        assert!(x.abs() < 1e-6);
        assert!((y - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let t = LevelTransform {
            origin_x: 123.4,
            origin_y: -56.7,
            rotation_degrees: 33.0,
            scale_x: 2.5,
            scale_y: 0.4,
        };
        for &(x, y) in &[(0.0, 0.0), (10.0, 20.0), (-7.3, 1e4), (0.001, -0.002)] {
            let (fx, fy) = t.apply(x, y);
            let (bx, by) = t.invert(fx, fy);
            assert!((bx - x).abs() < 1e-9, "x round-trip: {} vs {}", bx, x);
            assert!((by - y).abs() < 1e-9, "y round-trip: {} vs {}", by, y);
        }
    }

    #[test]
    fn test_validation() {
        assert!(LevelTransform::identity().is_valid());
        let zero_scale = LevelTransform {
            scale_x: 0.0,
            ..LevelTransform::identity()
        };
        assert!(!zero_scale.is_valid());
        let nan_origin = LevelTransform {
            origin_x: f64::NAN,
            ..LevelTransform::identity()
        };
        assert!(!nan_origin.is_valid());
        let big_rotation = LevelTransform {
            rotation_degrees: 361.0,
            ..LevelTransform::identity()
        };
        assert!(!big_rotation.is_valid());
        let edge_rotation = LevelTransform {
            rotation_degrees: -360.0,
            ..LevelTransform::identity()
        };
        assert!(edge_rotation.is_valid());
    }

    #[test]
    fn test_transform_geometry_line() {
        let t = LevelTransform {
            origin_x: 100.0,
            origin_y: 200.0,
            rotation_degrees: 90.0,
            ..LevelTransform::identity()
        };
        let g = Geometry::Line {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(10.0, 0.0),
        };
        if let Geometry::Line { start, end } = t.transform_geometry(&g) {
            assert!((start.x - 100.0).abs() < 1e-6);
            assert!((start.y - 200.0).abs() < 1e-6);
            assert!((end.x - 100.0).abs() < 1e-6);
            assert!((end.y - 210.0).abs() < 1e-6);
        } else {
            panic!("expected line geometry");
        }
    }
}
