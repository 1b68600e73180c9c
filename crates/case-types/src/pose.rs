use serde::{Deserialize, Serialize};

use crate::transform::{rotate_deg, translate, Point};

/// A placement in model space: a rotation (degrees, applied X→Y→Z) followed
/// by a translation. Poses are applied rotate-then-translate; the reverse
/// order is a different placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation applied after the rotation.
    pub position: [f64; 3],
    /// Rotation in degrees about X, Y, Z, applied in that order.
    pub rotation: [f64; 3],
}

impl Pose {
    pub fn new(position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
        }
    }

    /// Apply this pose to a point: rotate, then translate.
    pub fn apply(&self, p: Point) -> Point {
        translate(rotate_deg(p, self.rotation), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pose_fixes_points() {
        let p = [1.25, -4.0, 9.5];
        assert_eq!(Pose::identity().apply(p), p);
    }

    #[test]
    fn pose_rotates_before_translating() {
        let pose = Pose::new([1.0, 0.0, 0.0], [0.0, 0.0, 90.0]);
        let p = pose.apply([1.0, 0.0, 0.0]);
        assert!((p[0] - 1.0).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
    }
}
