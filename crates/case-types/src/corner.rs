use serde::{Deserialize, Serialize};

/// Which hand the case is generated for. The right side is modeled; the left
/// side is mirrored at export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Right,
    Left,
}

/// A corner of a key mounting plate. Web posts anchor hulls at these corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl PlateCorner {
    /// Sign of the corner offset along (x, y) from the plate center.
    pub fn signs(self) -> (f64, f64) {
        match self {
            PlateCorner::TopLeft => (-1.0, 1.0),
            PlateCorner::TopRight => (1.0, 1.0),
            PlateCorner::BottomLeft => (-1.0, -1.0),
            PlateCorner::BottomRight => (1.0, -1.0),
        }
    }
}

/// Named key positions inside a thumb cluster. Concrete cluster variants
/// decide which of these are populated and how they fan around the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKey {
    TopLeft,
    MiddleRight,
    BottomRight,
    BottomLeft,
}

impl ClusterKey {
    pub const ALL: [ClusterKey; 4] = [
        ClusterKey::TopLeft,
        ClusterKey::MiddleRight,
        ClusterKey::BottomRight,
        ClusterKey::BottomLeft,
    ];

    /// Index into the per-key configuration offset arrays.
    pub fn index(self) -> usize {
        match self {
            ClusterKey::TopLeft => 0,
            ClusterKey::MiddleRight => 1,
            ClusterKey::BottomRight => 2,
            ClusterKey::BottomLeft => 3,
        }
    }
}

/// Anchor posts on the circle bounding the trackball, named by compass-ish
/// position when looking down at the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallPost {
    Left,
    BottomLeft,
    BottomRight,
    Right,
    TopRight,
    TopLeft,
}

impl BallPost {
    /// Angle of the post on the bounding circle, degrees, counter-clockwise
    /// from the +Y direction.
    pub fn angle_deg(self) -> f64 {
        match self {
            BallPost::TopLeft => 0.0,
            BallPost::Left => -60.0,
            BallPost::BottomLeft => -120.0,
            BallPost::BottomRight => -180.0,
            BallPost::Right => -240.0,
            BallPost::TopRight => -300.0,
        }
    }
}
