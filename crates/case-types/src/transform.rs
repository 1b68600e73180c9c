//! Pure point transforms — the same rotation/translation semantics the
//! kernel applies to solids, usable without a kernel handle.
//!
//! Rotation order is X, then Y, then Z, in degrees, right-handed, about the
//! origin. The order is load-bearing: every placement chain in the pipeline
//! assumes it, and it is not commutative with translation.

/// A point in model space, millimeters.
pub type Point = [f64; 3];

/// Rotate `p` about the origin by `degrees = [rx, ry, rz]`, applied X→Y→Z.
pub fn rotate_deg(p: Point, degrees: [f64; 3]) -> Point {
    let p = rotate_x(p, degrees[0].to_radians());
    let p = rotate_y(p, degrees[1].to_radians());
    rotate_z(p, degrees[2].to_radians())
}

/// Translate `p` by `offset`.
pub fn translate(p: Point, offset: [f64; 3]) -> Point {
    [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]
}

fn rotate_x(p: Point, rad: f64) -> Point {
    let (s, c) = rad.sin_cos();
    [p[0], p[1] * c - p[2] * s, p[1] * s + p[2] * c]
}

fn rotate_y(p: Point, rad: f64) -> Point {
    let (s, c) = rad.sin_cos();
    [p[0] * c + p[2] * s, p[1], -p[0] * s + p[2] * c]
}

fn rotate_z(p: Point, rad: f64) -> Point {
    let (s, c) = rad.sin_cos();
    [p[0] * c - p[1] * s, p[0] * s + p[1] * c, p[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point_eq(a: Point, b: Point) {
        for i in 0..3 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn rotate_z_quarter_turn_is_right_handed() {
        let p = rotate_deg([1.0, 0.0, 0.0], [0.0, 0.0, 90.0]);
        assert_point_eq(p, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn rotate_then_translate_differs_from_translate_then_rotate() {
        let start = [1.0, 0.0, 0.0];
        let rot = [0.0, 0.0, 90.0];
        let off = [1.0, 0.0, 0.0];

        let rotate_first = translate(rotate_deg(start, rot), off);
        assert_point_eq(rotate_first, [1.0, 1.0, 0.0]);

        let translate_first = rotate_deg(translate(start, off), rot);
        assert_point_eq(translate_first, [0.0, 2.0, 0.0]);

        let delta: f64 = (0..3)
            .map(|i| (rotate_first[i] - translate_first[i]).abs())
            .sum();
        assert!(delta > 1.0, "composition order must matter, delta = {}", delta);
    }

    #[test]
    fn rotation_axis_order_is_x_then_y_then_z() {
        // (0,0,1) under [90, 0, 90]: X-rotation sends it to (0,-1,0),
        // Z-rotation then sends that to (1,0,0). Applying Z first would
        // leave (0,0,1) fixed and yield (0,-1,0) instead.
        let p = rotate_deg([0.0, 0.0, 1.0], [90.0, 0.0, 90.0]);
        assert_point_eq(p, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = rotate_deg([3.5, -2.0, 7.25], [0.0, 0.0, 0.0]);
        assert_point_eq(p, [3.5, -2.0, 7.25]);
    }
}
