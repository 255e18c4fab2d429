//! Joint angle at a vertex from three 2D points.

/// Angle in degrees at `b` between the rays `b→a` and `b→c`, in `[0, 180]`.
///
/// Computed from the difference of the two rays' polar angles, reflected into
/// the half-turn. Collinear or coincident points give `0` or `180`; the
/// function never fails on finite input.
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let ray_c = (c.1 - b.1).atan2(c.0 - b.0);
    let ray_a = (a.1 - b.1).atan2(a.0 - b.0);

    let mut angle = (ray_c - ray_a).abs().to_degrees();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    // Rounding in to_degrees can land a hair outside the half-turn.
    angle.clamp(0.0, 180.0)
}
