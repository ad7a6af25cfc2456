//! Closed-form angle formulas over projected points.
//!
//! Every formula returns degrees, or `None` when the geometry is degenerate
//! (coincident points, zero baseline). None of them ever yields NaN.

use nalgebra::Vector2;

use crate::pose::Point2D;

/// Segments shorter than this (pixels) have no usable direction.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Default scale for the yaw ratio, in degrees per unit ratio.
pub const DEFAULT_MAX_YAW_DEG: f32 = 90.0;

fn vector(from: &Point2D, to: &Point2D) -> Vector2<f32> {
    Vector2::new(to.x - from.x, to.y - from.y)
}

fn segment(from: &Point2D, to: &Point2D) -> Option<Vector2<f32>> {
    let v = vector(from, to);
    if v.norm() < MIN_SEGMENT_LENGTH || !v.iter().all(|c| c.is_finite()) {
        None
    } else {
        Some(v)
    }
}

/// Unsigned angle at vertex `b` between BA and BC, in `[0, 180]`.
///
/// cos(θ) = (BA · BC) / (|BA| × |BC|)
pub fn vertex_angle(a: &Point2D, b: &Point2D, c: &Point2D) -> Option<f32> {
    let ba = segment(b, a)?;
    let bc = segment(b, c)?;

    // Clamp guards acos against rounding just outside [-1, 1]
    let cos = (ba.dot(&bc) / (ba.norm() * bc.norm())).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Signed deviation from a straight line at vertex `b`, in `(-180, 180]`.
///
/// The signed sweep BA → BC is normalized into `[0, 360)` and then offset by
/// 180, so a straight segment chain reads 0 and the sign follows the
/// landmark ordering.
pub fn flexion_angle(a: &Point2D, b: &Point2D, c: &Point2D) -> Option<f32> {
    let ba = segment(b, a)?;
    let bc = segment(b, c)?;

    let sweep = (bc.y.atan2(bc.x) - ba.y.atan2(ba.x)).to_degrees();
    let deviation = sweep.rem_euclid(360.0) - 180.0;
    if deviation <= -180.0 {
        Some(deviation + 360.0)
    } else {
        Some(deviation)
    }
}

/// Slope of the line left → right relative to the horizontal.
pub fn tilt_angle(left: &Point2D, right: &Point2D) -> Option<f32> {
    let d = segment(left, right)?;
    Some(d.y.atan2(d.x).to_degrees())
}

/// Pitch of the line top → bottom. Same shape as [`tilt_angle`] on a
/// vertical pair.
pub fn neck_pitch_angle(top: &Point2D, bottom: &Point2D) -> Option<f32> {
    let d = segment(top, bottom)?;
    Some(d.y.atan2(d.x).to_degrees())
}

/// Head yaw estimated from how far the nose sits from each reference point.
///
/// ratio = (|nose − left| − |nose − right|) / |left − right|, clamped to
/// `[-1, 1]` and scaled by `max_yaw_deg`.
pub fn yaw_from_nose(
    nose: &Point2D,
    left_ref: &Point2D,
    right_ref: &Point2D,
    max_yaw_deg: f32,
) -> Option<f32> {
    let baseline = segment(left_ref, right_ref)?.norm();

    let left_distance = vector(nose, left_ref).norm();
    let right_distance = vector(nose, right_ref).norm();

    let ratio = (left_distance - right_distance) / baseline;
    if !ratio.is_finite() {
        return None;
    }

    let yaw = ratio.clamp(-1.0, 1.0) * max_yaw_deg;
    yaw.is_finite().then_some(yaw)
}
