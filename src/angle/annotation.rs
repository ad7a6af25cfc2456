//! Overlay annotation geometry and readout text.
//!
//! Only the numbers needed to place an arc are produced here; drawing is up
//! to the caller.

use std::f32::consts::FRAC_PI_2;

use serde::Serialize;

use super::calculator::Measurement;
use crate::joint::{CalcKind, JointDefinition, RangeLabels};
use crate::pose::{Point2D, Projector};
use crate::tracker::SessionStats;

const ARC_RADIUS: f32 = 40.0;
const YAW_ARC_RADIUS: f32 = 50.0;

/// 角度アークの配置情報（角度はラジアン、画面座標系）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcAnnotation {
    pub center: (f32, f32),
    pub radius: f32,
    pub start_rad: f32,
    pub end_rad: f32,
    pub counter_clockwise: bool,
    pub label: String,
}

fn heading(from: &Point2D, to: &Point2D) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Arc for one measured angle. `None` when the angle is missing or the
/// anchors do not match the formula.
pub fn arc_for(
    kind: CalcKind,
    anchors: &[Point2D],
    angle: Option<f32>,
    projector: &Projector,
) -> Option<ArcAnnotation> {
    let angle = angle?;
    let degrees = format!("{:.1}°", angle);

    let arc = match (kind, anchors) {
        (CalcKind::Angle | CalcKind::Flexion, [a, b, c]) => ArcAnnotation {
            center: (b.x, b.y),
            radius: ARC_RADIUS,
            start_rad: heading(b, a),
            end_rad: heading(b, c),
            counter_clockwise: false,
            label: degrees,
        },
        (CalcKind::Tilt, [left, right]) => {
            let theta = heading(left, right);
            ArcAnnotation {
                center: ((left.x + right.x) / 2.0, (left.y + right.y) / 2.0),
                radius: ARC_RADIUS,
                start_rad: 0.0,
                end_rad: theta,
                counter_clockwise: theta < 0.0,
                label: degrees,
            }
        }
        (CalcKind::Neck, [top, bottom]) => {
            // Reference is straight down from the top point
            let theta = heading(top, bottom);
            ArcAnnotation {
                center: (top.x, top.y),
                radius: ARC_RADIUS,
                start_rad: FRAC_PI_2,
                end_rad: theta,
                counter_clockwise: theta < FRAC_PI_2,
                label: degrees,
            }
        }
        (CalcKind::YawFromNose, [_, _, _]) => ArcAnnotation {
            center: (projector.width() / 2.0, projector.height() * 0.25),
            radius: YAW_ARC_RADIUS,
            start_rad: -angle.to_radians(),
            end_rad: 0.0,
            counter_clockwise: angle < 0.0,
            label: format!("{}°", angle.round()),
        },
        _ => return None,
    };
    Some(arc)
}

impl Measurement {
    pub fn annotation(&self, joint: &JointDefinition, projector: &Projector) -> Option<ArcAnnotation> {
        arc_for(joint.calc_kind(), &self.anchors, self.sample.angle, projector)
    }
}

/// 表示・記録用の整数角度。`-0` は `0` に揃える
pub fn whole_degrees(angle: f32) -> f32 {
    angle.round() + 0.0
}

fn rounded_or_dash(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{}", whole_degrees(v)),
        None => "-".to_string(),
    }
}

/// 現在角度と記録範囲の表示文字列
///
/// `"37° (Extension: -5°, Flexion: 120°)"`
pub fn format_reading(angle: Option<f32>, stats: &SessionStats, labels: &RangeLabels) -> String {
    let current = match angle {
        Some(a) => format!("{}°", whole_degrees(a)),
        None => "Waiting for landmarks...".to_string(),
    };
    format!(
        "{} ({}: {}°, {}: {}°)",
        current,
        labels.low,
        rounded_or_dash(stats.min),
        labels.high,
        rounded_or_dash(stats.max)
    )
}
