use serde::{Deserialize, Serialize};
use tracing::trace;

use super::formulas::{
    flexion_angle, neck_pitch_angle, tilt_angle, vertex_angle, yaw_from_nose, DEFAULT_MAX_YAW_DEG,
};
use crate::config::EngineConfig;
use crate::joint::{Direction, Formula, JointDefinition};
use crate::pose::{LandmarkFrame, Point2D, Projector};

/// 1フレーム分の測定値。`angle == None` は未検出/縮退。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub angle: Option<f32>,
    pub timestamp_us: u64,
}

impl AngleSample {
    pub fn new(angle: Option<f32>, timestamp_us: u64) -> Self {
        Self { angle, timestamp_us }
    }

    pub fn empty(timestamp_us: u64) -> Self {
        Self::new(None, timestamp_us)
    }
}

/// 測定値と、オーバーレイ描画用の射影済みアンカー点
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub sample: AngleSample,
    /// 関節定義のインデックス順
    pub anchors: Vec<Point2D>,
}

impl Measurement {
    pub fn all_visible(&self) -> bool {
        self.anchors.iter().all(|p| p.visible)
    }
}

/// 関節定義に応じて式を選び、符号付き角度を計算する
#[derive(Debug, Clone, Copy)]
pub struct AngleCalculator {
    projector: Projector,
    max_yaw_deg: f32,
}

impl AngleCalculator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            projector: Projector::new(width, height),
            max_yaw_deg: DEFAULT_MAX_YAW_DEG,
        }
    }

    pub fn from_config(config: &EngineConfig, width: u32, height: u32) -> Self {
        Self {
            projector: Projector::with_threshold(width, height, config.visibility_threshold),
            max_yaw_deg: config.max_yaw_deg,
        }
    }

    pub fn with_max_yaw(mut self, max_yaw_deg: f32) -> Self {
        self.max_yaw_deg = max_yaw_deg;
        self
    }

    /// Keeps the visibility threshold and yaw scale.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            projector: self.projector.resized(width, height),
            max_yaw_deg: self.max_yaw_deg,
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn max_yaw_deg(&self) -> f32 {
        self.max_yaw_deg
    }

    pub fn compute(&self, joint: &JointDefinition, frame: &LandmarkFrame) -> AngleSample {
        self.measure(joint, frame).sample
    }

    pub fn measure(&self, joint: &JointDefinition, frame: &LandmarkFrame) -> Measurement {
        let landmarks = frame.group(joint.group());
        let point = |i: usize| self.projector.project(landmarks.and_then(|l| l.get(i)));
        let anchors: Vec<Point2D> = joint.indices().iter().map(|&i| point(i)).collect();

        let angle = if anchors.iter().all(|p| p.visible) {
            let angle = self.evaluate(joint, point);
            if angle.is_none() {
                trace!(joint = joint.id(), "degenerate geometry");
            }
            angle
        } else {
            trace!(joint = joint.id(), "landmarks not fully visible");
            None
        };

        Measurement {
            sample: AngleSample::new(angle, frame.timestamp_us),
            anchors,
        }
    }

    fn evaluate(&self, joint: &JointDefinition, point: impl Fn(usize) -> Point2D) -> Option<f32> {
        let direction = joint.direction();
        match joint.formula() {
            Formula::Angle([a, b, c]) => vertex_angle(&point(a), &point(b), &point(c)),
            Formula::Flexion([a, b, c]) => flexion_angle(&point(a), &point(b), &point(c)),
            Formula::Tilt([left, right]) => {
                tilt_angle(&point(left), &point(right)).map(|a| directed(a, direction))
            }
            Formula::Neck([top, bottom]) => neck_pitch_angle(&point(top), &point(bottom)),
            Formula::YawFromNose([nose, left, right]) => {
                yaw_from_nose(&point(nose), &point(left), &point(right), self.max_yaw_deg)
                    .map(|a| directed(a, direction))
            }
        }
    }
}

/// Left の関節は符号を反転して左右ペアの向きを揃える
fn directed(angle: f32, direction: Option<Direction>) -> f32 {
    match direction {
        Some(Direction::Left) => -angle,
        _ => angle,
    }
}
