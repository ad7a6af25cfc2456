use std::collections::HashSet;

use tracing::info;

use super::definition::{CalcKind, Direction, JointDefinition, JointSpec, RangeLabels, Thresholds};
use crate::error::CatalogError;
use crate::pose::{face, LandmarkGroup, PoseLandmark};

fn pose_spec(
    id: &str,
    label: &str,
    calc: CalcKind,
    indices: [PoseLandmark; 3],
    thresholds: Option<Thresholds>,
    labels: RangeLabels,
) -> JointSpec {
    JointSpec {
        id: id.to_string(),
        label: label.to_string(),
        group: LandmarkGroup::Pose,
        indices: indices.iter().map(|l| l.index()).collect(),
        calc,
        direction: None,
        thresholds,
        labels,
    }
}

fn face_spec(
    id: &str,
    label: &str,
    calc: CalcKind,
    indices: &[usize],
    direction: Direction,
    thresholds: Option<Thresholds>,
    labels: RangeLabels,
) -> JointSpec {
    JointSpec {
        id: id.to_string(),
        label: label.to_string(),
        group: LandmarkGroup::Face,
        indices: indices.to_vec(),
        calc,
        direction: Some(direction),
        thresholds,
        labels,
    }
}

/// 組み込みの関節カタログ（表示順）
///
/// 右側の Flexion は左右反転した動きが同じ符号になるよう逆順に並べる
pub fn builtin_specs() -> Vec<JointSpec> {
    use PoseLandmark::*;

    let elbow = Some(Thresholds::new(140.0, 100.0, 60.0));
    let knee = Some(Thresholds::new(130.0, 90.0, 50.0));
    let shoulder = Some(Thresholds::new(150.0, 120.0, 90.0));
    let tilt = Some(Thresholds::new(40.0, 30.0, 20.0));
    let turn = Some(Thresholds::new(70.0, 50.0, 30.0));

    let flex = RangeLabels::default;
    let abduction = || RangeLabels::new("Adduction", "Abduction");

    vec![
        pose_spec("leftElbow", "Left Elbow", CalcKind::Flexion, [LeftShoulder, LeftElbow, LeftWrist], elbow, flex()),
        pose_spec("rightElbow", "Right Elbow", CalcKind::Flexion, [RightWrist, RightElbow, RightShoulder], elbow, flex()),
        pose_spec("leftKnee", "Left Knee", CalcKind::Flexion, [LeftHip, LeftKnee, LeftAnkle], knee, flex()),
        pose_spec("rightKnee", "Right Knee", CalcKind::Flexion, [RightAnkle, RightKnee, RightHip], knee, flex()),
        pose_spec("leftShoulder", "Left Shoulder", CalcKind::Angle, [LeftHip, LeftShoulder, LeftElbow], shoulder, abduction()),
        pose_spec("rightShoulder", "Right Shoulder", CalcKind::Angle, [RightHip, RightShoulder, RightElbow], shoulder, abduction()),
        pose_spec("leftHip", "Left Hip", CalcKind::Angle, [LeftShoulder, LeftHip, LeftKnee], None, flex()),
        pose_spec("rightHip", "Right Hip", CalcKind::Angle, [RightShoulder, RightHip, RightKnee], None, flex()),
        face_spec(
            "headTiltLeft",
            "Head Tilt Left",
            CalcKind::Tilt,
            &[face::LEFT_EYE_OUTER, face::RIGHT_EYE_OUTER],
            Direction::Left,
            tilt,
            RangeLabels::new("Right", "Left"),
        ),
        face_spec(
            "headTiltRight",
            "Head Tilt Right",
            CalcKind::Tilt,
            &[face::LEFT_EYE_OUTER, face::RIGHT_EYE_OUTER],
            Direction::Right,
            tilt,
            RangeLabels::new("Left", "Right"),
        ),
        face_spec(
            "neckFlexion",
            "Neck Flexion / Extension",
            CalcKind::Neck,
            &[face::FOREHEAD, face::CHIN],
            Direction::Down,
            None,
            flex(),
        ),
        face_spec(
            "headTurnLeft",
            "Head Turn Left",
            CalcKind::YawFromNose,
            &[face::NOSE_TIP, face::LEFT_CHEEK, face::RIGHT_CHEEK],
            Direction::Left,
            turn,
            RangeLabels::new("Right", "Left"),
        ),
        face_spec(
            "headTurnRight",
            "Head Turn Right",
            CalcKind::YawFromNose,
            &[face::NOSE_TIP, face::LEFT_CHEEK, face::RIGHT_CHEEK],
            Direction::Right,
            turn,
            RangeLabels::new("Left", "Right"),
        ),
    ]
}

/// 読み取り専用の関節カタログ
#[derive(Debug, Clone)]
pub struct JointRegistry {
    joints: Vec<JointDefinition>,
}

impl JointRegistry {
    /// Validates every spec; the first bad entry rejects the whole catalog.
    pub fn new<I>(specs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = JointSpec>,
    {
        let mut seen = HashSet::new();
        let mut joints = Vec::new();
        for spec in specs {
            let joint = JointDefinition::from_spec(spec)?;
            if !seen.insert(joint.id().to_string()) {
                return Err(CatalogError::DuplicateId(joint.id().to_string()));
            }
            joints.push(joint);
        }
        info!(count = joints.len(), "joint catalog loaded");
        Ok(Self { joints })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_specs())
    }

    /// 組み込みカタログの後ろに追加定義を連結
    pub fn with_extra(extra: &[JointSpec]) -> Result<Self, CatalogError> {
        Self::new(builtin_specs().into_iter().chain(extra.iter().cloned()))
    }

    pub fn all(&self) -> &[JointDefinition] {
        &self.joints
    }

    pub fn by_id(&self, id: &str) -> Result<&JointDefinition, CatalogError> {
        self.joints
            .iter()
            .find(|j| j.id() == id)
            .ok_or_else(|| CatalogError::UnknownJoint(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}
