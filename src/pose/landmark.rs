use serde::{Deserialize, Serialize};

/// MediaPipe Pose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Face Mesh (refine_landmarks 有効時 478 点) のうち本クレートが参照する点
pub mod face {
    pub const COUNT: usize = 478;

    pub const FOREHEAD: usize = 10;
    pub const NOSE_TIP: usize = 4;
    pub const CHIN: usize = 152;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const LEFT_CHEEK: usize = 234;
    pub const RIGHT_CHEEK: usize = 454;
}

/// どのランドマーク配列から読むか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkGroup {
    Pose,
    Face,
}

impl LandmarkGroup {
    /// 検出器がこのグループで出力する点の数
    pub fn landmark_count(self) -> usize {
        match self {
            LandmarkGroup::Pose => PoseLandmark::COUNT,
            LandmarkGroup::Face => face::COUNT,
        }
    }
}

/// 単一ランドマーク
///
/// Face Mesh は visibility を持たないため `None` になる。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 相対深度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    /// 信頼度スコア (0.0〜1.0)
    #[serde(default, alias = "confidence", skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn with_visibility(x: f32, y: f32, visibility: f32) -> Self {
        Self {
            visibility: Some(visibility),
            ..Self::new(x, y)
        }
    }

    /// 信頼度が閾値を超えているか（信頼度なしは常に可視）
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility.map_or(true, |v| v > threshold)
    }
}

/// 検出器から1フレーム分受け取るランドマーク
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default)]
    pub timestamp_us: u64,
    #[serde(default)]
    pub pose: Option<Vec<Landmark>>,
    #[serde(default)]
    pub face: Option<Vec<Landmark>>,
}

impl LandmarkFrame {
    pub fn new(timestamp_us: u64) -> Self {
        Self {
            timestamp_us,
            pose: None,
            face: None,
        }
    }

    pub fn with_pose(mut self, landmarks: Vec<Landmark>) -> Self {
        self.pose = Some(landmarks);
        self
    }

    pub fn with_face(mut self, landmarks: Vec<Landmark>) -> Self {
        self.face = Some(landmarks);
        self
    }

    pub fn group(&self, group: LandmarkGroup) -> Option<&[Landmark]> {
        match group {
            LandmarkGroup::Pose => self.pose.as_deref(),
            LandmarkGroup::Face => self.face.as_deref(),
        }
    }

    /// インデックスでランドマークを取得（配列なし・範囲外は None）
    pub fn get(&self, group: LandmarkGroup, index: usize) -> Option<&Landmark> {
        self.group(group)?.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_landmark_count() {
        assert_eq!(PoseLandmark::COUNT, 33);
        assert_eq!(PoseLandmark::RightFootIndex.index(), 32);
        assert_eq!(PoseLandmark::LeftElbow.index(), 13);
    }

    #[test]
    fn test_landmark_visibility() {
        assert!(Landmark::new(0.5, 0.5).is_visible(0.7));
        assert!(Landmark::with_visibility(0.5, 0.5, 0.71).is_visible(0.7));
        assert!(!Landmark::with_visibility(0.5, 0.5, 0.7).is_visible(0.7));
        assert!(!Landmark::with_visibility(0.5, 0.5, 0.2).is_visible(0.7));
    }

    #[test]
    fn test_frame_get() {
        let frame = LandmarkFrame::new(0).with_pose(vec![Landmark::new(0.1, 0.2); 3]);
        assert!(frame.get(LandmarkGroup::Pose, 2).is_some());
        assert!(frame.get(LandmarkGroup::Pose, 3).is_none());
        assert!(frame.get(LandmarkGroup::Face, 0).is_none());
    }

    #[test]
    fn test_frame_from_json() {
        let json = r#"{"timestamp_us": 42, "pose": [{"x": 0.5, "y": 0.25, "visibility": 0.9}],
                       "face": [{"x": 0.1, "y": 0.2, "z": -0.03}]}"#;
        let frame: LandmarkFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.timestamp_us, 42);
        let p = frame.get(LandmarkGroup::Pose, 0).unwrap();
        assert_eq!(p.visibility, Some(0.9));
        let f = frame.get(LandmarkGroup::Face, 0).unwrap();
        assert_eq!(f.visibility, None);
        assert_eq!(f.z, Some(-0.03));
    }

    #[test]
    fn test_confidence_alias() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.0, "y": 1.0, "confidence": 0.4}"#).unwrap();
        assert_eq!(lm.visibility, Some(0.4));
    }
}
