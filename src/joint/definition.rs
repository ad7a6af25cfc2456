use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::pose::LandmarkGroup;

/// 角度の計算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalcKind {
    /// 頂点角 (0〜180°)
    #[serde(alias = "angle", alias = "default")]
    Angle,
    /// 直線からの符号付き偏差
    #[serde(alias = "flexion")]
    Flexion,
    /// 水平ペアの傾き
    #[serde(alias = "tilt")]
    Tilt,
    /// 垂直ペアのピッチ
    #[serde(alias = "neck")]
    Neck,
    /// 鼻と左右基準点の距離比によるヨー
    #[serde(alias = "yawFromNose", alias = "yaw_from_nose")]
    YawFromNose,
}

impl CalcKind {
    /// 必要なランドマーク数
    pub fn arity(self) -> usize {
        match self {
            CalcKind::Angle | CalcKind::Flexion | CalcKind::YawFromNose => 3,
            CalcKind::Tilt | CalcKind::Neck => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// 評価閾値 (good >= fair >= poor)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub good: f32,
    pub fair: f32,
    pub poor: f32,
}

impl Thresholds {
    pub fn new(good: f32, fair: f32, poor: f32) -> Self {
        Self { good, fair, poor }
    }

    fn is_valid(&self) -> bool {
        let finite = self.good.is_finite() && self.fair.is_finite() && self.poor.is_finite();
        finite && self.good >= self.fair && self.fair >= self.poor
    }
}

/// 測定範囲の下端・上端の表示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLabels {
    pub low: String,
    pub high: String,
}

impl RangeLabels {
    pub fn new(low: &str, high: &str) -> Self {
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

impl Default for RangeLabels {
    fn default() -> Self {
        Self::new("Extension", "Flexion")
    }
}

/// Formula with its landmark indices, arity fixed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    /// [A, vertex, C]
    Angle([usize; 3]),
    /// [A, vertex, C]
    Flexion([usize; 3]),
    /// [left, right]
    Tilt([usize; 2]),
    /// [top, bottom]
    Neck([usize; 2]),
    /// [nose, left reference, right reference]
    YawFromNose([usize; 3]),
}

impl Formula {
    /// Returns `None` when `indices` does not match the kind's arity.
    pub fn new(kind: CalcKind, indices: &[usize]) -> Option<Self> {
        let formula = match kind {
            CalcKind::Angle => Formula::Angle(indices.try_into().ok()?),
            CalcKind::Flexion => Formula::Flexion(indices.try_into().ok()?),
            CalcKind::Tilt => Formula::Tilt(indices.try_into().ok()?),
            CalcKind::Neck => Formula::Neck(indices.try_into().ok()?),
            CalcKind::YawFromNose => Formula::YawFromNose(indices.try_into().ok()?),
        };
        Some(formula)
    }

    pub fn kind(&self) -> CalcKind {
        match self {
            Formula::Angle(_) => CalcKind::Angle,
            Formula::Flexion(_) => CalcKind::Flexion,
            Formula::Tilt(_) => CalcKind::Tilt,
            Formula::Neck(_) => CalcKind::Neck,
            Formula::YawFromNose(_) => CalcKind::YawFromNose,
        }
    }

    pub fn indices(&self) -> &[usize] {
        match self {
            Formula::Angle(i) | Formula::Flexion(i) | Formula::YawFromNose(i) => i,
            Formula::Tilt(i) | Formula::Neck(i) => i,
        }
    }
}

/// 設定ファイル上の関節定義（未検証）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    pub id: String,
    pub label: String,
    #[serde(default = "default_group")]
    pub group: LandmarkGroup,
    pub indices: Vec<usize>,
    pub calc: CalcKind,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
    #[serde(default)]
    pub labels: RangeLabels,
}

fn default_group() -> LandmarkGroup {
    LandmarkGroup::Pose
}

/// 検証済みの関節定義。生成後は変更されない。
#[derive(Debug, Clone, PartialEq)]
pub struct JointDefinition {
    id: String,
    label: String,
    group: LandmarkGroup,
    formula: Formula,
    direction: Option<Direction>,
    thresholds: Option<Thresholds>,
    labels: RangeLabels,
}

impl JointDefinition {
    /// Validates arity, index range and threshold ordering.
    pub fn from_spec(spec: JointSpec) -> Result<Self, CatalogError> {
        if spec.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }

        let formula = Formula::new(spec.calc, &spec.indices).ok_or_else(|| CatalogError::Arity {
            id: spec.id.clone(),
            kind: spec.calc,
            expected: spec.calc.arity(),
            actual: spec.indices.len(),
        })?;

        let max = spec.group.landmark_count();
        if let Some(&index) = spec.indices.iter().find(|&&i| i >= max) {
            return Err(CatalogError::IndexOutOfRange {
                id: spec.id,
                group: spec.group,
                index,
                max: max - 1,
            });
        }

        if let Some(t) = spec.thresholds {
            if !t.is_valid() {
                return Err(CatalogError::Thresholds {
                    id: spec.id,
                    good: t.good,
                    fair: t.fair,
                    poor: t.poor,
                });
            }
        }

        Ok(Self {
            id: spec.id,
            label: spec.label,
            group: spec.group,
            formula,
            direction: spec.direction,
            thresholds: spec.thresholds,
            labels: spec.labels,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn group(&self) -> LandmarkGroup {
        self.group
    }

    pub fn formula(&self) -> Formula {
        self.formula
    }

    pub fn calc_kind(&self) -> CalcKind {
        self.formula.kind()
    }

    pub fn indices(&self) -> &[usize] {
        self.formula.indices()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn thresholds(&self) -> Option<Thresholds> {
        self.thresholds
    }

    pub fn labels(&self) -> &RangeLabels {
        &self.labels
    }

    pub fn to_spec(&self) -> JointSpec {
        JointSpec {
            id: self.id.clone(),
            label: self.label.clone(),
            group: self.group,
            indices: self.indices().to_vec(),
            calc: self.calc_kind(),
            direction: self.direction,
            thresholds: self.thresholds,
            labels: self.labels.clone(),
        }
    }
}
