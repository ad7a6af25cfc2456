use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::angle::AngleSample;

/// 選択中の関節の最小・最大角度（可動域の記録）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl SessionStats {
    /// max − min. `None` until the first sample.
    pub fn span(&self) -> Option<f32> {
        Some(self.max? - self.min?)
    }

    pub fn contains(&self, angle: f32) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= angle && angle <= max,
            _ => false,
        }
    }
}

/// 関節1つ分の可動域トラッカー
///
/// 関節ごとに独立して所有すること。複数関節を同時に追う場合も共有しない。
#[derive(Debug, Clone, Default)]
pub struct RangeTracker {
    joint_id: Option<String>,
    stats: SessionStats,
    last: Option<f32>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_joint(joint_id: &str) -> Self {
        Self {
            joint_id: Some(joint_id.to_string()),
            ..Self::default()
        }
    }

    pub fn joint_id(&self) -> Option<&str> {
        self.joint_id.as_deref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// 最後に観測した有効角度
    pub fn last_angle(&self) -> Option<f32> {
        self.last
    }

    /// Null samples leave the record untouched.
    pub fn observe(&mut self, sample: &AngleSample) {
        let Some(angle) = sample.angle else {
            return;
        };
        if !angle.is_finite() {
            return;
        }
        self.stats.min = Some(self.stats.min.map_or(angle, |m| m.min(angle)));
        self.stats.max = Some(self.stats.max.map_or(angle, |m| m.max(angle)));
        self.last = Some(angle);
    }

    pub fn reset(&mut self) {
        debug!(joint = ?self.joint_id, "range reset");
        self.stats = SessionStats::default();
        self.last = None;
    }

    /// 関節切り替え（暗黙のリセット）
    pub fn select(&mut self, joint_id: &str) {
        self.reset();
        self.joint_id = Some(joint_id.to_string());
    }
}
