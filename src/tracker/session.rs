use tracing::{debug, info};

use super::range::{RangeTracker, SessionStats};
use crate::angle::{format_reading, whole_degrees, AngleCalculator, ArcAnnotation, Measurement};
use crate::classify::{classify, PerformanceBand};
use crate::config::Config;
use crate::error::CatalogError;
use crate::joint::{JointDefinition, JointRegistry};
use crate::pose::LandmarkFrame;
use crate::report::Snapshot;

/// 1関節を選択して測定するセッション
///
/// フレームループを回す唯一の所有者が持つ。選択中の関節の可動域記録は
/// 内部の `RangeTracker` だけが更新する。
#[derive(Debug, Clone)]
pub struct Session {
    registry: JointRegistry,
    calculator: AngleCalculator,
    selected: usize,
    tracker: RangeTracker,
    latest: Option<Measurement>,
}

impl Session {
    pub fn new(
        registry: JointRegistry,
        calculator: AngleCalculator,
        joint_id: &str,
    ) -> Result<Self, CatalogError> {
        let selected = Self::position(&registry, joint_id)?;
        Ok(Self {
            registry,
            calculator,
            selected,
            tracker: RangeTracker::for_joint(joint_id),
            latest: None,
        })
    }

    /// 組み込み + 設定ファイルのカタログで作成
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        config.engine.validate()?;
        let registry = JointRegistry::with_extra(&config.joints)?;
        let calculator =
            AngleCalculator::from_config(&config.engine, config.session.width, config.session.height);
        Self::new(registry, calculator, &config.session.default_joint)
    }

    fn position(registry: &JointRegistry, joint_id: &str) -> Result<usize, CatalogError> {
        registry
            .all()
            .iter()
            .position(|j| j.id() == joint_id)
            .ok_or_else(|| CatalogError::UnknownJoint(joint_id.to_string()))
    }

    pub fn registry(&self) -> &JointRegistry {
        &self.registry
    }

    pub fn calculator(&self) -> &AngleCalculator {
        &self.calculator
    }

    pub fn joint(&self) -> &JointDefinition {
        &self.registry.all()[self.selected]
    }

    /// Switching to another joint clears the recorded range. Re-selecting
    /// the current joint keeps it.
    pub fn select(&mut self, joint_id: &str) -> Result<&JointDefinition, CatalogError> {
        let selected = Self::position(&self.registry, joint_id)?;
        if selected != self.selected {
            self.selected = selected;
            self.tracker.select(joint_id);
            self.latest = None;
            info!(joint = joint_id, "joint selected");
        }
        Ok(self.joint())
    }

    /// 画面サイズ変更（記録は保持）
    pub fn resize(&mut self, width: u32, height: u32) {
        self.calculator = self.calculator.resized(width, height);
    }

    pub fn process(&mut self, frame: &LandmarkFrame) -> &Measurement {
        let measurement = self.calculator.measure(self.joint(), frame);
        self.tracker.observe(&measurement.sample);
        self.latest.insert(measurement)
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.latest = None;
    }

    pub fn stats(&self) -> SessionStats {
        self.tracker.stats()
    }

    pub fn latest(&self) -> Option<&Measurement> {
        self.latest.as_ref()
    }

    pub fn latest_angle(&self) -> Option<f32> {
        self.latest.as_ref().and_then(|m| m.sample.angle)
    }

    /// 最新角度の評価。角度がなければ `None`
    ///
    /// スナップショットと同じく整数に丸めた角度で評価する。
    pub fn classify_latest(&self) -> Option<PerformanceBand> {
        let angle = whole_degrees(self.latest_angle()?);
        Some(classify(angle, self.joint().thresholds().as_ref()))
    }

    pub fn annotation(&self) -> Option<ArcAnnotation> {
        self.latest
            .as_ref()?
            .annotation(self.joint(), self.calculator.projector())
    }

    pub fn reading(&self) -> String {
        format_reading(self.latest_angle(), &self.stats(), self.joint().labels())
    }

    /// 最新フレームが測定できていない場合は `None`
    pub fn capture(&self) -> Option<Snapshot> {
        let measurement = self.latest.as_ref()?;
        let angle = whole_degrees(measurement.sample.angle?);
        let joint = self.joint();
        let thresholds = joint.thresholds();

        let snapshot = Snapshot {
            joint_id: joint.id().to_string(),
            label: joint.label().to_string(),
            angle,
            band: classify(angle, thresholds.as_ref()),
            timestamp_us: measurement.sample.timestamp_us,
            thresholds,
            stats: self.stats(),
        };
        debug!(joint = joint.id(), angle, band = %snapshot.band, "snapshot captured");
        Some(snapshot)
    }
}
