//! Snapshot capture records and the session report built from them.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::PerformanceBand;
use crate::error::ReportError;
use crate::joint::Thresholds;
use crate::tracker::SessionStats;

/// キャプチャ時点の測定記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub joint_id: String,
    pub label: String,
    /// 整数に丸めた角度（評価もこの値で行う）
    pub angle: f32,
    pub band: PerformanceBand,
    pub timestamp_us: u64,
    pub thresholds: Option<Thresholds>,
    pub stats: SessionStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub patient: String,
    pub session_date: String,
    pub snapshots: Vec<Snapshot>,
}

impl SessionReport {
    pub fn new(patient: &str, session_date: &str) -> Self {
        Self {
            patient: patient.to_string(),
            session_date: session_date.to_string(),
            snapshots: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!(
            path = %path.as_ref().display(),
            snapshots = self.snapshots.len(),
            "session report saved"
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 表紙 + スナップショットごとのブロック
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patient = if self.patient.trim().is_empty() {
            "Unnamed"
        } else {
            self.patient.as_str()
        };

        writeln!(f, "Joint Movement Session Report")?;
        writeln!(f, "Patient: {}", patient)?;
        writeln!(f, "Date: {}", self.session_date)?;
        writeln!(f, "Snapshots captured: {}", self.snapshots.len())?;

        for (i, shot) in self.snapshots.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "--- {} ---", i + 1)?;
            writeln!(f, "Measurement: {}", shot.label)?;
            writeln!(f, "Angle: {}°", shot.angle)?;
            writeln!(f, "Performance: {}", shot.band)?;
            writeln!(f, "Timestamp: {:.3} s", shot.timestamp_us as f64 / 1_000_000.0)?;
            if let Some(t) = shot.thresholds {
                writeln!(
                    f,
                    "Target Ranges: Good >= {}°, Fair >= {}°, Poor >= {}°",
                    t.good, t.fair, t.poor
                )?;
            }
        }
        Ok(())
    }
}
