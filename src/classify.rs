use std::fmt;

use serde::{Deserialize, Serialize};

use crate::joint::Thresholds;

/// 角度の評価バンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceBand {
    Good,
    Fair,
    Poor,
    VeryPoor,
    Unrated,
}

impl PerformanceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceBand::Good => "Good",
            PerformanceBand::Fair => "Fair",
            PerformanceBand::Poor => "Poor",
            PerformanceBand::VeryPoor => "Very Poor",
            PerformanceBand::Unrated => "Not Rated",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds are inclusive: `angle == good` is Good.
pub fn classify(angle: f32, thresholds: Option<&Thresholds>) -> PerformanceBand {
    let Some(t) = thresholds else {
        return PerformanceBand::Unrated;
    };
    if angle >= t.good {
        PerformanceBand::Good
    } else if angle >= t.fair {
        PerformanceBand::Fair
    } else if angle >= t.poor {
        PerformanceBand::Poor
    } else {
        PerformanceBand::VeryPoor
    }
}
