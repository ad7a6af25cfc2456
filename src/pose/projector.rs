use serde::{Deserialize, Serialize};

use super::landmark::Landmark;

/// 可視判定のデフォルト閾値（これを超える信頼度のみ可視）
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.7;

/// スクリーン座標（ピクセル）の点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, visible: true }
    }

    /// 検出されなかった点
    pub fn missing() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visible: false,
        }
    }
}

/// 正規化座標 → スクリーン座標
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    width: f32,
    height: f32,
    visibility_threshold: f32,
}

impl Projector {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_threshold(width, height, DEFAULT_VISIBILITY_THRESHOLD)
    }

    pub fn with_threshold(width: u32, height: u32, visibility_threshold: f32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            visibility_threshold,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn visibility_threshold(&self) -> f32 {
        self.visibility_threshold
    }

    /// 同じ閾値で画面サイズだけ変更
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self::with_threshold(width, height, self.visibility_threshold)
    }

    /// ランドマークが欠けている場合は不可視の点を返す
    pub fn project(&self, landmark: Option<&Landmark>) -> Point2D {
        match landmark {
            Some(lm) => Point2D {
                x: lm.x * self.width,
                y: lm.y * self.height,
                visible: lm.is_visible(self.visibility_threshold),
            },
            None => Point2D::missing(),
        }
    }
}

/// デフォルト閾値で1点を射影
pub fn project(landmark: &Landmark, width: u32, height: u32) -> Point2D {
    Projector::new(width, height).project(Some(landmark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_scales_to_pixels() {
        let p = project(&Landmark::new(0.5, 0.25), 640, 480);
        assert_eq!(p.x, 320.0);
        assert_eq!(p.y, 120.0);
        assert!(p.visible);
    }

    #[test]
    fn test_low_confidence_is_hidden() {
        let p = project(&Landmark::with_visibility(0.5, 0.5, 0.5), 100, 100);
        assert!(!p.visible);
        // 閾値ちょうどは不可視
        let p = project(&Landmark::with_visibility(0.5, 0.5, 0.7), 100, 100);
        assert!(!p.visible);
    }

    #[test]
    fn test_missing_landmark() {
        let projector = Projector::new(640, 480);
        assert!(!projector.project(None).visible);
    }

    #[test]
    fn test_custom_threshold() {
        let projector = Projector::with_threshold(10, 10, 0.3);
        let p = projector.project(Some(&Landmark::with_visibility(0.1, 0.1, 0.5)));
        assert!(p.visible);

        let resized = projector.resized(200, 50);
        assert_eq!(resized.visibility_threshold(), 0.3);
        let p = resized.project(Some(&Landmark::new(0.5, 0.5)));
        assert_eq!((p.x, p.y), (100.0, 25.0));
    }
}
