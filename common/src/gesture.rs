//! スワイプ判定の純粋計算
//!
//! ポインタイベントからの水平変位だけを入力に取り、描画環境なしで
//! テストできるようにしてある。方向の意味は製品仕様として固定:
//! 左（負方向）= 珍藏、右（正方向）= 舍弃。

use crate::types::Decision;

/// コミット閾値のデフォルト（スクリーン単位の水平変位）
pub const DEFAULT_COMMIT_THRESHOLD: f64 = 100.0;

/// 退場アニメーションの目標変位
pub const EXIT_DISTANCE: f64 = 500.0;

/// ジェスチャー設定
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// この絶対値以上の変位で指を離すとコミット
    pub commit_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_threshold: DEFAULT_COMMIT_THRESHOLD,
        }
    }
}

/// 指を離した時点の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// 閾値を越えた。決定を確定して退場アニメーションへ
    Commit(Decision),
    /// 閾値内。中央へ戻して何もしない
    Revert,
}

/// 指を離した時点の水平変位から結果を判定する
///
/// 閾値ちょうどはコミット扱い（以上、ではなく超過ではない）。
pub fn release_outcome(dx: f64, config: &GestureConfig) -> GestureOutcome {
    if dx <= -config.commit_threshold {
        GestureOutcome::Commit(Decision::Keep)
    } else if dx >= config.commit_threshold {
        GestureOutcome::Commit(Decision::Discard)
    } else {
        GestureOutcome::Revert
    }
}

/// キーボード相当の操作。左矢印=珍藏、右矢印=舍弃
pub fn decision_for_key(key: &str) -> Option<Decision> {
    match key {
        "ArrowLeft" => Some(Decision::Keep),
        "ArrowRight" => Some(Decision::Discard),
        _ => None,
    }
}

/// 変位に応じたカードの回転角（度）。[-200, 200] → [-15, 15]
pub fn rotation_deg(dx: f64) -> f64 {
    map_clamped(dx, (-200.0, 200.0), (-15.0, 15.0))
}

/// 珍藏側（左）オーバーレイの不透明度。[-150, -20] → [1, 0]
pub fn keep_overlay_opacity(dx: f64) -> f64 {
    map_clamped(dx, (-150.0, -20.0), (1.0, 0.0))
}

/// 舍弃側（右）オーバーレイの不透明度。[20, 150] → [0, 1]
pub fn discard_overlay_opacity(dx: f64) -> f64 {
    map_clamped(dx, (20.0, 150.0), (0.0, 1.0))
}

/// 線形補間。入力区間の外はクランプ
fn map_clamped(x: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let t = ((x - from.0) / (from.1 - from.0)).clamp(0.0, 1.0);
    to.0 + t * (to.1 - to.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_left_past_threshold_keeps() {
        let config = GestureConfig::default();
        assert_eq!(
            release_outcome(-150.0, &config),
            GestureOutcome::Commit(Decision::Keep)
        );
    }

    #[test]
    fn test_release_right_past_threshold_discards() {
        let config = GestureConfig::default();
        assert_eq!(
            release_outcome(250.0, &config),
            GestureOutcome::Commit(Decision::Discard)
        );
    }

    #[test]
    fn test_release_exactly_at_threshold_commits() {
        let config = GestureConfig::default();
        assert_eq!(
            release_outcome(-100.0, &config),
            GestureOutcome::Commit(Decision::Keep)
        );
        assert_eq!(
            release_outcome(100.0, &config),
            GestureOutcome::Commit(Decision::Discard)
        );
    }

    #[test]
    fn test_release_inside_band_reverts() {
        let config = GestureConfig::default();
        assert_eq!(release_outcome(-99.9, &config), GestureOutcome::Revert);
        assert_eq!(release_outcome(0.0, &config), GestureOutcome::Revert);
        assert_eq!(release_outcome(99.9, &config), GestureOutcome::Revert);
    }

    #[test]
    fn test_release_respects_custom_threshold() {
        let config = GestureConfig {
            commit_threshold: 40.0,
        };
        assert_eq!(
            release_outcome(-40.0, &config),
            GestureOutcome::Commit(Decision::Keep)
        );
        assert_eq!(release_outcome(39.0, &config), GestureOutcome::Revert);
    }

    #[test]
    fn test_decision_for_key_arrows() {
        assert_eq!(decision_for_key("ArrowLeft"), Some(Decision::Keep));
        assert_eq!(decision_for_key("ArrowRight"), Some(Decision::Discard));
    }

    #[test]
    fn test_decision_for_key_others_ignored() {
        assert_eq!(decision_for_key("ArrowUp"), None);
        assert_eq!(decision_for_key("Enter"), None);
        assert_eq!(decision_for_key(""), None);
    }

    #[test]
    fn test_rotation_center_is_zero() {
        assert_eq!(rotation_deg(0.0), 0.0);
    }

    #[test]
    fn test_rotation_clamps_at_extremes() {
        assert_eq!(rotation_deg(-200.0), -15.0);
        assert_eq!(rotation_deg(200.0), 15.0);
        assert_eq!(rotation_deg(-1000.0), -15.0);
        assert_eq!(rotation_deg(1000.0), 15.0);
    }

    #[test]
    fn test_rotation_is_linear_inside_range() {
        assert!((rotation_deg(100.0) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_keep_overlay_fades_in_leftward() {
        assert_eq!(keep_overlay_opacity(0.0), 0.0);
        assert_eq!(keep_overlay_opacity(-20.0), 0.0);
        assert_eq!(keep_overlay_opacity(-150.0), 1.0);
        assert_eq!(keep_overlay_opacity(-400.0), 1.0);
    }

    #[test]
    fn test_discard_overlay_fades_in_rightward() {
        assert_eq!(discard_overlay_opacity(0.0), 0.0);
        assert_eq!(discard_overlay_opacity(20.0), 0.0);
        assert_eq!(discard_overlay_opacity(150.0), 1.0);
        assert_eq!(discard_overlay_opacity(400.0), 1.0);
    }

    #[test]
    fn test_overlays_are_mutually_exclusive() {
        // 片方向に動いている間、逆側のスタンプは出ない
        assert_eq!(discard_overlay_opacity(-120.0), 0.0);
        assert_eq!(keep_overlay_opacity(120.0), 0.0);
    }
}
