//! 基本データ型
//!
//! セッションとWeb層で共有される型。`S`はプラットフォーム側の
//! ソースハンドル（ブラウザでは`web_sys::File`、ネイティブテストでは`()`）。

/// 宣言されたメディアタイプが画像かどうか
///
/// フォルダ選択の入力はこの判定を通ったものだけがキューに入る。
/// 画像以外は黙って捨てる（エラーではない）。
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// アプリケーションフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// フォルダ未選択
    Idle,
    /// スワイプ仕分け中
    Sorting,
    /// 結果確認中
    Reviewing,
}

/// 1枚のカードに対する決定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 左スワイプ = 珍藏
    Keep,
    /// 右スワイプ = 舍弃
    Discard,
}

/// 結果画面のタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Kept,
    Discarded,
}

/// フォルダ選択から渡ってくる1ファイル分のメタデータ
///
/// 絞り込み前なので画像以外も混ざりうる。
#[derive(Debug, Clone)]
pub struct SelectedFile<S> {
    pub file_name: String,
    /// 宣言されたメディアタイプ（例: "image/jpeg"）
    pub mime_type: String,
    pub byte_size: f64,
    pub source: S,
}

/// キューに載る画像1枚分のレコード
///
/// `description`以外は作成後不変。`display_handle`は外部資源
/// （Object URL等）で、セッションが解放責任を持つ。
#[derive(Debug, Clone)]
pub struct ImageRecord<S> {
    /// セッション内で一意な不透明ID
    pub id: String,
    pub file_name: String,
    pub mime_type: String,
    pub byte_size: f64,
    /// 描画用の解放可能ハンドル（Object URL）
    pub display_handle: String,
    /// AI賞析の結果。成功・失敗を問わず高々1回だけ設定される
    pub description: Option<String>,
    pub source: S,
}
