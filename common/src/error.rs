//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 解析失敗（AnalysisFailure）はここに含めない。リモート呼び出しの
/// 失敗は呼び出し側で固定文言に畳み込まれ、エラーとして伝播しない。
#[derive(Error, Debug)]
pub enum Error {
    /// 選択フォルダに画像が1枚も含まれていない
    #[error("no image files in selection")]
    EmptySelection,

    /// APIキー未設定のまま解析を要求した
    #[error("API key not configured")]
    Unconfigured,

    /// 状態機械の不正遷移（プログラミングエラー、ユーザーには見せない）
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 資格情報（APIキー)が使える状態か検証する
///
/// 空または空白のみなら`Error::Unconfigured`。リクエストは送らない。
pub fn require_credential(key: &str) -> Result<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        Err(Error::Unconfigured)
    } else {
        Ok(trimmed)
    }
}
