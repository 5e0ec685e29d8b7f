//! 墨韵图集 Common Library
//!
//! Web(WASM)層から切り離してテストできる共通ロジック:
//! - session: 仕分けセッションの状態機械
//! - gesture: スワイプ判定の純粋計算
//! - export: 結果リストのテキスト化
//! - prompts: AI賞析の固定プロンプト

pub mod error;
pub mod export;
pub mod gesture;
pub mod prompts;
pub mod session;
pub mod types;

pub use error::{require_credential, Error, Result};
pub use export::{filename_manifest, manifest_file_name};
pub use gesture::{
    decision_for_key, release_outcome, GestureConfig, GestureOutcome, EXIT_DISTANCE,
};
pub use session::{DisplayHandleAllocator, Session};
pub use types::{is_image_media_type, Decision, ImageRecord, Phase, ResultTab, SelectedFile};
