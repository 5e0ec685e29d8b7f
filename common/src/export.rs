//! 結果リストのエクスポート
//!
//! 選択中タブのファイル名一覧を改行区切りのテキストにする。
//! ダウンロード自体（Blob生成とクリック）はWeb層の仕事。

use crate::types::ResultTab;

/// ファイル名一覧をマニフェストテキストにする
///
/// 1行1ファイル名、末尾は必ず単一の改行で終わる。空リストは`None`
/// （エクスポート無効、成果物なし）。
pub fn filename_manifest<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// ダウンロード成果物のファイル名（アクティブなタブに従う）
pub fn manifest_file_name(tab: ResultTab) -> &'static str {
    match tab {
        ResultTab::Kept => "珍藏清单.txt",
        ResultTab::Discarded => "舍弃清单.txt",
    }
}
