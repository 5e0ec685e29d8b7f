//! AI賞析の固定文言
//!
//! プロンプトは製品仕様の一部。短い詩的な一句を中国語で、
//! markdownなしで返させる。

/// 画像1枚に対する賞析プロンプト
pub const DESCRIBE_PROMPT: &str =
    "请分析这张图片，用中文提供一句简短有力的描述，概括主体或氛围，像一句诗或画名。不要使用markdown。";

/// 応答が空だった場合に表示する文言
pub const NO_DESCRIPTION: &str = "暂无描述";

/// 解析失敗時の固定文言。エラーとしては伝播させず、これを説明として付ける
pub const ANALYSIS_FAILED: &str = "无法分析图片";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_requests_plain_text() {
        assert!(DESCRIBE_PROMPT.contains("不要使用markdown"));
    }

    #[test]
    fn test_placeholders_are_distinct() {
        assert_ne!(NO_DESCRIPTION, ANALYSIS_FAILED);
    }
}
