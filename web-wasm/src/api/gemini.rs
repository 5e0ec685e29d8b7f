//! Gemini API連携
//!
//! 画像1枚を送り、一句の描写テキストを受け取る。失敗は固定文言に
//! 畳み込み、仕分けの進行を決して妨げない。リトライ・タイムアウトは
//! 持たない（トランスポート既定のまま）。

use moyun_common::prompts::{ANALYSIS_FAILED, DESCRIBE_PROMPT, NO_DESCRIPTION};
use moyun_common::require_credential;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    /// 速度優先でthinkingは切る
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出。抽出失敗時は"image/jpeg"
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .unwrap_or("image/jpeg")
}

/// Gemini API呼び出し（fetch + JSONパース）
///
/// 候補が空でもエラーにせず空文字を返す。文言の補完は呼び出し側。
async fn call_gemini_api(api_key: &str, request: &GeminiRequest) -> Result<String, JsValue> {
    let url = format!("{}?key={}", GEMINI_API_URL, api_key);
    let body = serde_json::to_string(request).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let response: GeminiResponse = serde_wasm_bindgen::from_value(json)?;

    Ok(response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .unwrap_or_default())
}

/// 画像1枚の賞析
///
/// キー未設定なら送信せずエラー。応答が空なら`NO_DESCRIPTION`。
pub async fn describe_image(
    api_key: &str,
    base64_data: &str,
    mime_type: &str,
) -> Result<String, JsValue> {
    let key = require_credential(api_key).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64_data.to_string(),
                    },
                },
                Part::Text {
                    text: DESCRIBE_PROMPT.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string()],
            thinking_config: ThinkingConfig { thinking_budget: 0 },
        },
    };

    let text = call_gemini_api(key, &request).await?;
    let text = text.trim();
    Ok(if text.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        text.to_string()
    })
}

/// Fileを読み込んで賞析する。あらゆる失敗は`ANALYSIS_FAILED`に畳み込む
pub async fn describe_file(api_key: &str, file: &web_sys::File) -> String {
    match try_describe_file(api_key, file).await {
        Ok(text) => text,
        Err(e) => {
            web_sys::console::error_2(&JsValue::from_str("Gemini analysis error:"), &e);
            ANALYSIS_FAILED.to_string()
        }
    }
}

async fn try_describe_file(api_key: &str, file: &web_sys::File) -> Result<String, JsValue> {
    let data_url = crate::files::read_as_data_url(file).await?;
    let base64_data = extract_base64_from_data_url(&data_url)
        .ok_or_else(|| JsValue::from_str("Invalid data URL"))?;
    let mime_type = extract_mime_type_from_data_url(&data_url);
    describe_image(api_key, base64_data, mime_type).await
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // Data URL抽出テスト
    // =============================================

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(
            extract_base64_from_data_url(data_url),
            Some("/9j/4AAQSkZJRg==")
        );
    }

    #[test]
    fn test_extract_base64_from_data_url_png() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_base64_from_data_url(data_url), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQ";
        assert_eq!(extract_mime_type_from_data_url(data_url), "image/jpeg");
    }

    #[test]
    fn test_extract_mime_type_webp() {
        let data_url = "data:image/webp;base64,UklGR";
        assert_eq!(extract_mime_type_from_data_url(data_url), "image/webp");
    }

    #[test]
    fn test_extract_mime_type_default() {
        // 不正なフォーマットの場合はデフォルト値を返す
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/jpeg");
    }

    // =============================================
    // リクエスト/レスポンス シリアライズテスト
    // =============================================

    #[test]
    fn test_gemini_request_serialize() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: DESCRIBE_PROMPT.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string()],
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseModalities\":[\"TEXT\"]"));
        assert!(json.contains("\"thinkingConfig\":{\"thinkingBudget\":0}"));
    }

    #[test]
    fn test_part_inline_data_serialize() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".to_string(),
                data: "base64data".to_string(),
            },
        };
        let json = serde_json::to_string(&part).expect("シリアライズ失敗");
        assert!(json.contains("\"inline_data\""));
        assert!(json.contains("\"mime_type\":\"image/jpeg\""));
        assert!(json.contains("\"data\":\"base64data\""));
    }

    #[test]
    fn test_gemini_response_deserialize() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "远山含黛，孤舟自横"
                    }]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].content.parts[0].text,
            "远山含黛，孤舟自横"
        );
    }

    #[test]
    fn test_gemini_response_without_candidates() {
        // 候補なしでもパースは失敗しない（文言の補完は呼び出し側）
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": []}"#).expect("デシリアライズ失敗");
        assert!(response.candidates.is_empty());
    }
}
