use crate::domain::model::{RawResponse, RequestCategory};
use crate::utils::error::{PollerError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// 把圖片位元組轉成 `data:` URL，可直接當作圖片來源
pub fn map_cats(bytes: &[u8], content_type: &str) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// 解析 JSON 陣列並取第一個元素；`null` 或空陣列回傳空字串
pub fn map_meats(body: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(body).map_err(|e| PollerError::MappingError {
        category: RequestCategory::Meats,
        message: format!("body is not valid UTF-8: {}", e),
    })?;

    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| PollerError::MappingError {
            category: RequestCategory::Meats,
            message: format!("body is not valid JSON: {}", e),
        })?;

    match parsed {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Array(items) => Ok(match items.into_iter().next() {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }),
        other => Err(PollerError::MappingError {
            category: RequestCategory::Meats,
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

/// 圖片型別優先採用回應標頭，不是 image/* 時退回預設值
pub fn image_content_type<'a>(raw: &'a RawResponse, fallback: &'a str) -> &'a str {
    raw.content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or(fallback)
}

pub fn map_response(
    category: RequestCategory,
    raw: &RawResponse,
    default_image_type: &str,
) -> Result<String> {
    match category {
        // 標頭不是 image/* 時退回 image/png，與原本一律當 PNG 的行為一致
        RequestCategory::Cats => Ok(map_cats(
            &raw.bytes,
            image_content_type(raw, default_image_type),
        )),
        RequestCategory::Meats => map_meats(&raw.bytes),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_cats_builds_data_url() {
        let bytes = [0x89, b'P', b'N', b'G'];
        let url = map_cats(&bytes, "image/png");
        assert_eq!(url, "data:image/png;base64,iVBORw==");

        let encoded = url.trim_start_matches("data:image/png;base64,");
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_map_meats_takes_first_paragraph() {
        let body = br#"["Bacon ipsum dolor amet.", "Second paragraph."]"#;
        assert_eq!(map_meats(body).unwrap(), "Bacon ipsum dolor amet.");
    }

    #[test]
    fn test_map_meats_null_and_empty() {
        assert_eq!(map_meats(b"null").unwrap(), "");
        assert_eq!(map_meats(b"[]").unwrap(), "");
        assert_eq!(map_meats(b"[null, \"x\"]").unwrap(), "");
    }

    #[test]
    fn test_map_meats_non_string_element() {
        assert_eq!(map_meats(b"[42]").unwrap(), "42");
    }

    #[test]
    fn test_map_meats_rejects_objects_and_garbage() {
        let err = map_meats(br#"{"text": "nope"}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
        assert!(map_meats(b"not json").is_err());
        assert!(map_meats(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_image_content_type_prefers_image_header() {
        let jpeg = RawResponse::new(vec![], Some("image/jpeg; charset=binary".to_string()));
        assert_eq!(image_content_type(&jpeg, "image/png"), "image/jpeg");

        let html = RawResponse::new(vec![], Some("text/html".to_string()));
        assert_eq!(image_content_type(&html, "image/png"), "image/png");

        let missing = RawResponse::new(vec![], None);
        assert_eq!(image_content_type(&missing, "image/png"), "image/png");
    }

    #[test]
    fn test_map_response_dispatches_on_category() {
        let raw = RawResponse::new(br#"["meat"]"#.to_vec(), Some("application/json".to_string()));
        assert_eq!(
            map_response(RequestCategory::Meats, &raw, "image/png").unwrap(),
            "meat"
        );
        assert!(map_response(RequestCategory::Cats, &raw, "image/png")
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }
}
