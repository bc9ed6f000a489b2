use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 要輪詢哪一種資料
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestCategory {
    #[default]
    Cats,
    Meats,
}

impl RequestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategory::Cats => "cats",
            RequestCategory::Meats => "meats",
        }
    }
}

impl fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestCategory {
    type Err = crate::utils::error::PollerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cats" | "cat" => Ok(RequestCategory::Cats),
            "meats" | "meat" => Ok(RequestCategory::Meats),
            other => Err(crate::utils::error::PollerError::InvalidConfigValueError {
                field: "category".to_string(),
                value: other.to_string(),
                reason: "Expected 'cats' or 'meats'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PollingStatus {
    #[default]
    Idle,
    Started,
    Stopped,
}

impl fmt::Display for PollingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PollingStatus::Idle => "Idle",
            PollingStatus::Started => "Started",
            PollingStatus::Stopped => "Stopped",
        };
        f.write_str(label)
    }
}

/// Raw payload of one feed request, before category-specific mapping.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl RawResponse {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self { bytes, content_type }
    }
}

/// 畫面狀態：圖片、文字、各自是否顯示，以及輪詢狀態列
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub image_src: Option<String>,
    pub text: Option<String>,
    pub image_visible: bool,
    pub text_visible: bool,
    pub status: PollingStatus,
    pub render_count: u64,
    pub last_rendered_at: Option<DateTime<Utc>>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            image_src: None,
            text: None,
            image_visible: true,
            text_visible: false,
            status: PollingStatus::Idle,
            render_count: 0,
            last_rendered_at: None,
        }
    }
}

/// What the last render wrote, persisted when an output directory is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub category: RequestCategory,
    pub value: String,
    pub rendered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub ticks: u64,
    pub renders: u64,
    /// Requests that finished with an error before the next tick or cancel.
    pub failures: u64,
    /// Requests dropped while still pending, by a newer tick or by cancel.
    /// A request that would have failed counts here, not in `failures`,
    /// when it is dropped first.
    pub abandoned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("cats".parse::<RequestCategory>().unwrap(), RequestCategory::Cats);
        assert_eq!(" Meats ".parse::<RequestCategory>().unwrap(), RequestCategory::Meats);
        assert!("dogs".parse::<RequestCategory>().is_err());
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&RequestCategory::Meats).unwrap();
        assert_eq!(json, "\"meats\"");
        let parsed: RequestCategory = serde_json::from_str("\"cats\"").unwrap();
        assert_eq!(parsed, RequestCategory::Cats);
    }

    #[test]
    fn test_default_page_shows_image() {
        let page = Page::default();
        assert!(page.image_visible);
        assert!(!page.text_visible);
        assert_eq!(page.status, PollingStatus::Idle);
        assert_eq!(RequestCategory::default(), RequestCategory::Cats);
    }
}
