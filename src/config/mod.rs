#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::poller::DEFAULT_IMAGE_CONTENT_TYPE;
use crate::domain::model::RequestCategory;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PollerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, validate_url_template, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_CATS_URL: &str = "https://placekitten.com/g/{w}/{h}";
pub const DEFAULT_MEATS_URL: &str = "https://baconipsum.com/api/?type=meat-and-filler";
pub const DEFAULT_INTERVAL_SECONDS: u64 = 5;
pub const DEFAULT_MAX_DIMENSION: u32 = 400;
pub const MAX_DIMENSION_LIMIT: u32 = 4096;

/// 合併預設值、設定檔與命令列後的最終設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollerSettings {
    pub initial_category: RequestCategory,
    pub interval_seconds: u64,
    pub autostart: bool,
    pub cats_url: String,
    pub meats_url: String,
    pub max_dimension: u32,
    pub image_content_type: String,
    pub timeout_seconds: Option<u64>,
    pub output_path: Option<String>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            initial_category: RequestCategory::default(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            autostart: false,
            cats_url: DEFAULT_CATS_URL.to_string(),
            meats_url: DEFAULT_MEATS_URL.to_string(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            image_content_type: DEFAULT_IMAGE_CONTENT_TYPE.to_string(),
            timeout_seconds: None,
            output_path: None,
        }
    }
}

impl PollerSettings {
    /// Overlay every value present in the file onto these settings.
    pub fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(poller) = &file.poller {
            if let Some(interval) = poller.interval_seconds {
                self.interval_seconds = interval;
            }
            if let Some(category) = poller.initial_category {
                self.initial_category = category;
            }
            if let Some(autostart) = poller.autostart {
                self.autostart = autostart;
            }
            if poller.timeout_seconds.is_some() {
                self.timeout_seconds = poller.timeout_seconds;
            }
        }

        if let Some(feeds) = &file.feeds {
            if let Some(cats_url) = &feeds.cats_url {
                self.cats_url = cats_url.clone();
            }
            if let Some(meats_url) = &feeds.meats_url {
                self.meats_url = meats_url.clone();
            }
            if let Some(max_dimension) = feeds.max_dimension {
                self.max_dimension = max_dimension;
            }
            if let Some(content_type) = &feeds.image_content_type {
                self.image_content_type = content_type.clone();
            }
        }

        if let Some(output) = &file.output {
            self.output_path = Some(output.path.clone());
        }
    }
}

impl ConfigProvider for PollerSettings {
    fn cats_url_template(&self) -> &str {
        &self.cats_url
    }

    fn meats_url(&self) -> &str {
        &self.meats_url
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn image_content_type(&self) -> &str {
        &self.image_content_type
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

impl Validate for PollerSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("interval_seconds", self.interval_seconds, 1)?;
        validate_url_template("cats_url", &self.cats_url)?;
        validate_url("meats_url", &self.meats_url)?;
        validate_range("max_dimension", self.max_dimension, 1, MAX_DIMENSION_LIMIT)?;

        validate_non_empty_string("image_content_type", &self.image_content_type)?;
        if !self.image_content_type.starts_with("image/") {
            return Err(PollerError::InvalidConfigValueError {
                field: "image_content_type".to_string(),
                value: self.image_content_type.clone(),
                reason: "Must be an image/* media type".to_string(),
            });
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }

        Ok(())
    }
}
