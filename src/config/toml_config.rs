use crate::domain::model::RequestCategory;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔格式，所有欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub poller: Option<PollerSection>,
    pub feeds: Option<FeedsSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollerSection {
    pub interval_seconds: Option<u64>,
    pub initial_category: Option<RequestCategory>,
    pub autostart: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedsSection {
    pub cats_url: Option<String>,
    pub meats_url: Option<String>,
    pub max_dimension: Option<u32>,
    pub image_content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${FEED_HOST})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::{validate_path, validate_positive_number, validate_url, validate_url_template};

        if let Some(poller) = &self.poller {
            if let Some(interval) = poller.interval_seconds {
                validate_positive_number("poller.interval_seconds", interval, 1)?;
            }
            if let Some(timeout) = poller.timeout_seconds {
                validate_positive_number("poller.timeout_seconds", timeout, 1)?;
            }
        }

        if let Some(feeds) = &self.feeds {
            if let Some(cats_url) = &feeds.cats_url {
                validate_url_template("feeds.cats_url", cats_url)?;
            }
            if let Some(meats_url) = &feeds.meats_url {
                validate_url("feeds.meats_url", meats_url)?;
            }
        }

        if let Some(output) = &self.output {
            validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}
