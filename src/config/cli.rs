use crate::config::toml_config::TomlConfig;
use crate::config::PollerSettings;
use crate::domain::model::RequestCategory;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "feed-poller")]
#[command(about = "Poll the cats image feed or the meats text feed and render the latest result")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Category selected at startup (cats or meats)
    #[arg(long)]
    pub category: Option<RequestCategory>,

    /// Seconds between two requests
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Image feed URL template, {w} and {h} are replaced with random sizes
    #[arg(long)]
    pub cats_url: Option<String>,

    #[arg(long)]
    pub meats_url: Option<String>,

    /// Upper bound for the random image width and height
    #[arg(long)]
    pub max_dimension: Option<u32>,

    /// Media type used for image data URLs when the response has none
    #[arg(long)]
    pub image_content_type: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory where the last rendered value is saved as snapshot.json
    #[arg(long)]
    pub output_path: Option<String>,

    /// Start polling right away instead of waiting for the start command
    #[arg(long)]
    pub autostart: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 預設值 → 設定檔 → 命令列，後者覆蓋前者
    pub fn resolve(&self) -> Result<PollerSettings> {
        let mut settings = PollerSettings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings.apply_file(&file);
        }

        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut PollerSettings) {
        if let Some(category) = self.category {
            settings.initial_category = category;
        }
        if let Some(interval) = self.interval_secs {
            settings.interval_seconds = interval;
        }
        if let Some(cats_url) = &self.cats_url {
            settings.cats_url = cats_url.clone();
        }
        if let Some(meats_url) = &self.meats_url {
            settings.meats_url = meats_url.clone();
        }
        if let Some(max_dimension) = self.max_dimension {
            settings.max_dimension = max_dimension;
        }
        if let Some(content_type) = &self.image_content_type {
            settings.image_content_type = content_type.clone();
        }
        if self.timeout_secs.is_some() {
            settings.timeout_seconds = self.timeout_secs;
        }
        if self.output_path.is_some() {
            settings.output_path = self.output_path.clone();
        }
        if self.autostart {
            settings.autostart = true;
        }
    }
}
