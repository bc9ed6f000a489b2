use crate::domain::model::{RawResponse, RequestCategory};
use crate::domain::ports::{ConfigProvider, FeedSource};
use crate::utils::error::{PollerError, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;

/// 以設定好的網址抓取 cats / meats 兩種資料
pub struct HttpFeedSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpFeedSource<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// 每次請求都用隨機尺寸，這樣每次都會拿到不同的貓
    pub fn target_url(&self, category: RequestCategory) -> String {
        match category {
            RequestCategory::Cats => {
                let max = self.config.max_dimension().max(1);
                let mut rng = rand::thread_rng();
                let w = rng.gen_range(1..=max);
                let h = rng.gen_range(1..=max);
                resolve_template(self.config.cats_url_template(), w, h)
            }
            RequestCategory::Meats => self.config.meats_url().to_string(),
        }
    }
}

pub fn resolve_template(template: &str, width: u32, height: u32) -> String {
    template
        .replace("{w}", &width.to_string())
        .replace("{h}", &height.to_string())
}

#[async_trait]
impl<C: ConfigProvider> FeedSource for HttpFeedSource<C> {
    async fn fetch(&self, category: RequestCategory) -> Result<RawResponse> {
        let url = self.target_url(category);
        tracing::debug!("Making {} request to: {}", category, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(PollerError::UnexpectedStatusError {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(RawResponse::new(bytes.to_vec(), content_type))
    }
}
