use crate::domain::model::{PollingStatus, RawResponse, RequestCategory};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn cats_url_template(&self) -> &str;
    fn meats_url(&self) -> &str;
    fn poll_interval(&self) -> Duration;
    fn max_dimension(&self) -> u32;
    fn image_content_type(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn output_path(&self) -> Option<&str>;
}

/// 取得某個分類的原始回應
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, category: RequestCategory) -> Result<RawResponse>;
}

#[async_trait]
pub trait Display: Send + Sync {
    /// Toggle which element is visible for the selected category.
    async fn show_category(&self, category: RequestCategory);
    async fn render(&self, category: RequestCategory, value: &str);
    async fn set_status(&self, status: PollingStatus);
}
