use crate::core::mappers::map_response;
use crate::core::{Display, FeedSource, PollSummary, PollingStatus, RequestCategory};
use crate::utils::error::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

type InFlight<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Timer-driven fetch loop. Fetches immediately, then once per interval,
/// until the cancellation token fires.
pub struct Poller<S: FeedSource, D: Display> {
    source: Arc<S>,
    display: Arc<D>,
    interval: Duration,
    image_content_type: String,
}

impl<S: FeedSource, D: Display> Clone for Poller<S, D> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            display: Arc::clone(&self.display),
            interval: self.interval,
            image_content_type: self.image_content_type.clone(),
        }
    }
}

impl<S: FeedSource, D: Display> Poller<S, D> {
    pub fn new(source: Arc<S>, display: Arc<D>, interval: Duration) -> Self {
        Self {
            source,
            display,
            interval,
            image_content_type: DEFAULT_IMAGE_CONTENT_TYPE.to_string(),
        }
    }

    pub fn with_image_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.image_content_type = content_type.into();
        self
    }

    pub fn display(&self) -> &Arc<D> {
        &self.display
    }

    async fn fetch_and_map(&self, category: RequestCategory) -> Result<String> {
        let raw = self.source.fetch(category).await?;
        let value = map_response(category, &raw, &self.image_content_type)?;
        tracing::debug!("Request result for {}: {} chars", category, value.len());
        Ok(value)
    }

    /// 執行輪詢直到被取消；結束時一定會把狀態設為 Stopped
    pub async fn run(&self, category: RequestCategory, cancel: CancellationToken) -> PollSummary {
        let mut summary = PollSummary::default();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight: Option<InFlight<'_>> = None;

        tracing::info!(
            "🔁 Polling {} every {:?}",
            category,
            self.interval
        );

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    if in_flight.take().is_some() {
                        summary.abandoned += 1;
                        tracing::debug!("Abandoned in-flight {} request on cancel", category);
                    }
                    break;
                }

                result = async {
                    match in_flight.as_mut() {
                        Some(request) => request.await,
                        None => std::future::pending().await,
                    }
                } => {
                    in_flight = None;
                    match result {
                        Ok(value) => {
                            self.display.render(category, &value).await;
                            summary.renders += 1;
                        }
                        Err(e) => {
                            summary.failures += 1;
                            tracing::warn!("⚠️ {} request failed: {}", category, e);
                        }
                    }
                }

                _ = ticker.tick() => {
                    summary.ticks += 1;
                    // 已完成的回應先處理，新的 tick 只取代仍在等待的請求
                    if in_flight.replace(Box::pin(self.fetch_and_map(category))).is_some() {
                        summary.abandoned += 1;
                        tracing::debug!("Superseded slow {} request", category);
                    }
                }
            }
        }

        self.display.set_status(PollingStatus::Stopped).await;
        tracing::info!(
            "⏹️ Polling {} stopped (ticks: {}, renders: {}, failures: {}, abandoned: {})",
            category,
            summary.ticks,
            summary.renders,
            summary.failures,
            summary.abandoned
        );
        summary
    }
}
