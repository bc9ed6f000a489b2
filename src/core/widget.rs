use crate::core::poller::Poller;
use crate::core::{Display, FeedSource, PollSummary, PollingStatus, RequestCategory};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct ActivePoll {
    category: RequestCategory,
    cancel: CancellationToken,
    handle: JoinHandle<PollSummary>,
}

/// 切換 cats / meats 並控制輪詢的元件
pub struct FeedWidget<S: FeedSource + 'static, D: Display + 'static> {
    poller: Poller<S, D>,
    category: RequestCategory,
    active: Option<ActivePoll>,
}

impl<S: FeedSource + 'static, D: Display + 'static> FeedWidget<S, D> {
    pub fn new(source: S, display: D, interval: Duration) -> Self {
        Self::from_poller(Poller::new(Arc::new(source), Arc::new(display), interval))
    }

    pub fn from_poller(poller: Poller<S, D>) -> Self {
        Self {
            poller,
            category: RequestCategory::default(),
            active: None,
        }
    }

    pub fn category(&self) -> RequestCategory {
        self.category
    }

    pub fn display(&self) -> &Arc<D> {
        self.poller.display()
    }

    pub fn is_polling(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Category currently being polled, if any.
    pub fn polling_category(&self) -> Option<RequestCategory> {
        self.active.as_ref().map(|active| active.category)
    }

    /// Switch category. A loop polling a different category is cancelled and
    /// awaited, so the status already reads "Stopped" when this returns.
    pub async fn select_category(&mut self, category: RequestCategory) -> Option<PollSummary> {
        self.category = category;
        self.poller.display().show_category(category).await;
        tracing::info!("Category selected: {}", category);

        let switched_away = self
            .active
            .as_ref()
            .is_some_and(|active| active.category != category);
        if switched_away {
            self.stop().await
        } else {
            None
        }
    }

    /// Start polling the current category. Any loop already running is stopped first.
    pub async fn start(&mut self) -> Option<PollSummary> {
        let previous = self.stop().await;

        self.poller.display().set_status(PollingStatus::Started).await;

        let category = self.category;
        let cancel = CancellationToken::new();
        let poller = self.poller.clone();
        let handle = tokio::spawn({
            let cancel = cancel.clone();
            async move { poller.run(category, cancel).await }
        });

        self.active = Some(ActivePoll {
            category,
            cancel,
            handle,
        });
        previous
    }

    /// 停止輪詢；沒有在輪詢時什麼都不做
    pub async fn stop(&mut self) -> Option<PollSummary> {
        let active = self.active.take()?;
        active.cancel.cancel();

        match active.handle.await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::error!("❌ Polling task for {} ended abnormally: {}", active.category, e);
                None
            }
        }
    }

    pub async fn shutdown(mut self) -> Option<PollSummary> {
        self.stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::page::PageDisplay;
    use crate::core::poller::tests::MockSource;

    fn widget(source: MockSource) -> FeedWidget<MockSource, PageDisplay> {
        FeedWidget::new(source, PageDisplay::new(), Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_sets_status_and_renders_current_category() {
        let mut widget = widget(MockSource::new());
        widget.select_category(RequestCategory::Meats).await;
        assert!(widget.start().await.is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        let page = widget.display().snapshot();
        assert_eq!(page.status, PollingStatus::Started);
        assert_eq!(page.text.as_deref(), Some("meat-1"));
        assert!(page.text_visible);
        assert!(widget.is_polling());
        assert_eq!(widget.polling_category(), Some(RequestCategory::Meats));

        let summary = widget.stop().await.unwrap();
        assert_eq!(summary.renders, 1);
        assert_eq!(widget.display().snapshot().status, PollingStatus::Stopped);
        assert!(!widget.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_category_cancels_polling() {
        let mut widget = widget(MockSource::new());
        widget.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let summary = widget.select_category(RequestCategory::Meats).await;
        assert!(summary.is_some());
        assert!(!widget.is_polling());

        let page = widget.display().snapshot();
        assert_eq!(page.status, PollingStatus::Stopped);
        assert!(page.image_src.is_some());
        assert!(page.text.is_none());
        assert!(!page.image_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selecting_same_category_keeps_polling() {
        let mut widget = widget(MockSource::new());
        widget.start().await;

        assert!(widget.select_category(RequestCategory::Cats).await.is_none());
        assert!(widget.is_polling());

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        assert_eq!(widget.display().snapshot().render_count, 2);
        assert_eq!(widget.display().snapshot().status, PollingStatus::Started);

        widget.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_when_idle_is_noop() {
        let mut widget = widget(MockSource::new());
        assert!(widget.stop().await.is_none());
        assert_eq!(widget.display().snapshot().status, PollingStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_running_loop() {
        let mut widget = widget(MockSource::new());
        widget.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let previous = widget.start().await;
        assert_eq!(previous.map(|s| s.renders), Some(1));
        assert_eq!(widget.display().snapshot().status, PollingStatus::Started);
        assert!(widget.is_polling());

        widget.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_abandons_in_flight_request() {
        let mut widget = widget(MockSource::new().with_delay(Duration::from_secs(3)));
        widget.select_category(RequestCategory::Meats).await;
        widget.start().await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        let summary = widget.stop().await.unwrap();
        assert_eq!(summary.abandoned, 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(widget.display().snapshot().text.is_none());
    }
}
