use crate::domain::model::{Page, PollingStatus, RequestCategory};
use crate::domain::ports::Display;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

/// In-memory page: the image element, the text element and the status line.
#[derive(Debug, Default)]
pub struct PageDisplay {
    page: Mutex<Page>,
}

impl PageDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Page {
        self.lock().clone()
    }

    // 毒化的鎖仍然可以讀寫畫面狀態
    fn lock(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Display for PageDisplay {
    async fn show_category(&self, category: RequestCategory) {
        let mut page = self.lock();
        page.image_visible = category == RequestCategory::Cats;
        page.text_visible = category == RequestCategory::Meats;
    }

    async fn render(&self, category: RequestCategory, value: &str) {
        let mut page = self.lock();
        match category {
            RequestCategory::Cats => page.image_src = Some(value.to_string()),
            RequestCategory::Meats => page.text = Some(value.to_string()),
        }
        page.render_count += 1;
        page.last_rendered_at = Some(Utc::now());
    }

    async fn set_status(&self, status: PollingStatus) {
        self.lock().status = status;
    }
}
