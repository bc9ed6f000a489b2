use crate::adapters::page::PageDisplay;
use crate::domain::model::{Page, PollingStatus, RequestCategory, Snapshot};
use crate::domain::ports::{Display, Storage};
use async_trait::async_trait;
use chrono::Utc;

pub const SNAPSHOT_FILE: &str = "snapshot.json";

const PREVIEW_CHARS: usize = 64;

/// 終端機版的畫面：更新記憶體中的 Page，同時印到 stdout，
/// 有設定輸出目錄時再把最後一次結果寫成 snapshot.json
pub struct ConsoleDisplay<S: Storage> {
    page: PageDisplay,
    storage: Option<S>,
}

impl<S: Storage> ConsoleDisplay<S> {
    pub fn new(storage: Option<S>) -> Self {
        Self {
            page: PageDisplay::new(),
            storage,
        }
    }

    pub fn snapshot(&self) -> Page {
        self.page.snapshot()
    }

    async fn save_snapshot(&self, category: RequestCategory, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };

        let snapshot = Snapshot {
            category,
            value: value.to_string(),
            rendered_at: Utc::now(),
        };

        let data = match serde_json::to_vec_pretty(&snapshot) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to encode snapshot: {}", e);
                return;
            }
        };

        match storage.write_file(SNAPSHOT_FILE, &data).await {
            Ok(()) => tracing::debug!("Snapshot written ({} bytes)", data.len()),
            Err(e) => tracing::warn!("⚠️ Failed to write snapshot: {}", e),
        }
    }
}

/// Shorten long values (image data URLs) for terminal output.
pub fn preview(value: &str) -> String {
    let total = value.chars().count();
    if total <= PREVIEW_CHARS {
        return value.to_string();
    }
    let head: String = value.chars().take(PREVIEW_CHARS).collect();
    format!("{}… ({} chars)", head, total)
}

#[async_trait]
impl<S: Storage> Display for ConsoleDisplay<S> {
    async fn show_category(&self, category: RequestCategory) {
        self.page.show_category(category).await;
        match category {
            RequestCategory::Cats => println!("🐱 Showing cats (image visible, text hidden)"),
            RequestCategory::Meats => println!("🥓 Showing meats (text visible, image hidden)"),
        }
    }

    async fn render(&self, category: RequestCategory, value: &str) {
        self.page.render(category, value).await;
        match category {
            RequestCategory::Cats => println!("🖼️  cat: {}", preview(value)),
            RequestCategory::Meats => println!("📝 text: {}", value),
        }
        self.save_snapshot(category, value).await;
    }

    async fn set_status(&self, status: PollingStatus) {
        self.page.set_status(status).await;
        println!("📡 polling-status: {}", status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_preview_truncates_long_values() {
        assert_eq!(preview("short"), "short");

        let long = format!("data:image/png;base64,{}", "A".repeat(200));
        let shown = preview(&long);
        assert!(shown.starts_with("data:image/png;base64,"));
        assert!(shown.ends_with("(222 chars)"));
    }

    #[tokio::test]
    async fn test_render_writes_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let display = ConsoleDisplay::new(Some(storage));

        display.render(RequestCategory::Meats, "Bacon ipsum").await;

        let data = std::fs::read(temp_dir.path().join(SNAPSHOT_FILE)).unwrap();
        let snapshot: Snapshot = serde_json::from_slice(&data).unwrap();
        assert_eq!(snapshot.category, RequestCategory::Meats);
        assert_eq!(snapshot.value, "Bacon ipsum");
        assert_eq!(display.snapshot().text.as_deref(), Some("Bacon ipsum"));
    }

    #[tokio::test]
    async fn test_no_storage_means_no_snapshot() {
        let display: ConsoleDisplay<LocalStorage> = ConsoleDisplay::new(None);
        display.render(RequestCategory::Cats, "data:image/png;base64,AA==").await;
        display.set_status(PollingStatus::Stopped).await;

        let page = display.snapshot();
        assert_eq!(page.render_count, 1);
        assert_eq!(page.status, PollingStatus::Stopped);
    }
}
