pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{console::ConsoleDisplay, http::HttpFeedSource, page::PageDisplay, storage::LocalStorage};
pub use crate::config::PollerSettings;
pub use crate::core::{poller::Poller, widget::FeedWidget};
pub use crate::domain::model::{Page, PollSummary, PollingStatus, RequestCategory};
pub use crate::utils::error::{PollerError, Result};
