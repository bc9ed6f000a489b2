pub mod mappers;
pub mod poller;
pub mod widget;

pub use crate::domain::model::{PollSummary, PollingStatus, RawResponse, RequestCategory};
pub use crate::domain::ports::{ConfigProvider, Display, FeedSource, Storage};
pub use crate::utils::error::Result;
