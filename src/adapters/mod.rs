// Adapters layer: concrete implementations for external systems (http, page rendering, storage).

pub mod console;
pub mod http;
pub mod page;
pub mod storage;
