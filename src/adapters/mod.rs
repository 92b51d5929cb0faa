// Adapters layer: concrete implementations for external systems (catalog http, token storage, title input).

pub mod spotify;
pub mod storage;
pub mod titles;
