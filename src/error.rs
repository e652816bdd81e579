//! Error types
//!
//! Only programmer errors and construction failures surface here. Bad option
//! values are replaced with defaults and reported through
//! [`ValidationReport`](crate::wheel::ValidationReport) instead.

use thiserror::Error;

use crate::wheel::ItemId;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("wheel container element is missing")]
    MissingContainer,

    #[error("invalid wheel configuration: {0}")]
    InvalidConfig(String),

    #[error("item {0:?} does not belong to this wheel")]
    ItemNotFound(ItemId),

    #[error("item index {index} out of range for {len} items")]
    ItemIndexOutOfRange { index: usize, len: usize },

    #[error("drawing surface error: {0}")]
    Surface(String),
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        WheelError::InvalidConfig(err.to_string())
    }
}

pub type Result<T, E = WheelError> = std::result::Result<T, E>;
