//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use falcon::prelude::*;
//! ```

pub use crate::client::Falcon;
pub use crate::config::FalconConfig;
pub use crate::embedding::file_extension;
pub use crate::error::{Error, Result};
pub use crate::retry::{ExponentialBackoff, NoRetry, RetryPolicy};
pub use crate::types::{ConversationConfig, GenerateRequest, GenerationConfig};
