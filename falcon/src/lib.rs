//! Falcon - async client for the Falcon text generation and embedding service
//!
//! The service answers chat-style questions over documents it has embedded.
//! This crate wraps its two HTTP endpoints:
//!
//! - [`Falcon::create_embedding`] uploads local files for embedding
//! - [`Falcon::generate_text`] asks a question with retrieval and generation options
//!
//! ```rust,ignore
//! use falcon::prelude::*;
//!
//! let client = Falcon::with_api_key("TESTKEY123", "localhost:8888")?;
//! client.create_embedding(&["01Aug2023.csv"]).await?;
//! let answer = client.generate_text(&GenerateRequest::new("What is Account status key?")).await?;
//! ```

mod chat;
pub mod client;
pub mod config;
pub mod embedding;
pub mod error;
pub mod prelude;
pub mod retry;
pub mod types;

pub use client::Falcon;
pub use config::FalconConfig;
pub use error::{Error, Result};
