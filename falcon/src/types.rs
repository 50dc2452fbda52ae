//! Request types for the Falcon text generation endpoint.
//!
//! Both configuration maps are forwarded verbatim. The typed fields cover the
//! options the service documents and are only sent when set; anything else
//! goes in `extra` and is flattened into the same JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default system-level instruction text for retrieval conversations.
pub const DEFAULT_BOT_CONTEXT_SETTING: &str = "Do note that You are a data dictionary bot. \
Your task is to fully answer the user's query based on the information provided to you.";

/// Retrieval options for a conversation.
///
/// [`Default`] fills in the documented values. [`ConversationConfig::empty`]
/// starts from nothing, so only the options set afterwards are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Number of context items to retrieve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<i64>,
    /// Candidate pool size before filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_k: Option<i64>,
    /// System-level instruction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_context_setting: Option<String>,
    /// Additional options forwarded as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationConfig {
    /// Creates a configuration with no options set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            k: None,
            fetch_k: None,
            bot_context_setting: None,
            extra: Map::new(),
        }
    }

    /// Sets `k`.
    #[must_use]
    pub const fn k(mut self, k: i64) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets `fetch_k`.
    #[must_use]
    pub const fn fetch_k(mut self, fetch_k: i64) -> Self {
        self.fetch_k = Some(fetch_k);
        self
    }

    /// Sets the instruction text.
    #[must_use]
    pub fn bot_context_setting(mut self, setting: impl Into<String>) -> Self {
        self.bot_context_setting = Some(setting.into());
        self
    }

    /// Adds an option not covered by the typed fields.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self::empty()
            .k(2)
            .fetch_k(50)
            .bot_context_setting(DEFAULT_BOT_CONTEXT_SETTING)
    }
}

/// Text generation options.
///
/// [`Default`] fills in the documented values. [`GenerationConfig::empty`]
/// starts from nothing, so only the options set afterwards are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<i64>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-k sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,
    /// Nucleus sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Batch size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,
    /// Additional options forwarded as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationConfig {
    /// Creates a configuration with no options set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            max_new_tokens: None,
            temperature: None,
            top_k: None,
            top_p: None,
            batch_size: None,
            extra: Map::new(),
        }
    }

    /// Sets `max_new_tokens`.
    #[must_use]
    pub const fn max_new_tokens(mut self, tokens: i64) -> Self {
        self.max_new_tokens = Some(tokens);
        self
    }

    /// Sets `temperature`.
    #[must_use]
    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets `top_k`.
    #[must_use]
    pub const fn top_k(mut self, top_k: i64) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets `top_p`.
    #[must_use]
    pub const fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets `batch_size`.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Adds an option not covered by the typed fields.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::empty()
            .max_new_tokens(1200)
            .temperature(0.4)
            .top_k(40)
            .top_p(0.95)
            .batch_size(256)
    }
}

/// Body of a text generation request.
///
/// Built with [`GenerateRequest::new`] and the chained setters; every field
/// not set keeps its documented default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Prior exchanges, passed through unmodified.
    pub chat_history: Vec<Value>,
    /// The question to answer.
    pub query: String,
    /// Server-side defaults flag (1 or 0).
    pub use_default: u8,
    /// Retrieval options.
    pub conversation_config: ConversationConfig,
    /// Generation options.
    pub config: GenerationConfig,
}

impl GenerateRequest {
    /// Creates a request for the given query with default options.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Sets the chat history.
    #[must_use]
    pub fn chat_history(mut self, history: Vec<Value>) -> Self {
        self.chat_history = history;
        self
    }

    /// Sets the server-side defaults flag.
    #[must_use]
    pub const fn use_default(mut self, flag: u8) -> Self {
        self.use_default = flag;
        self
    }

    /// Sets the retrieval options.
    #[must_use]
    pub fn conversation_config(mut self, config: ConversationConfig) -> Self {
        self.conversation_config = config;
        self
    }

    /// Sets the generation options.
    #[must_use]
    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            chat_history: Vec::new(),
            query: String::new(),
            use_default: 1,
            conversation_config: ConversationConfig::default(),
            config: GenerationConfig::default(),
        }
    }
}
