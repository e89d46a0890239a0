//! Flavorgraph LLM - Provider-assisted query resolution
//!
//! Resolves free-text questions to graph selections. Direct name matches
//! never reach a provider; everything else goes through a [`TextProvider`]
//! whose answer is re-checked against the node set before it is returned.

pub mod cursor;
pub mod error;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod resolver;

pub use cursor::{AgentStatus, CursorAgentProvider, CursorConfig};
pub use error::{ProviderError, ProviderResult};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use provider::{ResponseFormat, TextProvider};
pub use resolver::Resolver;
