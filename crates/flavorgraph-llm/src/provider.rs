//! Text-completion provider trait

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Shape of a provider's answer to the initial question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Up to three ingredient names separated by `|`
    PipeList,
    /// One `{"id", "name", "category"}` object
    JsonObject,
}

/// A text-in, text-out completion backend
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Answer contract this provider is prompted with
    fn response_format(&self) -> ResponseFormat;

    /// Send `prompt` and return the raw answer text
    async fn complete(&self, prompt: &str) -> ProviderResult<String>;
}
