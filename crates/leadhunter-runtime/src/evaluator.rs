//! Model-backed evaluation.
//!
//! The evaluator renders the prompt, makes one chat completion and parses
//! the reply. A missing provider and a failed call both come back as
//! [`Availability::Unavailable`]; the caller decides what to fall back to.

use std::sync::Arc;

use leadhunter_core::{
    parse_reply, Availability, Category, EvidenceRecord, Language, PromptBuilder, Verdict,
    SYSTEM_PROMPT,
};

use crate::config::ModelConfig;
use crate::providers::{
    ApiCredential, ChatMessage, CompletionConfig, LlmProvider, OpenAiProvider, ProviderError,
};

/// Evaluates evidence with a language model, when one is configured.
pub struct ModelEvaluator {
    provider: Option<Arc<dyn LlmProvider>>,
    config: CompletionConfig,
}

impl ModelEvaluator {
    pub fn new(provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// An evaluator that always reports `Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            provider: None,
            config: CompletionConfig::default(),
        }
    }

    /// Build from the model credential and settings. No credential means
    /// an unavailable evaluator.
    pub fn from_config(
        credential: Option<ApiCredential>,
        config: &ModelConfig,
    ) -> Result<Self, ProviderError> {
        let Some(credential) = credential else {
            return Ok(Self::unavailable());
        };

        let provider = OpenAiProvider::new(credential)?.with_base_url(config.base_url.as_str());
        Ok(Self::new(
            Arc::new(provider),
            CompletionConfig {
                model: config.model.clone(),
                temperature: config.temperature,
                timeout: config.timeout,
            },
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn evaluate(
        &self,
        language: Language,
        category: Category,
        context: &str,
        evidence: &[EvidenceRecord],
    ) -> Availability<Verdict> {
        let Some(provider) = &self.provider else {
            return Availability::Unavailable;
        };

        let prompt = PromptBuilder::new(language, category, context, evidence).build();
        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        match provider.complete(messages, &self.config).await {
            Ok(response) => {
                tracing::info!(
                    provider = provider.name(),
                    model = %response.model,
                    "Model evaluation finished"
                );
                Availability::Available(parse_reply(response.content.trim()))
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "Model evaluation failed, falling back"
                );
                Availability::Unavailable
            }
        }
    }
}

impl std::fmt::Debug for ModelEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelEvaluator")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}
