//! Provider factory and registry.
//!
//! Providers are constructed by name, exactly once per generation request.
//! An unknown name fails here, before any prompt is built or any rule is
//! dispatched. Tests swap real constructors for mocks through
//! [`ProviderFactory::register`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::llm::http_client;
use crate::llm::provider::{LlmError, LlmProvider};
use crate::llm::providers::{GeminiProvider, OpenAiProvider};

/// Construction-time settings for one provider instance.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

type Constructor = Box<dyn Fn(ProviderConfig) -> Arc<dyn LlmProvider> + Send + Sync>;

/// Name-keyed registry of provider constructors.
pub struct ProviderFactory {
    constructors: HashMap<String, Constructor>,
}

impl ProviderFactory {
    /// Registry with the built-in providers: gemini, openai, deepseek.
    pub fn new() -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
        };

        factory.register("gemini", |config: ProviderConfig| {
            let mut provider =
                GeminiProvider::new(config.api_key.unwrap_or_default(), http_client());
            if let Some(base_url) = config.base_url {
                provider = provider.with_base_url(base_url);
            }
            Arc::new(provider) as Arc<dyn LlmProvider>
        });

        factory.register("openai", |config: ProviderConfig| {
            let mut provider =
                OpenAiProvider::openai(config.api_key.unwrap_or_default(), http_client());
            if let Some(base_url) = config.base_url {
                provider = provider.with_base_url(base_url);
            }
            Arc::new(provider) as Arc<dyn LlmProvider>
        });

        factory.register("deepseek", |config: ProviderConfig| {
            let mut provider =
                OpenAiProvider::deepseek(config.api_key.unwrap_or_default(), http_client());
            if let Some(base_url) = config.base_url {
                provider = provider.with_base_url(base_url);
            }
            Arc::new(provider) as Arc<dyn LlmProvider>
        });

        factory
    }

    /// Register (or replace) a provider constructor.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(ProviderConfig) -> Arc<dyn LlmProvider> + Send + Sync + 'static,
    {
        self.constructors
            .insert(name.to_string(), Box::new(constructor));
    }

    /// Construct the named provider, or fail fast with
    /// [`LlmError::UnsupportedProvider`].
    pub fn create(
        &self,
        name: &str,
        config: ProviderConfig,
    ) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| LlmError::UnsupportedProvider(name.to_string()))?;
        Ok(constructor(config))
    }

    /// Names of all registered providers.
    pub fn provider_names(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}
