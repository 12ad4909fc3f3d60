//! Rule dispatcher: bounded concurrent fan-out with isolated failures.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tracing::{error, info};

use crate::config::Config;
use crate::generation::adapter::QuestionAdapter;
use crate::generation::assembler::assemble;
use crate::generation::error::GenerationError;
use crate::generation::prompt::build_prompt;
use crate::generation::types::{
    GenerationOutput, GenerationRequest, Rule, RuleFailure, RuleOutcome,
};
use crate::llm::{ProviderConfig, ProviderFactory};

/// The generation orchestrator. Holds the provider factory and read-only
/// configuration; one instance serves many concurrent requests.
pub struct Generator {
    factory: ProviderFactory,
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self::with_factory(config, ProviderFactory::new())
    }

    /// Construct with a custom factory; tests use this to inject mock
    /// providers.
    pub fn with_factory(config: Config, factory: ProviderFactory) -> Self {
        Self { factory, config }
    }

    /// Generate questions for every rule in the request.
    ///
    /// The provider is resolved exactly once, before any prompt is built or
    /// any rule is dispatched; an unknown selector aborts the whole call
    /// with [`GenerationError::UnsupportedProvider`], and that is the only
    /// aborting failure. All rules are then dispatched concurrently (capped
    /// at `max_concurrent_rules`) against the shared adapter. A failing rule
    /// becomes a [`RuleOutcome::Failure`] and never cancels its siblings.
    ///
    /// The returned outcomes are in rule-declaration order, one per rule.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let (api_key, model) = self.config.provider_settings(&request.provider);
        let provider = self.factory.create(
            &request.provider,
            ProviderConfig {
                api_key,
                base_url: None,
            },
        )?;

        let adapter = Arc::new(QuestionAdapter::new(
            provider,
            model,
            self.config.request_timeout,
        ));

        let limit = self.config.max_concurrent_rules.max(1);
        let rule_futures: Vec<_> = request
            .rules
            .iter()
            .map(|rule| {
                let adapter = Arc::clone(&adapter);
                async move {
                    let prompt =
                        build_prompt(&request.module, &request.content, &request.books, rule);
                    dispatch_rule(&adapter, rule, &prompt).await
                }
            })
            .collect();
        let outcomes: Vec<RuleOutcome> = stream::iter(rule_futures)
            .buffered(limit)
            .collect()
            .await;

        Ok(GenerationOutput { outcomes })
    }
}

/// Run one rule to completion, converting any error into data.
async fn dispatch_rule(adapter: &QuestionAdapter, rule: &Rule, prompt: &str) -> RuleOutcome {
    info!(
        rule_id = rule.id,
        provider = adapter.provider_name(),
        count = rule.count,
        question_type = %rule.question_type,
        "dispatching generation rule"
    );

    match adapter.submit(prompt).await {
        Ok(drafts) => RuleOutcome::Success(
            drafts
                .into_iter()
                .map(|draft| assemble(draft, rule))
                .collect(),
        ),
        Err(err) => {
            error!(
                rule_id = rule.id,
                provider = adapter.provider_name(),
                error = ?err,
                "rule generation failed"
            );
            RuleOutcome::Failure(RuleFailure {
                rule_id: rule.id,
                reason: err.to_string(),
            })
        }
    }
}
