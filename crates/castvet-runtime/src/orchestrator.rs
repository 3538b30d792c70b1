//! Evaluation orchestrator.
//!
//! Fans out the three analyst generations in parallel, synthesizes the
//! executive decision, and caches assembled results. Every backend
//! failure degrades to the deterministic simulators for the same inputs,
//! so an evaluation request never fails because a remote model did.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use castvet_core::{
    AnalystReport, AudienceStrategist, ChatContext, ContentType, CoreError, EvaluationContext,
    EvaluationResult, ExecutiveDecision, KpiOutput, PerformanceAnalyst, RiskAnalyst, Role,
    RoleSimulator,
};

use crate::backends::GenerationBackend;
use crate::cache::EvaluationCache;
use crate::prompts::PromptStore;

/// Errors from the runtime orchestrator.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("no evaluation cached for influencer '{id}'")]
    NotEvaluated { id: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Orchestrates backend generation with deterministic fallback.
pub struct Orchestrator {
    backend: Arc<dyn GenerationBackend>,
    prompts: PromptStore,
    cache: EvaluationCache,
}

/// Payload handed to the executive generation step.
#[derive(Serialize)]
struct ExecutivePayload<'a> {
    performance_kpis: &'a [KpiOutput],
    risk_kpis: &'a [KpiOutput],
    audience_kpis: &'a [KpiOutput],
    context: &'a EvaluationContext,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            prompts: PromptStore::builtin(),
            cache: EvaluationCache::default(),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptStore) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_cache(mut self, cache: EvaluationCache) -> Self {
        self.cache = cache;
        self
    }

    /// Evaluate one context, bypassing the cache.
    pub async fn evaluate(
        &self,
        ctx: &EvaluationContext,
    ) -> Result<EvaluationResult, RuntimeError> {
        let payload = serde_json::to_value(ctx).map_err(CoreError::from)?;

        let (performance, risk, audience) = tokio::join!(
            self.role_report(Role::Performance, "performance_analyst", ctx, &payload),
            self.role_report(Role::Risk, "risk_analyst", ctx, &payload),
            self.role_report(Role::Audience, "audience_strategist", ctx, &payload),
        );
        let performance = performance?;
        let risk = risk?;
        let audience = audience?;

        let decision_summary = self
            .executive_decision(&performance.kpis, &risk.kpis, &audience.kpis, ctx)
            .await?;

        let mut kpis =
            Vec::with_capacity(performance.kpis.len() + risk.kpis.len() + audience.kpis.len());
        kpis.extend(performance.kpis.iter().cloned());
        kpis.extend(risk.kpis.iter().cloned());
        kpis.extend(audience.kpis.iter().cloned());

        Ok(EvaluationResult {
            decision_summary,
            kpis,
            analyst_reports: vec![performance, risk, audience],
            influencer_id: ctx.influencer.id.clone(),
            campaign_id: ctx.campaign.id.clone(),
            niche: ctx.influencer.niche.clone(),
            goal: ctx.campaign.goal.clone(),
            evaluated_at: Utc::now(),
        })
    }

    /// Evaluate through the cache: a hit short-circuits before any
    /// backend call.
    pub async fn evaluate_cached(
        &self,
        ctx: &EvaluationContext,
    ) -> Result<Arc<EvaluationResult>, RuntimeError> {
        let key = EvaluationCache::key(&ctx.influencer.id, ctx.content_type);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(%key, "cache hit");
            return Ok(cached);
        }

        let result = Arc::new(self.evaluate(ctx).await?);
        self.cache.insert(key, result.clone()).await;
        Ok(result)
    }

    /// Answer a chat query against a previously cached evaluation.
    ///
    /// The category context is rebuilt from the cached result on every
    /// call; nothing chat-specific is ever stored.
    pub async fn chat(
        &self,
        influencer_id: &str,
        content_type: ContentType,
        query: &str,
    ) -> Result<String, RuntimeError> {
        let key = EvaluationCache::key(influencer_id, content_type);
        let result = self.cache.get(&key).await.ok_or_else(|| RuntimeError::NotEvaluated {
            id: influencer_id.to_string(),
        })?;

        let context = castvet_core::chat::build_chat_context(&result);
        match self.backend.chat(query, &context).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "chat backend failed, using router");
                self.route_locally(query, &context)
            }
        }
    }

    fn route_locally(&self, query: &str, context: &ChatContext) -> Result<String, RuntimeError> {
        let card = castvet_core::chat::route(query, context);
        Ok(serde_json::to_string(&card).map_err(CoreError::from)?)
    }

    async fn role_report(
        &self,
        role: Role,
        prompt_name: &str,
        ctx: &EvaluationContext,
        payload: &serde_json::Value,
    ) -> Result<AnalystReport, RuntimeError> {
        let Some(prompt) = self.prompts.get(prompt_name) else {
            tracing::warn!(prompt_name, "prompt missing, using simulator");
            return Ok(simulate(role, ctx)?);
        };

        match self.backend.generate(prompt, payload).await {
            Ok(value) => match serde_json::from_value::<AnalystReport>(value) {
                Ok(report) => Ok(report),
                Err(e) => {
                    tracing::warn!(%role, error = %e, "unparseable analyst response, using simulator");
                    Ok(simulate(role, ctx)?)
                }
            },
            Err(e) => {
                tracing::warn!(%role, backend = self.backend.name(), error = %e, "generation failed, using simulator");
                Ok(simulate(role, ctx)?)
            }
        }
    }

    async fn executive_decision(
        &self,
        performance_kpis: &[KpiOutput],
        risk_kpis: &[KpiOutput],
        audience_kpis: &[KpiOutput],
        ctx: &EvaluationContext,
    ) -> Result<ExecutiveDecision, RuntimeError> {
        let fallback = || {
            castvet_core::synthesize_decision(performance_kpis, risk_kpis, audience_kpis, ctx)
                .map_err(RuntimeError::from)
        };

        let Some(prompt) = self.prompts.get("executive_decider") else {
            tracing::warn!("executive prompt missing, using synthesizer");
            return fallback();
        };

        let payload = serde_json::to_value(ExecutivePayload {
            performance_kpis,
            risk_kpis,
            audience_kpis,
            context: ctx,
        })
        .map_err(CoreError::from)?;

        match self.backend.generate(prompt, &payload).await {
            Ok(value) => match serde_json::from_value::<ExecutiveDecision>(value) {
                Ok(decision) => Ok(decision),
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable executive response, using synthesizer");
                    fallback()
                }
            },
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "executive generation failed, using synthesizer");
                fallback()
            }
        }
    }
}

fn simulate(role: Role, ctx: &EvaluationContext) -> Result<AnalystReport, CoreError> {
    match role {
        Role::Performance => PerformanceAnalyst.simulate(ctx),
        Role::Risk => RiskAnalyst.simulate(ctx),
        Role::Audience => AudienceStrategist.simulate(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{BackendError, SimulatorBackend};
    use async_trait::async_trait;
    use castvet_core::{CampaignGenerator, ProfileGenerator};
    use serde_json::Value as JsonValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context(id: &str, content_type: ContentType) -> EvaluationContext {
        EvaluationContext {
            influencer: ProfileGenerator::new().generate(id, content_type),
            campaign: CampaignGenerator::with_seed(21).generate_brief(),
            content_type,
        }
    }

    /// Counts generate calls, then delegates to the simulator.
    struct CountingBackend {
        inner: SimulatorBackend,
        calls: AtomicUsize,
    }

    impl CountingBackend {
        fn new() -> Self {
            Self {
                inner: SimulatorBackend::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for CountingBackend {
        async fn generate(
            &self,
            system_prompt: &str,
            payload: &JsonValue,
        ) -> Result<JsonValue, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate(system_prompt, payload).await
        }

        async fn chat(&self, query: &str, ctx: &ChatContext) -> Result<String, BackendError> {
            self.inner.chat(query, ctx).await
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    /// Fails every generation, forcing the deterministic fallback.
    struct FailingBackend;

    #[async_trait]
    impl GenerationBackend for FailingBackend {
        async fn generate(&self, _: &str, _: &JsonValue) -> Result<JsonValue, BackendError> {
            Err(BackendError::Http("connection refused".to_string()))
        }

        async fn chat(&self, _: &str, _: &ChatContext) -> Result<String, BackendError> {
            Err(BackendError::Http("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_simulator_backend_matches_core_pipeline() {
        let ctx = context("demo-1", ContentType::Short);
        let orchestrator = Orchestrator::new(Arc::new(SimulatorBackend::new()));

        let mut runtime = orchestrator.evaluate(&ctx).await.unwrap();
        let mut core = castvet_core::evaluate(&ctx).unwrap();
        runtime.evaluated_at = core.evaluated_at;
        core.evaluated_at = runtime.evaluated_at;
        assert_eq!(runtime, core);
    }

    #[tokio::test]
    async fn test_failing_backend_degrades_to_simulators() {
        let ctx = context("demo-2", ContentType::All);
        let orchestrator = Orchestrator::new(Arc::new(FailingBackend));

        let mut degraded = orchestrator.evaluate(&ctx).await.unwrap();
        let mut core = castvet_core::evaluate(&ctx).unwrap();
        degraded.evaluated_at = core.evaluated_at;
        core.evaluated_at = degraded.evaluated_at;
        assert_eq!(degraded, core);
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_backend() {
        let ctx = context("demo-3", ContentType::Long);
        let backend = Arc::new(CountingBackend::new());
        let orchestrator = Orchestrator::new(backend.clone());

        let first = orchestrator.evaluate_cached(&ctx).await.unwrap();
        let calls_after_first = backend.calls.load(Ordering::SeqCst);
        assert_eq!(calls_after_first, 4);

        let second = orchestrator.evaluate_cached(&ctx).await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), calls_after_first);
        assert_eq!(*first, *second);
    }

    #[tokio::test]
    async fn test_chat_requires_prior_evaluation() {
        let orchestrator = Orchestrator::new(Arc::new(SimulatorBackend::new()));
        let err = orchestrator
            .chat("ghost-1", ContentType::All, "what is the roi")
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotEvaluated { id } if id == "ghost-1"));
    }

    #[tokio::test]
    async fn test_chat_answers_after_evaluation() {
        let ctx = context("demo-4", ContentType::All);
        let orchestrator = Orchestrator::new(Arc::new(SimulatorBackend::new()));
        orchestrator.evaluate_cached(&ctx).await.unwrap();

        let answer = orchestrator
            .chat("demo-4", ContentType::All, "is it safe?")
            .await
            .unwrap();
        let card: JsonValue = serde_json::from_str(&answer).unwrap();
        assert!(card["type"].is_string());
    }

    #[tokio::test]
    async fn test_chat_backend_failure_uses_router() {
        let ctx = context("demo-5", ContentType::All);
        let failing = Orchestrator::new(Arc::new(FailingBackend));
        failing.evaluate_cached(&ctx).await.unwrap();

        let answer = failing
            .chat("demo-5", ContentType::All, "what is the roi")
            .await
            .unwrap();
        let card: JsonValue = serde_json::from_str(&answer).unwrap();
        assert_eq!(card["title"], "Conversion Potential");
    }
}
