//! Deterministic backend driving the core simulators.
//!
//! Always available, needs no network and no credentials. Dispatch is on
//! the prompt's opening role declaration, the same contract the prompt
//! constants promise.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use castvet_core::{
    AudienceStrategist, ChatContext, EvaluationContext, KpiOutput, PerformanceAnalyst, RiskAnalyst,
    RoleSimulator,
};

use super::{BackendError, GenerationBackend};

/// Executive payload shape: the three KPI sets plus the original context.
#[derive(Deserialize)]
struct ExecutivePayload {
    performance_kpis: Vec<KpiOutput>,
    risk_kpis: Vec<KpiOutput>,
    audience_kpis: Vec<KpiOutput>,
    context: EvaluationContext,
}

/// Backend that answers every request from the seeded simulators.
#[derive(Debug, Default)]
pub struct SimulatorBackend;

impl SimulatorBackend {
    pub fn new() -> Self {
        Self
    }

    fn simulate_role(
        &self,
        simulator: &dyn RoleSimulator,
        payload: &JsonValue,
    ) -> Result<JsonValue, BackendError> {
        let ctx: EvaluationContext = serde_json::from_value(payload.clone())
            .map_err(|e| BackendError::SchemaMismatch(e.to_string()))?;
        let report = simulator
            .simulate(&ctx)
            .map_err(|e| BackendError::SchemaMismatch(e.to_string()))?;
        serde_json::to_value(report).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl GenerationBackend for SimulatorBackend {
    async fn generate(
        &self,
        system_prompt: &str,
        payload: &JsonValue,
    ) -> Result<JsonValue, BackendError> {
        if system_prompt.contains("You are the Performance Analyst") {
            return self.simulate_role(&PerformanceAnalyst, payload);
        }
        if system_prompt.contains("You are the Risk Analyst") {
            return self.simulate_role(&RiskAnalyst, payload);
        }
        if system_prompt.contains("You are the Audience Strategist") {
            return self.simulate_role(&AudienceStrategist, payload);
        }
        if system_prompt.contains("You are the Executive Decision Engine") {
            let exec: ExecutivePayload = serde_json::from_value(payload.clone())
                .map_err(|e| BackendError::SchemaMismatch(e.to_string()))?;
            let decision = castvet_core::synthesize_decision(
                &exec.performance_kpis,
                &exec.risk_kpis,
                &exec.audience_kpis,
                &exec.context,
            )
            .map_err(|e| BackendError::SchemaMismatch(e.to_string()))?;
            return serde_json::to_value(decision).map_err(|e| BackendError::Parse(e.to_string()));
        }

        tracing::warn!("unrecognized system prompt, returning empty object");
        Ok(json!({}))
    }

    async fn chat(&self, query: &str, context: &ChatContext) -> Result<String, BackendError> {
        let card = castvet_core::chat::route(query, context);
        serde_json::to_string(&card).map_err(|e| BackendError::Parse(e.to_string()))
    }

    fn name(&self) -> &str {
        "simulator"
    }
}
