//! Deterministic influencer-campaign evaluation engine.
//!
//! Everything in this crate is derived from seeded streams: the same
//! influencer identifier and content type reproduce the same profile,
//! the same analyst reports and the same executive decision, with no
//! stored state. The crate is pure computation; persistence, transport
//! and model-backed generation live in `castvet-runtime`.
//!
//! Pipeline shape:
//!
//! ```text
//! identifier ── ProfileGenerator ──► InfluencerProfile ─┐
//!                                                       ├─► EvaluationContext
//! CampaignGenerator ───────────────► CampaignBrief ─────┘        │
//!                                                                ▼
//!                     Performance / Risk / Audience simulators (isolated)
//!                                                                │
//!                                                                ▼
//!                             ExecutiveSynthesizer ──► EvaluationResult
//! ```

pub mod analysts;
pub mod campaign;
pub mod chat;
pub mod profile;
pub mod seeder;
pub mod synthesizer;
pub mod types;

pub use analysts::{AudienceStrategist, PerformanceAnalyst, RiskAnalyst, Role, RoleSimulator};
pub use campaign::CampaignGenerator;
pub use profile::ProfileGenerator;
pub use synthesizer::ExecutiveSynthesizer;
pub use types::{
    AnalystReport, CampaignBrief, Card, ChatContext, ContentType, Decision, EvaluationContext,
    EvaluationResult, ExecutiveDecision, InfluencerProfile, KpiOutput, RiskLevel,
};

use chrono::Utc;
use serde::Serialize;

use crate::seeder::stream_for;

/// Errors from the evaluation engine.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Seed payload for the executive stream: the role outputs plus the
/// original context, so the decision is bound to what the analysts saw
/// and what they produced.
#[derive(Serialize)]
struct ExecutiveSeedContext<'a> {
    performance_kpis: &'a [KpiOutput],
    risk_kpis: &'a [KpiOutput],
    audience_kpis: &'a [KpiOutput],
    context: &'a EvaluationContext,
}

/// Synthesize the executive decision for three role KPI sets.
///
/// The decision stream is seeded from the serialized KPI sets plus the
/// original context; any caller handing in the same inputs reproduces
/// the same decision.
pub fn synthesize_decision(
    performance_kpis: &[KpiOutput],
    risk_kpis: &[KpiOutput],
    audience_kpis: &[KpiOutput],
    ctx: &EvaluationContext,
) -> Result<ExecutiveDecision, CoreError> {
    let seed_ctx = ExecutiveSeedContext {
        performance_kpis,
        risk_kpis,
        audience_kpis,
        context: ctx,
    };
    let payload = serde_json::to_string(&seed_ctx)?;
    let mut exec_rng = stream_for(&format!("Executive Decision Engine\n{payload}"));

    Ok(ExecutiveSynthesizer::new().decide(performance_kpis, risk_kpis, audience_kpis, &mut exec_rng))
}

/// Run the full evaluation pipeline over one context.
///
/// The three simulators run in fixed role order and never observe each
/// other; the merged KPI list preserves that order. Deterministic except
/// for `evaluated_at`.
pub fn evaluate(ctx: &EvaluationContext) -> Result<EvaluationResult, CoreError> {
    tracing::info!(
        influencer = %ctx.influencer.id,
        content_type = %ctx.content_type,
        "evaluating"
    );

    let performance = PerformanceAnalyst.simulate(ctx)?;
    let risk = RiskAnalyst.simulate(ctx)?;
    let audience = AudienceStrategist.simulate(ctx)?;

    let decision_summary =
        synthesize_decision(&performance.kpis, &risk.kpis, &audience.kpis, ctx)?;

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
