//! Role simulators: the three analyst perspectives.
//!
//! Each simulator derives its own stream from the role name plus the full
//! serialized evaluation context, so the same input always reproduces the
//! same report while different roles over the same input diverge.
//!
//! Isolation contract (also what makes parallel fan-out legal upstream):
//! - no shared state between simulators;
//! - no access to another role's report during simulation;
//! - execution order never affects any individual report.

mod audience;
mod narrative;
mod performance;
mod risk;

pub use audience::AudienceStrategist;
pub use narrative::build_analysis;
pub use performance::PerformanceAnalyst;
pub use risk::RiskAnalyst;

use rand_chacha::ChaCha8Rng;
use std::fmt;

use crate::seeder::stream_for;
use crate::types::{AnalystReport, EvaluationContext};
use crate::CoreError;

/// The three analyst roles, in their fixed merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Performance,
    Risk,
    Audience,
}

impl Role {
    /// Display name; also the role-identifying half of the seed payload.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Performance => "Performance Analyst",
            Role::Risk => "Risk Analyst",
            Role::Audience => "Audience Strategist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A simulated analyst.
pub trait RoleSimulator {
    fn role(&self) -> Role;

    /// Produce this role's report for the given context.
    ///
    /// Deterministic: identical context, identical report.
    fn simulate(&self, ctx: &EvaluationContext) -> Result<AnalystReport, CoreError>;
}

/// Seed a role-local stream from `"{role}\n{serialized context}"`.
pub(crate) fn role_stream(role: Role, ctx: &EvaluationContext) -> Result<ChaCha8Rng, CoreError> {
    let payload = serde_json::to_string(ctx)?;
    Ok(stream_for(&format!("{}\n{}", role.display_name(), payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignGenerator;
    use crate::profile::ProfileGenerator;
    use crate::types::ContentType;

    pub(crate) fn test_context(id: &str, content_type: ContentType) -> EvaluationContext {
        EvaluationContext {
            influencer: ProfileGenerator::new().generate(id, content_type),
            campaign: CampaignGenerator::with_seed(42).generate_brief(),
            content_type,
        }
    }

    #[test]
    fn test_roles_diverge_over_same_context() {
        let ctx = test_context("demo-1", ContentType::All);
        let perf = PerformanceAnalyst.simulate(&ctx).unwrap();
        let risk = RiskAnalyst.simulate(&ctx).unwrap();
        let aud = AudienceStrategist.simulate(&ctx).unwrap();

        assert_eq!(perf.role, "Performance Analyst");
        assert_eq!(risk.role, "Risk Analyst");
        assert_eq!(aud.role, "Audience Strategist");
        assert_ne!(perf.analysis, risk.analysis);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let ctx = test_context("demo-1", ContentType::Short);
        for simulator in [
            &PerformanceAnalyst as &dyn RoleSimulator,
            &RiskAnalyst,
            &AudienceStrategist,
        ] {
            let a = simulator.simulate(&ctx).unwrap();
            let b = simulator.simulate(&ctx).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_all_scores_within_bounds() {
        for id in ["demo-1", "demo-2", "edge"] {
            let ctx = test_context(id, ContentType::All);
            for simulator in [
                &PerformanceAnalyst as &dyn RoleSimulator,
                &RiskAnalyst,
                &AudienceStrategist,
            ] {
                let report = simulator.simulate(&ctx).unwrap();
                for kpi in &report.kpis {
                    assert!(
                        (0.0..=100.0).contains(&kpi.score_normalized),
                        "{}: {}",
                        kpi.kpi_id,
                        kpi.score_normalized
                    );
                    assert!((0.0..=1.0).contains(&kpi.confidence_score));
                }
            }
        }
    }
}
