//! Executive synthesizer: turns the three KPI sets into a final decision.
//!
//! The cross-role consistency rule is policy machinery, not a tuning toy:
//! a HIGH risk level always forces NO-GO, overriding whatever was drawn.

use rand::seq::IndexedRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::{Decision, ExecutiveDecision, KpiOutput, RiskLevel, RoiPrediction};

/// Weighted toward the favorable outcome: GO appears twice.
const DECISIONS: [Decision; 4] = [Decision::Go, Decision::Go, Decision::Test, Decision::NoGo];

/// Same 50% bias: LOW appears twice.
const RISK_LEVELS: [RiskLevel; 4] = [
    RiskLevel::Low,
    RiskLevel::Low,
    RiskLevel::Medium,
    RiskLevel::High,
];

pub struct ExecutiveSynthesizer;

impl ExecutiveSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a decision from the three role KPI sets.
    ///
    /// The stream must be derived from the same input context as the role
    /// simulators so that identical evaluations reproduce identical
    /// decisions. ROI min and max come from disjoint ranges ([1.0, 2.5]
    /// and [2.6, 5.0]); `min < max` holds by construction, not by an
    /// explicit comparison.
    pub fn decide(
        &self,
        performance_kpis: &[KpiOutput],
        risk_kpis: &[KpiOutput],
        audience_kpis: &[KpiOutput],
        rng: &mut ChaCha8Rng,
    ) -> ExecutiveDecision {
        tracing::debug!(
            performance = performance_kpis.len(),
            risk = risk_kpis.len(),
            audience = audience_kpis.len(),
            "synthesizing executive decision"
        );

        let mut decision = *DECISIONS.choose(rng).unwrap_or(&Decision::Test);
        let risk_level = *RISK_LEVELS.choose(rng).unwrap_or(&RiskLevel::Medium);

        // Consistency rule, enforced unconditionally after the draw.
        if risk_level == RiskLevel::High {
            decision = Decision::NoGo;
        }

        let roi_min = round1(rng.random_range(1.0..2.5));
        let roi_max = round1(rng.random_range(2.6..5.0));

        ExecutiveDecision {
            decision,
            roi_prediction: RoiPrediction {
                min: roi_min,
                max: roi_max,
                confidence: 0.85,
            },
            risk_level,
            executive_summary: format!(
                "Based on the Strong ROI potential and {} risk profile, we recommend a {}.",
                risk_level, decision
            ),
            top_flags: vec![
                "ROI is projected to be positive.".to_string(),
                format!("Risk analysis indicates {} concern.", risk_level),
                "Audience fit is within acceptable range.".to_string(),
            ],
        }
    }
}

impl Default for ExecutiveSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::stream_for;

    fn decide_with(key: &str) -> ExecutiveDecision {
        ExecutiveSynthesizer::new().decide(&[], &[], &[], &mut stream_for(key))
    }

    #[test]
    fn test_decision_is_deterministic() {
        assert_eq!(decide_with("exec-1"), decide_with("exec-1"));
    }

    #[test]
    fn test_high_risk_forces_no_go() {
        // Search seeds until one draws HIGH; the invariant must hold there.
        let mut saw_high = false;
        for i in 0..256 {
            let decision = decide_with(&format!("risk-search-{i}"));
            if decision.risk_level == RiskLevel::High {
                saw_high = true;
                assert_eq!(decision.decision, Decision::NoGo);
            }
        }
        assert!(saw_high, "expected at least one HIGH draw in 256 seeds");
    }

    #[test]
    fn test_roi_ranges_are_disjoint() {
        for i in 0..64 {
            let roi = decide_with(&format!("roi-{i}")).roi_prediction;
            assert!((1.0..=2.5).contains(&roi.min));
            assert!((2.6..=5.0).contains(&roi.max));
            assert!(roi.min < roi.max);
            assert_eq!(roi.confidence, 0.85);
        }
    }

    #[test]
    fn test_summary_names_risk_and_decision() {
        let decision = decide_with("summary");
        assert!(decision
            .executive_summary
            .contains(&decision.risk_level.to_string()));
        assert!(decision
            .executive_summary
            .contains(&decision.decision.to_string()));
        assert_eq!(decision.top_flags.len(), 3);
    }
}
