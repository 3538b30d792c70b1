//! Risk Analyst.
//!
//! Reads `brand_readiness` from the profile's detailed metrics; the
//! probabilistic KPIs come from the role-local stream.

use rand::Rng;
use serde_json::json;

use super::{build_analysis, role_stream, Role, RoleSimulator};
use crate::types::{AnalystReport, ContentType, EvaluationContext, KpiOutput};
use crate::CoreError;

pub struct RiskAnalyst;

impl RoleSimulator for RiskAnalyst {
    fn role(&self) -> Role {
        Role::Risk
    }

    fn simulate(&self, ctx: &EvaluationContext) -> Result<AnalystReport, CoreError> {
        let mut rng = role_stream(self.role(), ctx)?;

        let safety_score = ctx.influencer.detailed_metrics.brand_readiness.brand_safety_score;
        let readiness_explanation = match ctx.content_type {
            ContentType::Short => "Low viral risk detected in recent shorts.",
            ContentType::Long => "Deep content reflects strong brand alignment.",
            ContentType::All => "Content aligns with brand safety guidelines.",
        };

        let controversy: u32 = rng.random_range(1..=20);
        let fake_followers: u32 = rng.random_range(5..=30);

        let kpis = vec![
            KpiOutput::new(
                "brand_readiness",
                json!(format!("{}/100", safety_score)),
                f64::from(safety_score),
                readiness_explanation,
                0.95,
            ),
            KpiOutput::new(
                "brand_safety_score",
                json!(safety_score),
                f64::from(safety_score),
                "Content analysis shows mostly safe topics.",
                0.95,
            ),
            KpiOutput::new(
                "controversy_probability",
                json!(format!("{}%", controversy)),
                f64::from(controversy),
                "Low volatility in sentiment history.",
                0.8,
            ),
            KpiOutput::new(
                "fake_follower_probability",
                json!(format!("{}%", fake_followers)),
                f64::from(100 - fake_followers),
                "Some engagement anomalies detected.",
                0.85,
            ),
        ];

        Ok(AnalystReport {
            role: self.role().display_name().to_string(),
            analysis: build_analysis(&mut rng),
            kpis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_context;
    use super::*;

    #[test]
    fn test_brand_readiness_mirrors_profile() {
        let ctx = test_context("demo-1", ContentType::All);
        let expected = ctx.influencer.detailed_metrics.brand_readiness.brand_safety_score;
        let report = RiskAnalyst.simulate(&ctx).unwrap();
        assert_eq!(report.kpis[0].score_normalized, f64::from(expected));
        assert_eq!(report.kpis[1].value, json!(expected));
    }

    #[test]
    fn test_probability_bands() {
        let report = RiskAnalyst
            .simulate(&test_context("demo-2", ContentType::Short))
            .unwrap();
        let controversy = report.kpis[2].score_normalized;
        assert!((1.0..=20.0).contains(&controversy));
        let fake = report.kpis[3].score_normalized;
        assert!((70.0..=95.0).contains(&fake));
    }

    #[test]
    fn test_content_type_shapes_explanation() {
        let short = RiskAnalyst
            .simulate(&test_context("demo-1", ContentType::Short))
            .unwrap();
        assert!(short.kpis[0].explanation.contains("shorts"));
        let long = RiskAnalyst
            .simulate(&test_context("demo-1", ContentType::Long))
            .unwrap();
        assert!(long.kpis[0].explanation.contains("brand alignment"));
    }
}
