//! Performance Analyst.
//!
//! Reads `growth_momentum` and `intent_conversion` from the profile's
//! detailed metrics and projects the execution-level funnel (impressions,
//! retention, saves, redemptions) from the role-local stream.

use rand::Rng;
use serde_json::json;

use super::{build_analysis, role_stream, Role, RoleSimulator};
use crate::types::{AnalystReport, ContentType, EvaluationContext, KpiOutput};
use crate::CoreError;

pub struct PerformanceAnalyst;

impl RoleSimulator for PerformanceAnalyst {
    fn role(&self) -> Role {
        Role::Performance
    }

    fn simulate(&self, ctx: &EvaluationContext) -> Result<AnalystReport, CoreError> {
        let mut rng = role_stream(self.role(), ctx)?;

        let metrics = &ctx.influencer.detailed_metrics;
        let followers = ctx.influencer.followers;

        // Execution funnel, drawn in a fixed sequence.
        let impressions = (followers as f64 * (0.2 + rng.random::<f64>() * 0.1)) as u64;
        let completion_rate = rng.random_range(0.15..0.45);
        let saves = (impressions as f64 * rng.random_range(0.02..0.08)) as u64;
        let stayed_rate = rng.random_range(0.6..0.9);
        let conversions = (impressions as f64 * rng.random_range(0.005..0.02)) as u64;
        let promo_redemptions = (conversions as f64 * rng.random_range(0.4..0.8)) as u64;

        let growth_raw: f64 = rng.random_range(60.0..95.0);
        let growth_score = growth_raw.round().min(99.0);
        let growth_explanation = match ctx.content_type {
            ContentType::Long => "Consistent channel growth suggests long-term stability.",
            _ => "Viral peaks indicate strong short-term momentum.",
        };

        // Intent strength is lifted straight off the profile, scaled into
        // a score band. The redemption rate is a fraction of impressions,
        // hence the x2000 scale.
        let intent_score = (metrics.intent_conversion.promo_redemption_rate * 2000.0)
            .round()
            .clamp(40.0, 99.0);
        let intent_explanation = match ctx.content_type {
            ContentType::Long => "High retention correlates with strong conversion intent.",
            _ => "High share ratio indicates content stops the scroll.",
        };

        let kpis = vec![
            KpiOutput::new(
                "growth_momentum",
                json!(format!("{}/100", growth_score as u32)),
                growth_score,
                growth_explanation,
                0.85,
            ),
            KpiOutput::new(
                "intent_strength",
                json!(format!("{}/100", intent_score as u32)),
                intent_score,
                intent_explanation,
                0.82,
            ),
            KpiOutput::new(
                "predicted_impressions",
                json!(impressions),
                (impressions as f64 / 10_000.0).min(100.0),
                format!("Based on {} followers and historical reach patterns.", followers),
                0.85,
            ),
            KpiOutput::new(
                "avg_percentage_viewed",
                json!(format!("{}%", (completion_rate * 100.0) as u32)),
                completion_rate * 200.0,
                "High retention indicates strong hook effectiveness.",
                0.8,
            ),
            KpiOutput::new(
                "stayed_vs_swiped",
                json!(format!("{}% Stayed", (stayed_rate * 100.0) as u32)),
                stayed_rate * 100.0,
                "Measures ability to stop the scroll.",
                0.85,
            ),
            KpiOutput::new(
                "predicted_saves",
                json!(saves),
                (saves as f64 / 100.0).min(100.0),
                "High intent signal for product interest.",
                0.7,
            ),
            KpiOutput::new(
                "promo_code_redemptions",
                json!(promo_redemptions),
                (promo_redemptions as f64 / 20.0).min(100.0),
                "Direct revenue attribution estimate.",
                0.6,
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
    fn test_kpi_ids_and_order() {
        let report = PerformanceAnalyst
            .simulate(&test_context("demo-1", ContentType::All))
            .unwrap();
        let ids: Vec<&str> = report.kpis.iter().map(|k| k.kpi_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "growth_momentum",
                "intent_strength",
                "predicted_impressions",
                "avg_percentage_viewed",
                "stayed_vs_swiped",
                "predicted_saves",
                "promo_code_redemptions",
            ]
        );
    }

    #[test]
    fn test_growth_score_is_a_rounded_band_value() {
        for id in ["demo-1", "demo-2", "demo-3", "low-end"] {
            let report = PerformanceAnalyst
                .simulate(&test_context(id, ContentType::All))
                .unwrap();
            let growth = &report.kpis[0];
            assert!((60.0..=99.0).contains(&growth.score_normalized));
            assert_eq!(growth.score_normalized.fract(), 0.0);
        }
    }

    #[test]
    fn test_intent_score_band() {
        for id in ["demo-1", "demo-2", "low-end"] {
            let report = PerformanceAnalyst
                .simulate(&test_context(id, ContentType::All))
                .unwrap();
            let intent = &report.kpis[1];
            assert!((40.0..=99.0).contains(&intent.score_normalized));
        }
    }

    #[test]
    fn test_long_form_explanations() {
        let report = PerformanceAnalyst
            .simulate(&test_context("demo-1", ContentType::Long))
            .unwrap();
        assert!(report.kpis[0].explanation.contains("long-term"));
        assert!(report.kpis[1].explanation.contains("retention"));
    }
}
