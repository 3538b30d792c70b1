//! Audience Strategist.
//!
//! Reads `engagement_quality`, `audience_credibility` and
//! `consistency_loyalty` from the profile. Long-form contexts report
//! loyalty; short/all contexts report credibility.

use rand::Rng;
use serde_json::json;

use super::{build_analysis, role_stream, Role, RoleSimulator};
use crate::types::{AnalystReport, ContentType, EvaluationContext, KpiOutput};
use crate::CoreError;

pub struct AudienceStrategist;

impl RoleSimulator for AudienceStrategist {
    fn role(&self) -> Role {
        Role::Audience
    }

    fn simulate(&self, ctx: &EvaluationContext) -> Result<AnalystReport, CoreError> {
        let mut rng = role_stream(self.role(), ctx)?;

        let metrics = &ctx.influencer.detailed_metrics;
        let engagement_score = metrics.engagement_quality.completion_rate.round();
        let engagement_explanation = match ctx.content_type {
            ContentType::Long => "Deep engagement duration suggests high interest.",
            _ => "High completion rates indicate strong hook.",
        };

        let mut kpis = vec![KpiOutput::new(
            "engagement_quality",
            json!(format!("{}/100", engagement_score as u32)),
            engagement_score,
            engagement_explanation,
            0.9,
        )];

        // Audience signal: loyalty for long form, credibility otherwise.
        if ctx.content_type == ContentType::Long {
            let retention = metrics.consistency_loyalty.retention_score;
            kpis.push(KpiOutput::new(
                "audience_loyalty",
                json!(format!("{}/100", retention)),
                f64::from(retention),
                "Consistent viewership across long-form content.",
                0.88,
            ));
        } else {
            let quality = metrics.audience_credibility.audience_quality_score.round();
            kpis.push(KpiOutput::new(
                "audience_credibility",
                json!(format!("{}/100", quality as u32)),
                quality,
                "Audience appears authentic with low bot probability.",
                0.88,
            ));
        }

        let sentiment = metrics.engagement_quality.comment_sentiment_quality;
        let brand_fit: u32 = rng.random_range(30..=95);
        let fatigue: u32 = rng.random_range(0..=60);

        kpis.extend([
            KpiOutput::new(
                "comment_sentiment_quality",
                json!(format!("{}/100", sentiment)),
                f64::from(sentiment),
                "High volume of product-specific questions vs generic emojis.",
                0.85,
            ),
            KpiOutput::new(
                "audience_brand_fit",
                json!(format!("{}%", brand_fit)),
                f64::from(brand_fit),
                "Demographics align well with target.",
                0.85,
            ),
            KpiOutput::new(
                "fatigue_index",
                json!(fatigue),
                f64::from(100 - fatigue),
                "Posting frequency is healthy.",
                0.9,
            ),
        ]);

        Ok(AnalystReport {
            role: self.role().display_name().to_string(),
            analysis: build_analysis(&mut rng),
            kpis,
        })
    }
}
