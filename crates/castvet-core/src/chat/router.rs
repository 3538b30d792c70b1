//! Keyword query router.
//!
//! First match wins, top to bottom: metric rules, then category rules,
//! then the help fallback. "how is completion and engagement" therefore
//! answers with the completion metric card even though an engagement rule
//! exists further down.

use crate::types::{AnalysisCard, Card, CardMetric, ChatContext, KpiOutput, RiskLevel};

use super::enrich::{display_value, title_case};
use super::MetricEnricher;

/// Query keywords paired with the metric-id fragments they resolve to.
const METRIC_RULES: [(&[&str], &[&str]); 10] = [
    (&["completion", "viewed"], &["avg_percentage_viewed", "completion"]),
    (&["stay", "swipe"], &["stayed_vs_swiped"]),
    (&["duration"], &["avg_view_duration"]),
    (&["save"], &["predicted_saves"]),
    (&["share"], &["predicted_shares"]),
    (&["redemption", "code"], &["promo_code_redemptions"]),
    (&["cpa"], &["predicted_cpa"]),
    (
        &["engagement", "interact", "like", "comment"],
        &["engagement_quality", "engagement_rate", "comment_sentiment_quality"],
    ),
    (&["sentiment"], &["comment_sentiment_quality", "sentiment"]),
    (&["safety", "scam", "fraud"], &["brand_safety_score", "fake_follower", "bot"]),
];

/// Query keywords paired with the category they summarize.
const CATEGORY_RULES: [(&[&str], &str, &str); 6] = [
    (&["attention", "hook", "view", "watch"], "Attention", "Attention Analysis"),
    (&["viral", "reach"], "Virality", "Virality Assessment"),
    (
        &["roi", "money", "revenue", "convert", "sale"],
        "Conversion",
        "Conversion Potential",
    ),
    (&["risk", "bot"], "Risk", "Risk Evaluation"),
    (&["audience", "fan", "demographic"], "Audience", "Audience Analysis"),
    (&["engagement"], "Audience", "Engagement & Audience Analysis"),
];

/// Answer one query against a chat context. Total: every query produces
/// a card, unmatched ones get the help fallback.
pub fn route(query: &str, ctx: &ChatContext) -> Card {
    let query = query.to_lowercase();

    for (triggers, id_fragments) in METRIC_RULES {
        if triggers.iter().any(|t| query.contains(t)) {
            if let Some(kpi) = find_metric(ctx, id_fragments) {
                tracing::debug!(kpi = %kpi.kpi_id, "metric rule matched");
                return Card::Consultant(MetricEnricher::new().enrich_metric(
                    &kpi.kpi_id,
                    &kpi.value,
                    kpi.score_normalized,
                    &ctx.niche,
                    &ctx.goal,
                ));
            }
            // No such metric in this evaluation; later rules may still hit.
        }
    }

    for (triggers, category, title) in CATEGORY_RULES {
        if triggers.iter().any(|t| query.contains(t)) {
            if let Some(card) = category_card(ctx, category, title) {
                tracing::debug!(category, "category rule matched");
                return card;
            }
        }
    }

    fallback_card(ctx)
}

/// First metric (in category order) whose id contains any fragment.
fn find_metric<'a>(ctx: &'a ChatContext, id_fragments: &[&str]) -> Option<&'a KpiOutput> {
    ctx.categories
        .values()
        .flat_map(|cat| cat.metrics.iter())
        .find(|kpi| id_fragments.iter().any(|f| kpi.kpi_id.contains(f)))
}

fn category_card(ctx: &ChatContext, category: &str, title: &str) -> Option<Card> {
    let cat = ctx.categories.get(category)?;

    let mut verdict = "Neutral";
    if cat.conclusion.contains("Strong") || cat.conclusion.contains("High") {
        verdict = "Positive";
    }
    if cat.conclusion.contains("Low")
        || cat.conclusion.contains("fail")
        || cat.conclusion.contains("Risk")
    {
        verdict = "Concern";
    }

    Some(Card::Analysis(AnalysisCard {
        title: title.to_string(),
        verdict: verdict.to_string(),
        content: cat.conclusion.clone(),
        metrics: cat
            .metrics
            .iter()
            .map(|kpi| CardMetric {
                label: title_case(&kpi.kpi_id),
                value: display_value(&kpi.value),
            })
            .collect(),
    }))
}

fn fallback_card(ctx: &ChatContext) -> Card {
    let exec = &ctx.executive_summary;

    let mut suggestions = Vec::new();
    if exec.risk_level == RiskLevel::High {
        suggestions.push(CardMetric {
            label: "Analyze Risk".to_string(),
            value: "Is it safe?".to_string(),
        });
    }
    suggestions.push(CardMetric {
        label: "Check ROI".to_string(),
        value: "What is the ROI?".to_string(),
    });
    suggestions.push(CardMetric {
        label: "Audience Quality".to_string(),
        value: "How is the audience?".to_string(),
    });

    Card::Analysis(AnalysisCard {
        title: "Out of Scope".to_string(),
        verdict: "Help".to_string(),
        content: format!(
            "I focus on performance, risk, and ROI analysis. Based on the **{}** \
             recommendation, here are the most relevant questions to ask:",
            exec.decision
        ),
        metrics: suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::build_chat_context;
    use crate::types::{ContentType, Decision, EvaluationContext};
    use crate::{CampaignGenerator, ProfileGenerator};

    fn sample_context(id: &str) -> ChatContext {
        let ctx = EvaluationContext {
            influencer: ProfileGenerator::new().generate(id, ContentType::All),
            campaign: CampaignGenerator::with_seed(3).generate_brief(),
            content_type: ContentType::All,
        };
        build_chat_context(&crate::evaluate(&ctx).unwrap())
    }

    #[test]
    fn test_metric_rules_beat_category_rules() {
        let card = route("how is completion and engagement", &sample_context("demo-1"));
        match card {
            Card::Consultant(c) => assert_eq!(c.metric_name, "Avg Percentage Viewed"),
            Card::Analysis(c) => panic!("expected metric card, got '{}'", c.title),
        }
    }

    #[test]
    fn test_category_queries_get_analysis_cards() {
        let ctx = sample_context("demo-2");
        for (query, title) in [
            ("what is the risk here", "Risk Evaluation"),
            ("tell me about the roi", "Conversion Potential"),
            ("how viral can this go", "Virality Assessment"),
            ("describe the audience", "Audience Analysis"),
        ] {
            match route(query, &ctx) {
                Card::Analysis(c) => assert_eq!(c.title, title),
                Card::Consultant(c) => panic!("expected analysis card, got '{}'", c.metric_name),
            }
        }
    }

    #[test]
    fn test_router_is_total() {
        let card = route("hello there, can you help me", &sample_context("demo-3"));
        match card {
            Card::Analysis(c) => {
                assert_eq!(c.title, "Out of Scope");
                assert_eq!(c.verdict, "Help");
                assert!(!c.metrics.is_empty());
            }
            Card::Consultant(_) => panic!("fallback must be an analysis card"),
        }
    }

    #[test]
    fn test_fallback_suggestions_follow_risk_level() {
        let mut ctx = sample_context("demo-4");
        ctx.executive_summary.risk_level = RiskLevel::High;
        ctx.executive_summary.decision = Decision::NoGo;

        match route("hello", &ctx) {
            Card::Analysis(c) => {
                assert_eq!(c.metrics.len(), 3);
                assert_eq!(c.metrics[0].label, "Analyze Risk");
                assert!(c.content.contains("**NO-GO**"));
            }
            Card::Consultant(_) => unreachable!(),
        }

        ctx.executive_summary.risk_level = RiskLevel::Low;
        match route("hello", &ctx) {
            Card::Analysis(c) => {
                assert_eq!(c.metrics[0].label, "Check ROI");
                assert_eq!(c.metrics.len(), 2);
            }
            Card::Consultant(_) => unreachable!(),
        }
    }

    #[test]
    fn test_sentiment_query_resolves_metric() {
        match route("what's the sentiment", &sample_context("demo-5")) {
            Card::Consultant(c) => assert_eq!(c.metric_name, "Comment Sentiment Quality"),
            Card::Analysis(_) => panic!("expected sentiment metric card"),
        }
    }
}
